#[tokio::main]
async fn main() {
    funnel::start_server().await;
}

//! Backend for the Essato Customs giveaway funnel.
//!
//! # General Infrastructure
//! - Two-step funnel: page 1 captures the lead (name, phone, email), page 2 captures
//!   body measurements and locks in a size profile
//! - Each lead is one spreadsheet row, identified by a UUID written to column A
//! - Page 1 appends the row, page 2 rewrites it in place with measurements and sizes
//! - Confirmation emails go out after each step through the Resend API
//! - Size labels are computed here, once per submission, so the spreadsheet and the
//!   email always agree
//!
//! # Request Flow
//! - Frontend POSTs JSON, backend forwards to the Sheets/Resend APIs and returns JSON
//! - Every submission is stateless, no session storage on the server
//! - Third-party failures surface to the caller as a JSON error message, no retries
//!
//! # Notes
//!
//! ## Sheets over a real database
//! The campaign team works out of the spreadsheet directly, so the sheet IS the
//! datastore. Row volume is a few thousand leads at most, well under the API quota.
//!
//! ## Secrets
//! API credentials are mounted as Docker secrets under `/run/secrets`, everything
//! else is plain environment variables.
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod email;
pub mod error;
pub mod models;
pub mod routes;
pub mod sheets;
pub mod sizing;
pub mod state;

use routes::{
    email_page1_handler, email_page2_handler, health_handler, submit_page1_handler,
    submit_page2_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading configuration...");
    let state = AppState::new();

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/submit/page1", post(submit_page1_handler))
        .route("/submit/page2", post(submit_page2_handler))
        .route("/email/page1", post(email_page1_handler))
        .route("/email/page2", post(email_page2_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use std::sync::Arc;

use reqwest::Client;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub http: Client,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        Arc::new(Self {
            config,
            http: Client::new(),
        })
    }
}

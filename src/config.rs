use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub sheets_url: String,
    pub sheets_id: String,
    pub sheets_tab: String,
    pub sheets_token: String,
    pub resend_url: String,
    pub resend_key: Option<String>,
    pub email_from: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "8080"),
            sheets_url: try_load("SHEETS_API_URL", "https://sheets.googleapis.com"),
            sheets_id: must_load("GOOGLE_SHEETS_ID"),
            sheets_tab: try_load("GOOGLE_SHEETS_TAB", "Leads"),
            sheets_token: read_secret("SHEETS_API_TOKEN"),
            resend_url: try_load("RESEND_API_URL", "https://api.resend.com"),
            resend_key: read_secret_opt("RESEND_API_KEY"),
            email_from: try_load("EMAIL_FROM", "Essato Customs <hello@essatocustoms.com>"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn must_load(key: &str) -> String {
    env::var(key)
        .map_err(|_| {
            warn!("{key} is not configured");
        })
        .expect("Environment misconfigured!")
}

fn read_secret(secret_name: &str) -> String {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .expect("Secrets misconfigured!")
}

fn read_secret_opt(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    match read_to_string(&path) {
        Ok(s) => Some(s.trim().to_string()),
        Err(e) => {
            warn!("Failed to read {secret_name} from file: {e}");
            None
        }
    }
}

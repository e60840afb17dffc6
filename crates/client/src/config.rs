use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub poll_interval: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Reads `PORTAL_BASE_URL` and the optional `POLL_INTERVAL_SECS`.
    pub fn init() -> Result<Self> {
        dotenv::dotenv().ok();

        let base_url = std::env::var("PORTAL_BASE_URL")
            .context("Missing environment variable: PORTAL_BASE_URL")?;

        let config = Self::new(base_url);

        match std::env::var("POLL_INTERVAL_SECS") {
            Ok(secs) => {
                let secs = secs
                    .parse::<u64>()
                    .context("POLL_INTERVAL_SECS must be a whole number of seconds")?;
                Ok(config.with_poll_interval(Duration::from_secs(secs)))
            }
            Err(_) => Ok(config),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

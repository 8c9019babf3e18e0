use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub citas_api_url: String,
    pub bind_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            citas_api_url: env::var("CITAS_API_URL")
                .unwrap_or_else(|_| {
                    warn!("CITAS_API_URL not set, using empty value");
                    String::new()
                }),
            bind_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    /// Build a config pointing at an explicit backend URL. Used by tests
    /// against a mock server.
    pub fn with_api_url(url: impl Into<String>) -> Self {
        Self {
            citas_api_url: url.into(),
            bind_port: 3000,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.citas_api_url.is_empty()
    }
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub auth: AuthConfig,
    pub usda_api_key: String,
    /// Timeout applied to each external HTTP call (identity service, food
    /// databases).
    pub external_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let auth = AuthConfig {
            base_url: std::env::var("AUTH_BASE_URL")?,
            api_key: std::env::var("AUTH_API_KEY")?,
        };
        let usda_api_key = std::env::var("USDA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".into());
        let external_timeout_secs = std::env::var("EXTERNAL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);
        Ok(Self {
            database_url,
            auth,
            usda_api_key,
            external_timeout_secs,
        })
    }
}

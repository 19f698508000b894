use shared::{Config, FinnhubClient};

/// Process-wide handles, built once at startup and passed to handlers
/// through dptree dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub bot_token: String,
    pub finnhub: FinnhubClient,
}

impl AppState {
    pub fn new() -> Result<Self, anyhow::Error> {
        let config = Config::from_env()?;
        let finnhub = FinnhubClient::new(config.api_base_url.clone(), config.api_key.clone());
        tracing::info!("Market data client ready ({})", config.api_base_url);

        Ok(AppState {
            bot_token: config.bot_token,
            finnhub,
        })
    }
}

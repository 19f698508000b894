pub mod config;
pub mod finnhub;
pub mod models;

pub use config::Config;
pub use finnhub::FinnhubClient;
pub use models::*;

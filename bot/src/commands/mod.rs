use teloxide::utils::command::BotCommands;

pub mod chart;
pub mod earnings;
pub mod news;
pub mod price;
pub mod trends;

pub use chart::handle_chart;
pub use earnings::handle_earnings;
pub use news::handle_news;
pub use price::{handle_cprice, handle_price};
pub use trends::handle_trends;

pub const INVALID_SYMBOL: &str = "Invalid symbol";
pub const NO_DATA_FOUND: &str = "No data found";

/// Market data commands, "." prefixed to match the legacy surface.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", prefix = ".")]
pub enum Command {
    /// Current price and change for the day for a stock symbol
    Price(String),
    /// Last price for a cryptocurrency
    Cprice(String),
    /// Actual and estimated EPS for past quarters for a stock
    Earnings(String),
    /// Company news from 1 year ago to today, at most 5 items
    News(String),
    /// Analyst recommendation trends, one snapshot every 6 months for 3 years
    Trends(String),
    /// Candlestick chart with moving averages, volume and RSI
    Chart(String),
}

/// Normalizes a raw symbol argument to its first word, uppercased; `None`
/// means the user gets an "Invalid symbol" reply and no upstream call is
/// made.
pub fn clean_symbol(raw: &str) -> Option<String> {
    raw.split_whitespace()
        .next()
        .map(|symbol| symbol.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_symbols_are_rejected() {
        assert_eq!(clean_symbol(""), None);
        assert_eq!(clean_symbol("   "), None);
    }

    #[test]
    fn symbols_are_uppercased() {
        assert_eq!(clean_symbol("aapl"), Some("AAPL".to_string()));
        assert_eq!(clean_symbol(" msft "), Some("MSFT".to_string()));
    }

    #[test]
    fn trailing_words_are_dropped() {
        assert_eq!(clean_symbol("aapl extra words"), Some("AAPL".to_string()));
    }
}

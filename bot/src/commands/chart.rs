use std::sync::Arc;

use chrono::{Duration, Utc};
use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::commands::{clean_symbol, INVALID_SYMBOL};
use crate::services::chart::render_candle_chart;
use crate::state::AppState;

/// Candle bucket size accepted by the .chart command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Min1,
    Min5,
    Min15,
    Min30,
    Min60,
    Day,
    Week,
    Month,
}

impl Resolution {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Resolution::Min1),
            "5" => Some(Resolution::Min5),
            "15" => Some(Resolution::Min15),
            "30" => Some(Resolution::Min30),
            "60" => Some(Resolution::Min60),
            "d" => Some(Resolution::Day),
            "w" => Some(Resolution::Week),
            "m" => Some(Resolution::Month),
            _ => None,
        }
    }

    /// Resolution from the optional second command argument: omitted
    /// falls back to 15 minutes, unknown codes are rejected.
    pub fn from_arg(code: Option<&str>) -> Option<Self> {
        match code {
            None => Some(Resolution::Min15),
            Some(code) => Resolution::parse(code),
        }
    }

    /// Code understood by the candle endpoint.
    pub fn api_code(self) -> &'static str {
        match self {
            Resolution::Min1 => "1",
            Resolution::Min5 => "5",
            Resolution::Min15 => "15",
            Resolution::Min30 => "30",
            Resolution::Min60 => "60",
            Resolution::Day => "D",
            Resolution::Week => "W",
            Resolution::Month => "M",
        }
    }

    /// Lookback window sized to give a readable number of candles.
    pub fn lookback(self) -> Duration {
        match self {
            Resolution::Min1 => Duration::hours(6),
            Resolution::Min5 => Duration::hours(24),
            Resolution::Min15 => Duration::hours(72),
            Resolution::Min30 => Duration::hours(120),
            Resolution::Min60 => Duration::hours(168),
            Resolution::Day => Duration::days(150),
            Resolution::Week => Duration::days(300),
            Resolution::Month => Duration::days(365),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resolution::Min1 => "1m",
            Resolution::Min5 => "5m",
            Resolution::Min15 => "15m",
            Resolution::Min30 => "30m",
            Resolution::Min60 => "1h",
            Resolution::Day => "1d",
            Resolution::Week => "1w",
            Resolution::Month => "1M",
        }
    }
}

/// Handler for the .chart command: candlestick chart with SMA(3)/SMA(15)
/// overlays, volume and a 14-period RSI panel, sent as a photo.
pub async fn handle_chart(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    args: String,
) -> Result<(), anyhow::Error> {
    let mut parts = args.split_whitespace();
    let symbol = parts.next().unwrap_or("");
    let Some(symbol) = clean_symbol(symbol) else {
        bot.send_message(msg.chat.id, INVALID_SYMBOL).await?;
        return Ok(());
    };

    let Some(resolution) = Resolution::from_arg(parts.next()) else {
        bot.send_message(msg.chat.id, "Invalid chart type").await?;
        return Ok(());
    };

    tracing::info!("Handling .chart for {} at {}", symbol, resolution.label());
    let to = Utc::now().timestamp();
    let from = to - resolution.lookback().num_seconds();
    let candles = state
        .finnhub
        .stock_candles(&symbol, resolution.api_code(), from, to)
        .await?;

    if candles.is_empty() {
        bot.send_message(msg.chat.id, "No data").await?;
        return Ok(());
    }

    // NamedTempFile removes the image on drop, send failure included.
    let image = render_candle_chart(&candles, &symbol, resolution.label())?;
    bot.send_photo(msg.chat.id, InputFile::file(image.path().to_path_buf()))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_fixed_resolution_set() {
        for code in ["1", "5", "15", "30", "60", "d", "w", "m"] {
            assert!(Resolution::parse(code).is_some(), "code {}", code);
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(Resolution::parse("xyz"), None);
        assert_eq!(Resolution::parse("D"), None);
        assert_eq!(Resolution::parse(""), None);
    }

    #[test]
    fn omitted_resolution_defaults_to_15_minutes() {
        assert_eq!(Resolution::from_arg(None), Some(Resolution::Min15));
        assert_eq!(Resolution::from_arg(None), Resolution::from_arg(Some("15")));
    }

    #[test]
    fn from_arg_keeps_explicit_codes_and_rejections() {
        assert_eq!(Resolution::from_arg(Some("d")), Some(Resolution::Day));
        assert_eq!(Resolution::from_arg(Some("xyz")), None);
    }

    #[test]
    fn intraday_windows_are_hour_scale() {
        assert_eq!(Resolution::Min1.lookback(), Duration::hours(6));
        assert_eq!(Resolution::Min60.lookback(), Duration::hours(168));
    }

    #[test]
    fn daily_and_coarser_windows_span_150_to_365_days() {
        for resolution in [Resolution::Day, Resolution::Week, Resolution::Month] {
            let days = resolution.lookback().num_days();
            assert!((150..=365).contains(&days), "{:?} -> {} days", resolution, days);
        }
    }

    #[test]
    fn api_codes_match_upstream() {
        assert_eq!(Resolution::Min15.api_code(), "15");
        assert_eq!(Resolution::Day.api_code(), "D");
        assert_eq!(Resolution::Month.api_code(), "M");
    }
}

use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::{clean_symbol, INVALID_SYMBOL, NO_DATA_FOUND};
use crate::embed::{Embed, Tone};
use crate::state::AppState;
use shared::Quote;

/// Handler for the .price command: current price and day change for a stock.
pub async fn handle_price(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    symbol: String,
) -> Result<(), anyhow::Error> {
    let Some(symbol) = clean_symbol(&symbol) else {
        bot.send_message(msg.chat.id, INVALID_SYMBOL).await?;
        return Ok(());
    };

    tracing::info!("Handling .price for {}", symbol);
    let quote = state.finnhub.quote(&symbol).await?;

    match quote_reply(&symbol, &quote) {
        Some(embed) => {
            bot.send_message(msg.chat.id, embed.to_html())
                .parse_mode(teloxide::types::ParseMode::Html)
                .await?;
        }
        None => {
            bot.send_message(msg.chat.id, NO_DATA_FOUND).await?;
        }
    }
    Ok(())
}

/// Embed for a quote, or `None` when the upstream signals an unknown
/// symbol with a current price of exactly zero.
fn quote_reply(symbol: &str, quote: &Quote) -> Option<Embed> {
    if quote.current == 0.0 {
        return None;
    }

    let change = quote.change.unwrap_or(0.0);
    let percent_change = quote.percent_change.unwrap_or(0.0);

    let mut embed = Embed::new(symbol, tone_for_change(change));
    embed.field("Current price", format!("{}", quote.current));
    embed.field("High", format!("{}", quote.high));
    embed.field("Low", format!("{}", quote.low));
    embed.field("Change", format!("{}", change));
    embed.field("Percent change", format!("{:.2}%", percent_change));
    Some(embed)
}

/// Handler for the .cprice command.
// TODO: finish — wire up the crypto quote endpoint and reply with last price
pub async fn handle_cprice(
    bot: Bot,
    msg: Message,
    _state: Arc<AppState>,
    symbol: String,
) -> Result<(), anyhow::Error> {
    if clean_symbol(&symbol).is_none() {
        bot.send_message(msg.chat.id, INVALID_SYMBOL).await?;
    }
    Ok(())
}

fn tone_for_change(change: f64) -> Tone {
    if change > 0.0 {
        Tone::Gain
    } else if change < 0.0 {
        Tone::Loss
    } else {
        Tone::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(current: f64, change: Option<f64>) -> Quote {
        Quote {
            current,
            high: current + 1.0,
            low: current - 1.0,
            change,
            percent_change: change.map(|c| c / 10.0),
        }
    }

    #[test]
    fn zero_price_quote_means_no_data() {
        // Unknown symbols come back as a zero quote with null change fields.
        let unknown = Quote {
            current: 0.0,
            high: 0.0,
            low: 0.0,
            change: None,
            percent_change: None,
        };
        assert!(quote_reply("NOPE", &unknown).is_none());
    }

    #[test]
    fn nonzero_quote_builds_a_green_embed_on_gains() {
        let embed = quote_reply("AAPL", &quote(261.74, Some(1.23))).unwrap();
        let html = embed.to_html();
        assert!(html.starts_with("🟢 <b>AAPL</b>"));
        assert!(html.contains("<b>Current price</b>\n261.74"));
        assert!(html.contains("<b>Percent change</b>\n0.12%"));
    }

    #[test]
    fn nonzero_quote_builds_a_red_embed_on_losses() {
        let embed = quote_reply("AAPL", &quote(261.74, Some(-2.5))).unwrap();
        assert!(embed.to_html().starts_with("🔴"));
    }

    #[test]
    fn positive_change_is_green() {
        assert_eq!(tone_for_change(1.23), Tone::Gain);
    }

    #[test]
    fn negative_change_is_red() {
        assert_eq!(tone_for_change(-0.01), Tone::Loss);
    }

    #[test]
    fn flat_change_is_neutral() {
        assert_eq!(tone_for_change(0.0), Tone::Neutral);
    }

    #[test]
    fn percent_change_uses_two_decimals() {
        assert_eq!(format!("{:.2}%", 0.4715), "0.47%");
        assert_eq!(format!("{:.2}%", 12.344), "12.34%");
    }
}

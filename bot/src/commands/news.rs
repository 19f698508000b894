use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDate};
use teloxide::prelude::*;

use crate::commands::{clean_symbol, INVALID_SYMBOL, NO_DATA_FOUND};
use crate::embed::{Embed, Tone};
use crate::state::AppState;

const MAX_ITEMS: usize = 5;

/// Handler for the .news command: company news from 1 year ago to today,
/// at most 5 items in the order the upstream returns them.
pub async fn handle_news(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    symbol: String,
) -> Result<(), anyhow::Error> {
    let Some(symbol) = clean_symbol(&symbol) else {
        bot.send_message(msg.chat.id, INVALID_SYMBOL).await?;
        return Ok(());
    };

    tracing::info!("Handling .news for {}", symbol);
    let today = Local::now().date_naive();
    let items = state
        .finnhub
        .company_news(&symbol, today - Duration::days(365), today)
        .await?;

    if items.is_empty() {
        bot.send_message(msg.chat.id, NO_DATA_FOUND).await?;
        return Ok(());
    }

    let mut embed = Embed::new(format!("News for {}", symbol), Tone::Info);
    for item in items.iter().take(MAX_ITEMS) {
        let published = DateTime::from_timestamp(item.datetime, 0)
            .ok_or_else(|| anyhow::anyhow!("bad news timestamp: {}", item.datetime))?
            .with_timezone(&Local)
            .date_naive();
        embed.field(
            item.source.as_str(),
            format!(
                "{} - {} Link-{}",
                date_label(published, today),
                item.headline,
                item.url
            ),
        );
    }

    bot.send_message(msg.chat.id, embed.to_html())
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;
    Ok(())
}

/// "Today" and "Yesterday" for the two most recent days, MM-DD-YYYY
/// otherwise.
fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today - Duration::days(1) {
        "Yesterday".to_string()
    } else {
        date.format("%m-%d-%Y").to_string()
    }
}

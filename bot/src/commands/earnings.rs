use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::{clean_symbol, INVALID_SYMBOL, NO_DATA_FOUND};
use crate::embed::{Embed, Tone};
use crate::state::AppState;
use shared::EarningsRecord;

/// Handler for the .earnings command: actual and estimated EPS per quarter.
pub async fn handle_earnings(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    symbol: String,
) -> Result<(), anyhow::Error> {
    let Some(symbol) = clean_symbol(&symbol) else {
        bot.send_message(msg.chat.id, INVALID_SYMBOL).await?;
        return Ok(());
    };

    tracing::info!("Handling .earnings for {}", symbol);
    let records = state.finnhub.company_earnings(&symbol).await?;

    if records.is_empty() {
        bot.send_message(msg.chat.id, NO_DATA_FOUND).await?;
        return Ok(());
    }

    let mut embed = Embed::new(format!("Earnings Results for {}", symbol), Tone::Info);
    for record in &records {
        let (name, value) = format_quarter(record)?;
        embed.field(name, value);
    }

    bot.send_message(msg.chat.id, embed.to_html())
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;
    Ok(())
}

/// Fiscal quarters end on fixed months upstream; anything else is a
/// malformed response.
fn quarter_for_month(month: &str) -> Option<&'static str> {
    match month {
        "03" => Some("1"),
        "06" => Some("2"),
        "09" => Some("3"),
        "12" => Some("4"),
        _ => None,
    }
}

fn format_quarter(record: &EarningsRecord) -> Result<(String, String), anyhow::Error> {
    let mut parts = record.period.split('-');
    let (year, month) = match (parts.next(), parts.next()) {
        (Some(year), Some(month)) => (year, month),
        _ => anyhow::bail!("malformed earnings period: {}", record.period),
    };
    let quarter = quarter_for_month(month)
        .ok_or_else(|| anyhow::anyhow!("unexpected fiscal month in period {}", record.period))?;

    let name = format!("Q{} {}", quarter, year);
    let value = format!(
        "Estimated EPS: {}\nActual EPS: {}\nSurprise: {}\nSurprise Percent: {}",
        format_eps(record.estimate),
        format_eps(record.actual),
        format_eps(record.surprise),
        record
            .surprise_percent
            .map_or_else(|| "n/a".to_string(), |p| format!("{:.2}%", p)),
    );
    Ok((name, value))
}

fn format_eps(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{}", v))
}

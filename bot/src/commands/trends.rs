use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::{clean_symbol, INVALID_SYMBOL, NO_DATA_FOUND};
use crate::embed::{Embed, Tone};
use crate::state::AppState;
use shared::RecommendationTrend;

/// Handler for the .trends command: analyst recommendation counts, one
/// snapshot every 6 months going back roughly 3 years.
pub async fn handle_trends(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    symbol: String,
) -> Result<(), anyhow::Error> {
    let Some(symbol) = clean_symbol(&symbol) else {
        bot.send_message(msg.chat.id, INVALID_SYMBOL).await?;
        return Ok(());
    };

    tracing::info!("Handling .trends for {}", symbol);
    let trends = state.finnhub.recommendation_trends(&symbol).await?;
    let samples = semiannual_samples(&trends);

    if samples.is_empty() {
        bot.send_message(msg.chat.id, NO_DATA_FOUND).await?;
        return Ok(());
    }

    let mut embed = Embed::new(format!("Recommendation Trends for {}", symbol), Tone::Info);
    for trend in samples {
        embed.field(period_heading(&trend.period)?, format_counts(trend));
    }

    bot.send_message(msg.chat.id, embed.to_html())
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;
    Ok(())
}

/// Every 6th record of the most recent 36 monthly entries, newest first.
fn semiannual_samples(trends: &[RecommendationTrend]) -> Vec<&RecommendationTrend> {
    trends.iter().take(36).step_by(6).collect()
}

fn month_name(month: &str) -> Option<&'static str> {
    match month {
        "01" => Some("Jan"),
        "02" => Some("Feb"),
        "03" => Some("Mar"),
        "04" => Some("Apr"),
        "05" => Some("May"),
        "06" => Some("Jun"),
        "07" => Some("Jul"),
        "08" => Some("Aug"),
        "09" => Some("Sep"),
        "10" => Some("Oct"),
        "11" => Some("Nov"),
        "12" => Some("Dec"),
        _ => None,
    }
}

fn period_heading(period: &str) -> Result<String, anyhow::Error> {
    let mut parts = period.split('-');
    let (year, month) = match (parts.next(), parts.next()) {
        (Some(year), Some(month)) => (year, month),
        _ => anyhow::bail!("malformed trend period: {}", period),
    };
    let name = month_name(month)
        .ok_or_else(|| anyhow::anyhow!("unexpected month in trend period {}", period))?;
    Ok(format!("{} {}", name, year))
}

fn format_counts(trend: &RecommendationTrend) -> String {
    format!(
        "Strong buy: {}\nBuy: {}\nHold: {}\nSell: {}\nStrong sell: {}",
        trend.strong_buy, trend.buy, trend.hold, trend.sell, trend.strong_sell
    )
}

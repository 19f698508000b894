use anyhow::Result;
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

mod commands;
mod embed;
mod services;
mod state;

use crate::commands::{
    handle_chart, handle_cprice, handle_earnings, handle_news, handle_price, handle_trends,
    Command,
};
use crate::state::AppState;

fn schema() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Price(symbol)].endpoint(handle_price))
        .branch(case![Command::Cprice(symbol)].endpoint(handle_cprice))
        .branch(case![Command::Earnings(symbol)].endpoint(handle_earnings))
        .branch(case![Command::News(symbol)].endpoint(handle_news))
        .branch(case![Command::Trends(symbol)].endpoint(handle_trends))
        .branch(case![Command::Chart(args)].endpoint(handle_chart));

    Update::filter_message().branch(command_handler)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting market data bot...");

    let app_state = Arc::new(AppState::new()?);
    tracing::info!("AppState initialized");

    let bot = Bot::new(&app_state.bot_token);

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![app_state.clone()])
        // Unrecognized commands get no reply; another bot may share the prefix.
        .default_handler(|_upd| async {})
        .enable_ctrlc_handler()
        .build();

    tracing::info!("Bot is running and waiting for updates...");
    dispatcher.dispatch().await;

    Ok(())
}

//! IMDb inline bot
//!
//! Answers inline queries with photo cards from an IMDb-like search API and,
//! once a card is sent, replaces it with a detailed HTML caption for the
//! chosen title.

mod answer;
mod config;
mod convert;
mod errors;
mod handlers;
mod health;

use anyhow::{Context, Result};
use clap::Parser;
use imdb_client::ImdbClient;
use imdb_client::env::SystemEnv;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::handlers::BotState;

/// IMDb inline bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/imdb-bot.toml")]
    config: String,

    /// Telegram bot token (overrides config file)
    #[arg(long, env = "BOT_TOKEN")]
    bot_token: Option<String>,

    /// Lookup API base URL (overrides config file)
    #[arg(long, env = "IMDB_API_URL")]
    imdb_api_url: Option<String>,

    /// Health check server port (overrides config file)
    #[arg(long, env = "HEALTH_CHECK_PORT")]
    health_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imdb_bot=debug,imdb_client=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting IMDb inline bot");
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        info!("Loading config from file: {}", args.config);
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, using environment variables");
        Config::from_env(&SystemEnv)
    };

    if let Some(bot_token) = args.bot_token {
        config.telegram.bot_token = bot_token;
    }
    if let Some(api_url) = args.imdb_api_url {
        config.imdb.api_url = Some(api_url);
    }
    if let Some(port) = args.health_port {
        config.health.port = port;
    }

    config.validate()?;
    info!("Configuration loaded successfully");

    let imdb = ImdbClient::new(config.imdb.clone()).context("Failed to build lookup HTTP client")?;
    let imdb_configured = imdb.config().is_configured();
    if imdb_configured {
        // Reject a malformed URL before polling starts
        imdb.config().endpoint().context("Invalid IMDB_API_URL")?;
    } else {
        warn!("IMDB_API_URL is not set; searches will answer with a notice only");
    }

    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram.bot_token);

    let bot_username = match bot.get_me().await {
        Ok(me) => {
            let username = me.username().to_string();
            info!("Bot authenticated as: @{}", username);
            Some(username)
        }
        Err(e) => {
            error!("Failed to authenticate bot: {}", e);
            return Err(e.into());
        }
    };

    let health_state = health::AppState::new(bot_username, imdb_configured);

    let health_state_clone = health_state.clone();
    let health_port = config.health.port;
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_state_clone, health_port).await {
            error!("Health check server error: {}", e);
        }
    });

    let state = BotState::new(imdb, config.messages);

    let message_handler = Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(handlers::handle_text_message);

    let inline_query_handler = Update::filter_inline_query()
        .endpoint(handlers::handle_inline_query);

    let chosen_inline_result_handler = Update::filter_chosen_inline_result()
        .endpoint(handlers::handle_chosen_inline_result);

    let all_handlers = dptree::entry()
        .branch(message_handler)
        .branch(inline_query_handler)
        .branch(chosen_inline_result_handler);

    info!("Bot initialized, starting dispatcher (long polling)");

    Dispatcher::builder(bot, all_handlers)
        .dependencies(dptree::deps![state, health_state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error from the update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("IMDb inline bot stopped");
    Ok(())
}

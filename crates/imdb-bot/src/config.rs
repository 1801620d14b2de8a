//! Configuration management for imdb-bot

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{Context, Result, bail};
use imdb_client::ImdbConfig;
use imdb_client::env::ReadEnv;
use serde::{Deserialize, Serialize};
use std::fs;

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramBotConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub imdb: ImdbConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

/// Telegram bot specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramBotConfig {
    /// Bot token from BotFather
    #[serde(default)]
    pub bot_token: String,
}

/// User-facing texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Button text answered to an empty inline query (`NO_QS_INLINE_MESG`)
    #[serde(default = "default_no_query_button_text")]
    pub no_query_button_text: String,
    /// Start parameter of that button (`NO_QS_INLINE_DEEPL`)
    #[serde(default = "default_no_query_start_parameter")]
    pub no_query_start_parameter: String,
    /// HTML reply to text messages (`QOLNO_PM_MESG`)
    #[serde(default = "default_private_message")]
    pub private_message: String,
    /// Label of the button that switches to inline mode (`QOLNO_PM_SRCH_BTN_TEXT`)
    #[serde(default = "default_search_button_text")]
    pub search_button_text: String,
}

/// Health check server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_health_port")]
    pub port: u16,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env<E: ReadEnv>(env: &E) -> Self {
        let port = env
            .non_blank("HEALTH_CHECK_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_health_port);

        Config {
            telegram: TelegramBotConfig {
                bot_token: env.non_blank("BOT_TOKEN").unwrap_or_default(),
            },
            messages: MessagesConfig::from_env(env),
            imdb: ImdbConfig::from_env(env),
            health: HealthConfig { port },
        }
    }

    /// Reject configurations the bot cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            bail!("BOT_TOKEN not set (pass --bot-token, set BOT_TOKEN or telegram.bot_token)");
        }
        if !is_valid_start_parameter(&self.messages.no_query_start_parameter) {
            bail!(
                "Invalid start parameter '{}': use 1-64 characters from A-Z, a-z, 0-9, _ and -",
                self.messages.no_query_start_parameter
            );
        }
        Ok(())
    }
}

impl MessagesConfig {
    pub fn from_env<E: ReadEnv>(env: &E) -> Self {
        let defaults = Self::default();
        Self {
            no_query_button_text: env
                .non_blank("NO_QS_INLINE_MESG")
                .unwrap_or(defaults.no_query_button_text),
            no_query_start_parameter: env
                .non_blank("NO_QS_INLINE_DEEPL")
                .unwrap_or(defaults.no_query_start_parameter),
            private_message: env
                .non_blank("QOLNO_PM_MESG")
                .unwrap_or(defaults.private_message),
            search_button_text: env
                .non_blank("QOLNO_PM_SRCH_BTN_TEXT")
                .unwrap_or(defaults.search_button_text),
        }
    }
}

/// Telegram deep-link parameters allow `[A-Za-z0-9_-]{1,64}`.
fn is_valid_start_parameter(value: &str) -> bool {
    (1..=64).contains(&value.len())
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn default_no_query_button_text() -> String {
    "Type a movie or series name to search IMDb".to_string()
}

fn default_no_query_start_parameter() -> String {
    "inline_help".to_string()
}

fn default_private_message() -> String {
    "Use me in <b>inline mode</b> to search IMDb.".to_string()
}

fn default_search_button_text() -> String {
    "Search IMDb".to_string()
}

fn default_health_port() -> u16 {
    3000
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            no_query_button_text: default_no_query_button_text(),
            no_query_start_parameter: default_no_query_start_parameter(),
            private_message: default_private_message(),
            search_button_text: default_search_button_text(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            port: default_health_port(),
        }
    }
}

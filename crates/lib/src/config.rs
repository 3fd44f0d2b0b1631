//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.linebot/config.json`) and environment.
//! Credentials are usually supplied through the environment; the file holds bind/port
//! and optional API base URL overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env var holding the LINE channel secret (verifies inbound signatures).
pub const ENV_CHANNEL_SECRET: &str = "LINE_BOT_CHANNEL_SECRET";
/// Env var holding the LINE channel access token (authorizes replies).
pub const ENV_CHANNEL_TOKEN: &str = "LINE_BOT_CHANNEL_TOKEN";
/// Env var holding the Rakuten application id.
pub const ENV_RAKUTEN_APP_ID: &str = "RAKUTEN_APPID";
/// Env var holding the Rakuten affiliate id.
pub const ENV_RAKUTEN_AFFILIATE_ID: &str = "RAKUTEN_AFID";

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// LINE Messaging API settings.
    #[serde(default)]
    pub line: LineConfig,

    /// Rakuten Ichiba item search settings.
    #[serde(default)]
    pub rakuten: RakutenConfig,
}

/// Server bind and port.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Port for the webhook endpoint (default 3000).
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Bind address (default "127.0.0.1"). Use "0.0.0.0" behind a public proxy.
    #[serde(default = "default_server_bind")]
    pub bind: String,
}

fn default_server_port() -> u16 {
    3000
}

fn default_server_bind() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            bind: default_server_bind(),
        }
    }
}

/// LINE channel config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineConfig {
    /// Channel secret. Overridden by LINE_BOT_CHANNEL_SECRET env when set.
    pub channel_secret: Option<String>,
    /// Channel access token. Overridden by LINE_BOT_CHANNEL_TOKEN env when set.
    pub channel_access_token: Option<String>,
    /// Messaging API base URL (default https://api.line.me).
    pub api_base_url: Option<String>,
}

/// Rakuten Web Service config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RakutenConfig {
    /// Application id. Overridden by RAKUTEN_APPID env when set.
    pub application_id: Option<String>,
    /// Affiliate id. Overridden by RAKUTEN_AFID env when set. Optional.
    pub affiliate_id: Option<String>,
    /// API base URL (default https://app.rakuten.co.jp).
    pub api_base_url: Option<String>,
}

/// Read a trimmed, non-empty env var.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|s| {
        let t = s.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}

fn config_value(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolve the channel secret: env LINE_BOT_CHANNEL_SECRET overrides config.
pub fn resolve_channel_secret(config: &Config) -> Option<String> {
    env_value(ENV_CHANNEL_SECRET).or_else(|| config_value(&config.line.channel_secret))
}

/// Resolve the channel access token: env LINE_BOT_CHANNEL_TOKEN overrides config.
pub fn resolve_channel_access_token(config: &Config) -> Option<String> {
    env_value(ENV_CHANNEL_TOKEN).or_else(|| config_value(&config.line.channel_access_token))
}

/// Resolve the Rakuten application id: env RAKUTEN_APPID overrides config.
pub fn resolve_rakuten_application_id(config: &Config) -> Option<String> {
    env_value(ENV_RAKUTEN_APP_ID).or_else(|| config_value(&config.rakuten.application_id))
}

/// Resolve the Rakuten affiliate id: env RAKUTEN_AFID overrides config.
pub fn resolve_rakuten_affiliate_id(config: &Config) -> Option<String> {
    env_value(ENV_RAKUTEN_AFFILIATE_ID).or_else(|| config_value(&config.rakuten.affiliate_id))
}

/// The four credential values the bot runs with, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub rakuten_application_id: String,
    pub rakuten_affiliate_id: Option<String>,
}

impl Credentials {
    /// Collect credentials from env and config. Fails when a required one is missing.
    pub fn resolve(config: &Config) -> Result<Self> {
        let channel_secret = resolve_channel_secret(config).with_context(|| {
            format!("LINE channel secret not configured (set {} or line.channelSecret)", ENV_CHANNEL_SECRET)
        })?;
        let channel_access_token = resolve_channel_access_token(config).with_context(|| {
            format!(
                "LINE channel access token not configured (set {} or line.channelAccessToken)",
                ENV_CHANNEL_TOKEN
            )
        })?;
        let rakuten_application_id = resolve_rakuten_application_id(config).with_context(|| {
            format!(
                "Rakuten application id not configured (set {} or rakuten.applicationId)",
                ENV_RAKUTEN_APP_ID
            )
        })?;
        Ok(Self {
            channel_secret,
            channel_access_token,
            rakuten_application_id,
            rakuten_affiliate_id: resolve_rakuten_affiliate_id(config),
        })
    }
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("LINEBOT_CONFIG_PATH").map(PathBuf::from).unwrap_or_else(|_| {
        dirs::home_dir()
            .map(|h| h.join(".linebot").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    })
}

/// Load config from the default path (or LINEBOT_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}

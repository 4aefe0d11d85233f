//! Server configuration read from the environment.
//!
//! An optional `.env` file in the working directory is loaded first, so a
//! local setup only needs `ANTHROPIC_API_KEY` in that file. Every other value
//! has a default suitable for running on a laptop.

use common::model::datasource::SourceLocator;
use log::warn;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "sheet_chat.sqlite";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const DEFAULT_MAX_TOKENS: u32 = 1000;
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const GOOGLE_DOCS_BASE_URL: &str = "https://docs.google.com";
const GOOGLE_SEARCH_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite file holding the data source registry.
    pub database_path: PathBuf,
    pub open_browser: bool,
    pub anthropic: AnthropicConfig,
    pub google: GoogleConfig,
    /// Sheet answered from when the request names none and no data source
    /// is registered as default.
    pub default_source: Option<SourceLocator>,
}

#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub docs_base_url: String,
    pub search_api_key: Option<String>,
    pub search_engine_id: Option<String>,
    pub search_base_url: String,
}

impl GoogleConfig {
    /// Web search runs only when both the API key and the engine id are set.
    pub fn search_credentials(&self) -> Option<(&str, &str)> {
        match (&self.search_api_key, &self.search_engine_id) {
            (Some(key), Some(cx)) => Some((key.as_str(), cx.as_str())),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("SHEET_CHAT_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Invalid SHEET_CHAT_PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let open_browser = get("SHEET_CHAT_OPEN_BROWSER")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        let max_tokens = get("ANTHROPIC_MAX_TOKENS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let default_source = get("DEFAULT_SPREADSHEET_ID").map(|spreadsheet_id| {
            SourceLocator::Spreadsheet {
                spreadsheet_id,
                gid: get("DEFAULT_SHEET_GID").unwrap_or_else(|| "0".to_string()),
            }
        });

        Config {
            host: get("SHEET_CHAT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_path: PathBuf::from(
                get("SHEET_CHAT_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            ),
            open_browser,
            anthropic: AnthropicConfig {
                api_key: get("ANTHROPIC_API_KEY"),
                model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("ANTHROPIC_BASE_URL")
                    .unwrap_or_else(|| ANTHROPIC_BASE_URL.to_string()),
                max_tokens,
            },
            google: GoogleConfig {
                docs_base_url: get("GOOGLE_DOCS_BASE_URL")
                    .unwrap_or_else(|| GOOGLE_DOCS_BASE_URL.to_string()),
                search_api_key: get("GOOGLE_SEARCH_API_KEY"),
                search_engine_id: get("GOOGLE_SEARCH_ENGINE_ID"),
                search_base_url: get("GOOGLE_SEARCH_BASE_URL")
                    .unwrap_or_else(|| GOOGLE_SEARCH_BASE_URL.to_string()),
            },
            default_source,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

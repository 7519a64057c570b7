//! Handles settings for the application.
//!
//! Values come from an optional TOML file (`config/finances.toml` unless
//! `--config` says otherwise) layered with `FINANCES__SECTION__KEY`
//! environment variables. Every key has a default, so an empty configuration
//! starts a server on `127.0.0.1:3000` backed by `finances.db`.

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/finances.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite("finances.db".to_string())
    }
}

impl Database {
    /// Connection URL understood by `sea_orm::Database::connect`.
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            database: Database::default(),
        }
    }
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "finances", version, about = "Personal finance bookkeeping API")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "FINANCES_CONFIG")]
    config: Option<String>,
    /// Override log level (e.g. debug, info, warn).
    #[arg(long)]
    level: Option<String>,
    /// Override listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut settings = Self::from_sources(
            Config::builder()
                .add_source(File::with_name(config_path).required(false))
                .add_source(
                    Environment::with_prefix("FINANCES")
                        .separator("__")
                        .try_parsing(true),
                ),
        )?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }

    fn from_sources(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

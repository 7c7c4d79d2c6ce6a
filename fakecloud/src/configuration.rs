use std::{path::Path, str::FromStr};

use sqlx::sqlite::SqliteConnectOptions;

/// Database path that selects a private in-memory store.
pub const IN_MEMORY: &str = ":memory:";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY.to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:");
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true))
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Configuration lives one level up from the crate, at the workspace root
    let base_path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/.."));
    let configuration_directory = base_path.join("configuration");
    let environment = Environment::from_env()?;
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment.overlay_file()),
        ))
        .set_override_option("application.host", std::env::var("APP_HOST").ok())?
        .set_override_option("application.port", std::env::var("APP_PORT").ok())?
        .set_override_option(
            "database.path",
            std::env::var("DATABASE_PATH").ok().filter(|s| !s.is_empty()),
        )?
        .set_override_option(
            "database.max_connections",
            std::env::var("DATABASE_MAX_CONNECTIONS").ok(),
        )?
        .build()?;
    settings.try_deserialize::<Settings>()
}

/// Deployment profile, naming the overlay file read on top of `base.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    /// Read `APP_ENVIRONMENT`, falling back to `local` when unset.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        match std::env::var("APP_ENVIRONMENT") {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::Local),
        }
    }

    pub fn overlay_file(&self) -> &'static str {
        match self {
            Environment::Local => "local.yaml",
            Environment::Production => "production.yaml",
        }
    }
}

impl FromStr for Environment {
    type Err = config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(config::ConfigError::Message(format!(
                "APP_ENVIRONMENT={other:?} is not recognised, expected `local` or `production`"
            ))),
        }
    }
}

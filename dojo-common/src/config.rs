//! Configuration loading
//!
//! Values resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! Credentials have no compiled default: a missing admin password or mail
//! relay key fails startup with `Error::Config` instead of silently falling
//! back to a baked-in value.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Outbound mail relay settings (all required)
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Base URL of the HTTP mail relay, e.g. `https://relay.example.com`
    pub relay_url: String,
    pub api_key: String,
    pub from_address: String,
}

/// Seeded administrator account (all required)
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub redis_url: String,
    /// Public base URL used when building verification links
    pub public_base_url: String,
    pub session_ttl_seconds: i64,
    pub mail: MailConfig,
    pub admin: AdminConfig,
}

impl Config {
    /// Load configuration, resolving each value through the priority chain.
    pub fn load(cli_config: Option<&Path>, cli_port: Option<u16>) -> Result<Config> {
        let file = load_config_table(cli_config)?;

        let host = lookup(&file, "DOJO_HOST", &["host"])
            .unwrap_or_else(|| default_with_log("host", "0.0.0.0"));

        let port = match cli_port {
            Some(port) => port,
            None => lookup(&file, "DOJO_PORT", &["port"])
                .unwrap_or_else(|| default_with_log("port", "7750"))
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("Invalid port: {}", e)))?,
        };

        let database_path = lookup(&file, "DOJO_DB_PATH", &["database_path"])
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let redis_url = lookup(&file, "DOJO_REDIS_URL", &["redis_url"])
            .unwrap_or_else(|| default_with_log("redis_url", "redis://127.0.0.1:6379"));

        let public_base_url = lookup(&file, "DOJO_PUBLIC_URL", &["public_base_url"])
            .unwrap_or_else(|| {
                let fallback = format!("http://localhost:{}", port);
                info!("public_base_url not set, using {}", fallback);
                fallback
            });

        let session_ttl_seconds = lookup(&file, "DOJO_SESSION_TTL", &["session_ttl_seconds"])
            .unwrap_or_else(|| "86400".to_string())
            .parse::<i64>()
            .map_err(|e| Error::Config(format!("Invalid session_ttl_seconds: {}", e)))?;

        let mail = MailConfig {
            relay_url: required(&file, "DOJO_MAIL_RELAY_URL", &["mail", "relay_url"])?,
            api_key: required(&file, "DOJO_MAIL_API_KEY", &["mail", "api_key"])?,
            from_address: required(&file, "DOJO_MAIL_FROM", &["mail", "from_address"])?,
        };

        let admin = AdminConfig {
            email: required(&file, "DOJO_ADMIN_EMAIL", &["admin", "email"])?,
            password: required(&file, "DOJO_ADMIN_PASSWORD", &["admin", "password"])?,
        };

        Ok(Config {
            host,
            port,
            database_path,
            redis_url,
            public_base_url,
            session_ttl_seconds,
            mail,
            admin,
        })
    }
}

/// Read the TOML config table, if any.
///
/// Priority: explicit CLI path, then `DOJO_CONFIG` env var, then the
/// platform config directory. A CLI/env path that does not exist is an
/// error; the platform default is optional.
fn load_config_table(cli_config: Option<&Path>) -> Result<Option<toml::Value>> {
    let explicit = cli_config
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("DOJO_CONFIG").ok().map(PathBuf::from));

    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None => {
            let default = dirs::config_dir().map(|d| d.join("dojo").join("config.toml"));
            match default {
                Some(path) if path.exists() => path,
                _ => return Ok(None),
            }
        }
    };

    let content = std::fs::read_to_string(&path)?;
    let table = toml::from_str::<toml::Value>(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    info!("Loaded config file: {}", path.display());
    Ok(Some(table))
}

/// Resolve a value: environment variable first, then the TOML key path.
fn lookup(file: &Option<toml::Value>, env_var: &str, toml_path: &[&str]) -> Option<String> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return Some(value);
        }
    }

    let mut current = file.as_ref()?;
    for key in toml_path {
        current = current.get(key)?;
    }
    match current {
        toml::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Resolve a required value; a missing credential fails startup loudly.
fn required(file: &Option<toml::Value>, env_var: &str, toml_path: &[&str]) -> Result<String> {
    lookup(file, env_var, toml_path).ok_or_else(|| {
        Error::Config(format!(
            "Missing required setting '{}' (set env {} or the config key)",
            toml_path.join("."),
            env_var
        ))
    })
}

fn default_with_log(name: &str, value: &str) -> String {
    info!("{} not set, using default: {}", name, value);
    value.to_string()
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("dojo").join("dojo.db"))
        .unwrap_or_else(|| PathBuf::from("./dojo.db"))
}

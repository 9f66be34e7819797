use crate::auth::session::MIN_SECRET_LEN;
use anyhow::{bail, Context};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fs};

#[derive(Deserialize, Debug, PartialEq)]
pub struct SSLConfig {
    pub private_key_file: PathBuf,
    pub certificate_chain_file: PathBuf,
}

/// OTLP trace export. `headers` are sent as gRPC metadata, e.g. an API key.
#[derive(Deserialize, Debug, PartialEq)]
pub struct TelemetryConfig {
    pub endpoint: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    pub database_url: String,
    /// Base64 encoded secret used to sign session cookies.
    pub session_secret: Option<String>,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default)]
    pub secure_cookies: bool,
    pub ssl: Option<SSLConfig>,
    pub telemetry: Option<TelemetryConfig>,
}

fn default_bind_address() -> String {
    "0.0.0.0:8000".to_owned()
}

fn default_max_pool_size() -> u32 {
    10
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).context("Unable to parse config")
    }
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        config.parse()
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        let database_url = read_env("DATABASE_URL")?;
        let session_secret = env::var("SESSION_SECRET").ok();
        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| default_bind_address());
        let max_pool_size = match env::var("MAX_POOL_SIZE") {
            Ok(size) => size
                .parse()
                .context("Unable to parse MAX_POOL_SIZE value")?,
            Err(_) => default_max_pool_size(),
        };
        let secure_cookies = match env::var("SECURE_COOKIES") {
            Ok(secure) => secure
                .parse()
                .context("Unable to parse SECURE_COOKIES value")?,
            Err(_) => false,
        };
        let telemetry = env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .map(|endpoint| TelemetryConfig {
                endpoint,
                headers: HashMap::new(),
            });

        let config = Config {
            database_url,
            session_secret,
            bind_address,
            max_pool_size,
            secure_cookies,
            ssl: None,
            telemetry,
        };
        Ok(config)
    }

    /// Decoded session secret, if one is configured. Secrets shorter than [MIN_SECRET_LEN] bytes
    /// are rejected.
    pub fn session_secret(&self) -> Result<Option<Vec<u8>>, anyhow::Error> {
        let Some(secret) = self.session_secret.as_deref() else {
            return Ok(None);
        };
        let secret = STANDARD
            .decode(secret.trim())
            .context("Unable to decode session_secret as base64")?;
        if secret.len() < MIN_SECRET_LEN {
            bail!(
                "session_secret must decode to at least {} bytes, got {}",
                MIN_SECRET_LEN,
                secret.len()
            );
        }
        Ok(Some(secret))
    }
}

fn read_env(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).with_context(|| format!("Unable to read env var: {}", key))
}

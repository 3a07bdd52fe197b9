use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::airtable::{DEFAULT_API_URL, DEFAULT_BASE_ID};
use crate::records::Table;
use crate::sources::CachePolicy;

/// Local tables change rarely; cache them for 23 hours.
const LOCAL_CACHE_TTL_SECS: u64 = 82_800;
const REMOTE_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Local,
    Remote,
}

impl FromStr for DataSourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "csv" => Ok(DataSourceKind::Local),
            "remote" | "airtable" => Ok(DataSourceKind::Remote),
            other => bail!("DATA_SOURCE must be 'local' or 'remote', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Everything has a default; only malformed values are startup errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_source: DataSourceKind,
    pub data_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Optional: without it the contact form (and remote tables) are disabled.
    pub airtable_api_key: Option<String>,
    pub airtable_base_id: String,
    pub airtable_api_url: String,
    pub http_timeout: Duration,
    pub cache_policy: CachePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_source = match var("DATA_SOURCE") {
            Some(v) => v.parse()?,
            None => DataSourceKind::Local,
        };

        let default_ttl_secs = match data_source {
            DataSourceKind::Local => LOCAL_CACHE_TTL_SECS,
            DataSourceKind::Remote => REMOTE_CACHE_TTL_SECS,
        };
        let default_ttl = match var("CACHE_TTL_SECS") {
            Some(v) => parse_ttl("CACHE_TTL_SECS", &v)?,
            None => Some(Duration::from_secs(default_ttl_secs)),
        };

        let mut cache_policy = CachePolicy::uniform(default_ttl);
        for table in Table::ALL {
            let key = format!("CACHE_TTL_SECS_{}", table.name().to_ascii_uppercase());
            if let Some(v) = var(&key) {
                cache_policy = cache_policy.with_override(table, parse_ttl(&key, &v)?);
            }
        }

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            data_source,
            data_dir: var("DATA_DIR").unwrap_or_else(|| "Data".to_string()).into(),
            images_dir: var("IMAGES_DIR")
                .unwrap_or_else(|| "Images".to_string())
                .into(),
            airtable_api_key: var("AIRTABLE_API_KEY"),
            airtable_base_id: var("AIRTABLE_BASE_ID")
                .unwrap_or_else(|| DEFAULT_BASE_ID.to_string()),
            airtable_api_url: var("AIRTABLE_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            http_timeout: Duration::from_secs(
                var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse::<u64>()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            cache_policy,
        })
    }
}

/// `0` means "never expires".
fn parse_ttl(key: &str, value: &str) -> Result<Option<Duration>> {
    let secs = value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number of seconds"))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

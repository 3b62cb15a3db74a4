use anyhow::{bail, Context};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use drt_remote::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => bail!("unknown log format '{}' (expected text or json)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub remote_url: String,
    pub request_timeout: Duration,
    pub sync_concurrency: usize,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let db_path = lookup("DRT_DB_PATH").unwrap_or_else(|| default_db_path(lookup("HOME")));
        let remote_url = lookup("DRT_REMOTE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_ms: u64 = parse_var(&lookup, "DRT_REQUEST_TIMEOUT_MS", 30_000)?;
        let sync_concurrency: usize = parse_var(&lookup, "DRT_SYNC_CONCURRENCY", 1)?;
        if sync_concurrency == 0 {
            bail!("DRT_SYNC_CONCURRENCY must be at least 1");
        }
        let log_format = parse_var(&lookup, "DRT_LOG_FORMAT", LogFormat::Text)?;

        Ok(Self {
            db_path,
            remote_url,
            request_timeout: Duration::from_millis(timeout_ms),
            sync_concurrency,
            log_format,
        })
    }
}

fn default_db_path(home: Option<String>) -> String {
    match home {
        Some(home) if !home.is_empty() => Path::new(&home)
            .join(".drt")
            .join("drt.db")
            .to_string_lossy()
            .into_owned(),
        _ => "./drt.db".to_string(),
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

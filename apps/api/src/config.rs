use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_KRW_USD_RATE: f64 = 0.00075;
const DEFAULT_RATE_TIMEOUT_SECS: u64 = 5;

/// Where the treatment catalog is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogBackend {
    Postgres { database_url: String },
    JsonFile { path: PathBuf },
}

/// Where the KRW→USD rate comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum RateBackend {
    Fixed { usd_per_krw: f64 },
    Http { url: String, timeout_secs: u64 },
}

/// Application configuration loaded from environment variables.
/// Startup fails if neither catalog backend is configured.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: CatalogBackend,
    pub rates: RateBackend,
    /// Overrides the embedded reference enumerations when set.
    pub reference_data_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let catalog = match (lookup("DATABASE_URL"), lookup("CATALOG_PATH")) {
            (Some(database_url), _) => CatalogBackend::Postgres { database_url },
            (None, Some(path)) => CatalogBackend::JsonFile { path: path.into() },
            (None, None) => bail!(
                "Required environment variable 'DATABASE_URL' or 'CATALOG_PATH' is not set"
            ),
        };

        let rates = match lookup("EXCHANGE_RATE_URL") {
            Some(url) => RateBackend::Http {
                url,
                timeout_secs: parse_or(
                    &lookup,
                    "EXCHANGE_RATE_TIMEOUT_SECS",
                    DEFAULT_RATE_TIMEOUT_SECS,
                )?,
            },
            None => {
                let usd_per_krw = parse_or(&lookup, "KRW_USD_RATE", DEFAULT_KRW_USD_RATE)?;
                if !(usd_per_krw.is_finite() && usd_per_krw > 0.0) {
                    bail!("KRW_USD_RATE must be a positive number");
                }
                RateBackend::Fixed { usd_per_krw }
            }
        };

        Ok(Config {
            catalog,
            rates,
            reference_data_path: lookup("REFERENCE_DATA_PATH").map(PathBuf::from),
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

use std::str::FromStr;
use std::time::Duration;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
const DEFAULT_PAYMENT_WINDOW_MINUTES: i64 = 30;

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// Origin allowed by CORS, with credentials.
    pub frontend_url: String,

    pub cache_ttl: Duration,
    /// How long a booking may stay in `pending_payment` before it expires.
    pub payment_window: chrono::Duration,

    /// Marks the session cookie `Secure`. Enable behind HTTPS.
    pub session_secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let cache_ttl_seconds: u64 =
            parse_or_default(&lookup, "CACHE_TTL_SECONDS", DEFAULT_CACHE_TTL_SECONDS)?;
        let payment_window_minutes: i64 = parse_or_default(
            &lookup,
            "BOOKING_PAYMENT_WINDOW_MINUTES",
            DEFAULT_PAYMENT_WINDOW_MINUTES,
        )?;
        if payment_window_minutes <= 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "BOOKING_PAYMENT_WINDOW_MINUTES".to_string(),
                value: payment_window_minutes.to_string(),
            }
            .into());
        }

        Ok(Self {
            database_url,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            frontend_url: lookup("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            cache_ttl: Duration::from_secs(cache_ttl_seconds),
            payment_window: chrono::Duration::minutes(payment_window_minutes),
            session_secure: parse_or_default(&lookup, "SESSION_SECURE", false)?,
        })
    }
}

fn parse_or_default<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

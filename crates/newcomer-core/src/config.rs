use std::num::NonZeroUsize;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://canada-newcomers.vercel.app/api";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so the lookup only fails on malformed values.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_non_zero = |var: &str, default: &str| -> Result<NonZeroUsize, ConfigError> {
        or_default(var, default)
            .parse::<NonZeroUsize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("NEWCOMER_ENV", "development"))?;

    let api_base_url =
        normalize_base_url(&or_default("NEWCOMER_API_BASE_URL", DEFAULT_API_BASE_URL));
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(invalid(
            "NEWCOMER_API_BASE_URL",
            format!("'{api_base_url}' is not an http(s) URL"),
        ));
    }

    let log_level = or_default("NEWCOMER_LOG_LEVEL", "info");
    let page_size = parse_non_zero("NEWCOMER_PAGE_SIZE", "20")?;
    let request_timeout_secs = parse_u64("NEWCOMER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NEWCOMER_USER_AGENT", "newcomer/0.1 (services-directory)");
    let max_retries = parse_u32("NEWCOMER_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("NEWCOMER_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        page_size,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWCOMER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

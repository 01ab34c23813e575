use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_token = require("PODCAT_API_TOKEN")?;

    let api_base_url = or_default("PODCAT_API_BASE_URL", "https://api.printify.com");
    let api_version = or_default("PODCAT_API_VERSION", "v1");
    let log_level = or_default("PODCAT_LOG_LEVEL", "info");
    let user_agent = or_default("PODCAT_USER_AGENT", "podcat/0.1 (catalog-aggregation)");

    let request_timeout_secs = parse_u64("PODCAT_REQUEST_TIMEOUT_SECS", "30")?;
    let batch_size = parse_usize("PODCAT_BATCH_SIZE", "9")?;
    let inter_batch_delay_ms = parse_u64("PODCAT_INTER_BATCH_DELAY_MS", "1000")?;
    let sequential_delay_ms = parse_u64("PODCAT_SEQUENTIAL_DELAY_MS", "111")?;
    let catalog_limit = parse_usize("PODCAT_CATALOG_LIMIT", "0")?;

    if batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PODCAT_BATCH_SIZE".to_string(),
            reason: "batch size must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        api_token,
        api_base_url,
        api_version,
        log_level,
        request_timeout_secs,
        user_agent,
        batch_size,
        inter_batch_delay_ms,
        sequential_delay_ms,
        catalog_limit,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

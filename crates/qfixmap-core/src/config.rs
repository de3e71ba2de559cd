use crate::app_config::{AppConfig, Environment};
use crate::gender::Gender;
use crate::ConfigError;

/// Default booking URL of the repair portal; overridable per deployment.
pub const DEFAULT_BASE_URL: &str = "https://kappahl.dev.qfixr.me/sv/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("QFIXMAP_ENV", "development"));
    let bind_addr = parse_addr("QFIXMAP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("QFIXMAP_LOG_LEVEL", "info");
    let base_url = or_default("QFIXMAP_BASE_URL", DEFAULT_BASE_URL);

    // Empty string disables the fallback entirely.
    let default_gender = match or_default("QFIXMAP_DEFAULT_GENDER", "women").trim() {
        "" => None,
        raw => Some(
            Gender::from_canonical(raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                var: "QFIXMAP_DEFAULT_GENDER".to_string(),
                reason: format!("unknown gender '{raw}'; expected men, women, children, or unisex"),
            })?,
        ),
    };

    let gender_vocab_path = lookup("QFIXMAP_GENDER_VOCAB_PATH").ok().map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        base_url,
        default_gender,
        gender_vocab_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_STORE_DOMAIN: &str = "oppozite-wears.myshopify.com";
const DEFAULT_API_VERSION: &str = "2025-07";
const DEFAULT_SITE_URL: &str = "https://www.oppozitewears.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a typed env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Use it from tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a typed env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Several settings accept more than one variable name so the same `.env` file
/// used by the storefront build (`VITE_*`) works here unchanged; the first
/// non-empty match wins.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let first_of = |vars: &[&str]| -> Option<String> {
        vars.iter()
            .filter_map(|&var| lookup(var).ok())
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    };

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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("OPPOZITE_ENV", "development"));
    let bind_addr = parse_addr("OPPOZITE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("OPPOZITE_LOG_LEVEL", "info");

    let shopify_store_domain = first_of(&["VITE_SHOPIFY_STORE_DOMAIN", "SHOPIFY_STORE_DOMAIN"])
        .unwrap_or_else(|| DEFAULT_STORE_DOMAIN.to_string());
    let shopify_storefront_token = first_of(&[
        "VITE_SHOPIFY_STOREFRONT_TOKEN",
        "SHOPIFY_STOREFRONT_ACCESS_TOKEN",
    ])
    .unwrap_or_default();
    let shopify_api_version = first_of(&["VITE_SHOPIFY_API_VERSION", "SHOPIFY_API_VERSION"])
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
    let site_url = first_of(&["VITE_SITE_URL", "OPPOZITE_SITE_URL"])
        .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let fetch_timeout_secs = parse_u64("OPPOZITE_FETCH_TIMEOUT_SECS", "5")?;
    if fetch_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "OPPOZITE_FETCH_TIMEOUT_SECS".to_string(),
            reason: "must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("OPPOZITE_USER_AGENT", "oppozite-seo/0.1 (social-preview)");
    // Production pages ship without the debug comment unless asked for.
    let trace_default = if env == Environment::Production {
        "false"
    } else {
        "true"
    };
    let seo_trace_enabled = parse_bool(
        "OPPOZITE_SEO_TRACE",
        &or_default("OPPOZITE_SEO_TRACE", trace_default),
    )?;
    let static_dir = first_of(&["OPPOZITE_STATIC_DIR"]).map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shopify_store_domain,
        shopify_storefront_token,
        shopify_api_version,
        site_url,
        fetch_timeout_secs,
        user_agent,
        seo_trace_enabled,
        static_dir,
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

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

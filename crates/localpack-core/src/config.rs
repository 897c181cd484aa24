use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default User-Agent mirrors a current desktop Chrome build; plainly
/// synthetic agents get degraded result pages from the upstream source.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36";

const DEFAULT_SEARCH_BASE_URL: &str = "https://www.google.com/search";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable carries an unparseable value.
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
/// Returns `ConfigError` if a variable carries an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let search_base_url = or_default("LOCALPACK_SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL);
    let request_timeout_secs = parse_u64("LOCALPACK_REQUEST_TIMEOUT_SECS", "20")?;
    let user_agent = or_default("LOCALPACK_USER_AGENT", DEFAULT_USER_AGENT);
    let default_region = or_default("LOCALPACK_DEFAULT_REGION", "US");
    let max_pages = parse_usize("LOCALPACK_MAX_PAGES", "100")?;
    let log_level = or_default("LOCALPACK_LOG_LEVEL", "info");

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOCALPACK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    Ok(AppConfig {
        search_base_url,
        request_timeout_secs,
        user_agent,
        default_region,
        max_pages,
        log_level,
    })
}

//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `CURRICULA_DB_PATH` is set, loads from environment variables and
//!    reports any invalid value
//! 2. Otherwise loads from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CURRICULA_DB_PATH`: Database file path (required)
//! - `CURRICULA_DB_POOL_SIZE`: Connection pool size (required)
//! - `CURRICULA_LOG_LEVEL`: Default log filter, e.g. `info` or `curricula_core=debug`
//! - `CURRICULA_LOG_FORMAT`: `pretty` or `json`
//! - `CURRICULA_EXCLUDED_WEEKDAYS`: Comma list of weekday numbers, 0 = Sunday
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./curricula.json` or `./curricula.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use curricula_domain::constants::DAYS_PER_WEEK;
use curricula_domain::{
    Config, CurriculaError, DatabaseConfig, LogFormat, LoggingConfig, Result, SchedulingConfig,
};

/// Variable whose presence selects environment configuration.
const DB_PATH_VAR: &str = "CURRICULA_DB_PATH";

/// Load configuration with automatic fallback strategy
///
/// When `CURRICULA_DB_PATH` is set the environment is authoritative and any
/// invalid variable is an error. Otherwise a config file is probed.
///
/// # Errors
/// Returns `CurriculaError::Config` if the environment is incomplete or
/// invalid, no file is found, or the file is malformed.
pub fn load() -> Result<Config> {
    if std::env::var_os(DB_PATH_VAR).is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    tracing::debug!("{DB_PATH_VAR} unset, trying config file");
    load_from_file(None)
}

/// Like [`load`], but falls back to defaults when neither
/// `CURRICULA_DB_PATH` nor a config file is present.
///
/// # Errors
/// Returns `CurriculaError::Config` for invalid environment values or a
/// malformed config file.
pub fn load_or_default() -> Result<Config> {
    if std::env::var_os(DB_PATH_VAR).is_none() && probe_config_paths().is_none() {
        tracing::debug!("No configuration source found, using defaults");
        return Ok(Config::default());
    }
    load()
}

/// Load configuration from environment variables
///
/// The database variables are required; logging and scheduling variables
/// fall back to their defaults when unset.
///
/// # Errors
/// Returns `CurriculaError::Config` if required variables are missing
/// or any variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var(DB_PATH_VAR)?;
    let db_pool_size = env_var("CURRICULA_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| CurriculaError::Config(format!("Invalid pool size: {e}")))
    })?;

    let mut logging = LoggingConfig::default();
    if let Ok(level) = std::env::var("CURRICULA_LOG_LEVEL") {
        logging.level = level;
    }
    if let Ok(format) = std::env::var("CURRICULA_LOG_FORMAT") {
        logging.format = format.parse::<LogFormat>().map_err(CurriculaError::Config)?;
    }

    let mut scheduling = SchedulingConfig::default();
    if let Ok(list) = std::env::var("CURRICULA_EXCLUDED_WEEKDAYS") {
        scheduling.default_excluded_weekdays = parse_weekday_list(&list)?;
    }

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        logging,
        scheduling,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CurriculaError::Config` if the file is missing, no file is found
/// by probing, or the contents are invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CurriculaError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CurriculaError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CurriculaError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: Config = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CurriculaError::Config(format!("Invalid TOML format: {e}")))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| CurriculaError::Config(format!("Invalid JSON format: {e}")))?,
        _ => {
            return Err(CurriculaError::Config(format!("Unsupported config format: {extension}")))
        }
    };

    if let Some(day) =
        config.scheduling.default_excluded_weekdays.iter().find(|day| **day >= DAYS_PER_WEEK)
    {
        return Err(CurriculaError::Config(format!("Invalid excluded weekday: {day}")));
    }
    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parents (up to 2 levels)
/// and the executable's directory. Returns the first file that exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "curricula.json", "curricula.toml"];
    const PARENTS: [&str; 4] = ["../config.json", "../config.toml", "../../config.json", "../../config.toml"];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().chain(PARENTS.iter()).map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CurriculaError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse a comma-separated weekday list such as `0,6`.
fn parse_weekday_list(list: &str) -> Result<Vec<u8>> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<u8>() {
            Ok(day) if day < DAYS_PER_WEEK => Ok(day),
            _ => Err(CurriculaError::Config(format!("Invalid excluded weekday: {part}"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: [&str; 5] = [
        "CURRICULA_DB_PATH",
        "CURRICULA_DB_POOL_SIZE",
        "CURRICULA_LOG_LEVEL",
        "CURRICULA_LOG_FORMAT",
        "CURRICULA_EXCLUDED_WEEKDAYS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_required_vars_only() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CURRICULA_DB_PATH", "/tmp/curricula.db");
        std::env::set_var("CURRICULA_DB_POOL_SIZE", "5");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.database.path, "/tmp/curricula.db");
        assert_eq!(config.database.pool_size, 5);
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.scheduling.default_excluded_weekdays, vec![0]);

        clear_env();
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CURRICULA_DB_PATH", "/tmp/curricula.db");
        std::env::set_var("CURRICULA_DB_POOL_SIZE", "2");
        std::env::set_var("CURRICULA_LOG_LEVEL", "curricula_core=debug");
        std::env::set_var("CURRICULA_LOG_FORMAT", "JSON");
        std::env::set_var("CURRICULA_EXCLUDED_WEEKDAYS", "0, 6");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.logging.level, "curricula_core=debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.scheduling.default_excluded_weekdays, vec![0, 6]);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CurriculaError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CURRICULA_DB_PATH", "/tmp/curricula.db");
        std::env::set_var("CURRICULA_DB_POOL_SIZE", "not-a-number");
        assert!(matches!(load_from_env(), Err(CurriculaError::Config(_))));

        std::env::set_var("CURRICULA_DB_POOL_SIZE", "4");
        std::env::set_var("CURRICULA_LOG_FORMAT", "xml");
        assert!(matches!(load_from_env(), Err(CurriculaError::Config(_))));

        std::env::remove_var("CURRICULA_LOG_FORMAT");
        std::env::set_var("CURRICULA_EXCLUDED_WEEKDAYS", "0,7");
        assert!(matches!(load_from_env(), Err(CurriculaError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_reports_invalid_env_instead_of_falling_back() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CURRICULA_DB_PATH", "/srv/prod.db");
        std::env::set_var("CURRICULA_DB_POOL_SIZE", "4");
        std::env::set_var("CURRICULA_EXCLUDED_WEEKDAYS", "9");
        assert!(matches!(load(), Err(CurriculaError::Config(_))));
        assert!(matches!(load_or_default(), Err(CurriculaError::Config(_))));

        std::env::remove_var("CURRICULA_EXCLUDED_WEEKDAYS");
        std::env::set_var("CURRICULA_LOG_FORMAT", "xml");
        assert!(matches!(load_or_default(), Err(CurriculaError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_or_default_uses_env_when_db_path_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CURRICULA_DB_PATH", "/srv/prod.db");
        std::env::set_var("CURRICULA_DB_POOL_SIZE", "3");
        let config = load_or_default().expect("config from env");
        assert_eq!(config.database.path, "/srv/prod.db");
        assert_eq!(config.database.pool_size, 3);

        clear_env();
    }

    #[test]
    fn test_load_or_default_without_any_source() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        if probe_config_paths().is_none() {
            assert_eq!(load_or_default().expect("defaults"), Config::default());
        }
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{
                "database": { "path": "test.db", "pool_size": 4 },
                "logging": { "level": "debug", "format": "json" }
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config from JSON");
        assert_eq!(config.database.path, "test.db");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.scheduling, SchedulingConfig::default());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            r#"
[database]
path = "test.db"
pool_size = 6

[scheduling]
default_excluded_weekdays = [0, 6]
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config from TOML");
        assert_eq!(config.database.pool_size, 6);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.scheduling.default_excluded_weekdays, vec![0, 6]);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/config.json"))).unwrap_err();
        assert!(matches!(err, CurriculaError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = write_temp(r#"{ "this is": "not valid json" "#, "json");
        assert!(load_from_file(Some(path.clone())).is_err(), "Should fail with invalid JSON");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_rejects_bad_weekday() {
        let content = r#"
[database]
path = "test.db"
pool_size = 1

[scheduling]
default_excluded_weekdays = [9]
"#;
        let result = parse_config(content, &PathBuf::from("test.toml"));
        assert!(matches!(result, Err(CurriculaError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}

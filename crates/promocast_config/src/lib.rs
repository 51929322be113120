//! Configuration for promocast.
//!
//! Values are layered: `config/default`, then `config/{RUN_ENV}`, then
//! environment variables prefixed with `PROMOCAST_` (nested keys separated by
//! `__`, e.g. `PROMOCAST_MESSAGING__CHANNEL_ID`). Missing files are fine; every
//! section has defaults.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PROMOCAST";

/// Loads the configuration from the `config/` directory of the working
/// directory (or `PROMOCAST_CONFIG_DIR` when set).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("PROMOCAST_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir)
}

/// Loads the configuration from an explicit directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    debug!(
        "Loading config from {} (run env: {})",
        config_dir.display(),
        run_env
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file named by `DOTENV_OVERRIDE` wins; otherwise `.env` is used. Loading
/// happens at most once per process and a missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

use std::path::PathBuf;

use anyhow::Context;
use eventpro_config::Config;

pub mod commands;
mod database;

/// Environment variable holding a colon separated list of config files.
pub const CONFIG_ENV: &str = "EVENTPRO_CONFIG";

/// Loads the config files listed in `EVENTPRO_CONFIG`, falling back to the
/// bundled default config.
pub fn load_config() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect::<Vec<_>>(),
        None => vec![PathBuf::from(eventpro_config::DEFAULT_CONFIG_PATH)],
    };
    eventpro_config::load(&paths).context("Failed to load config")
}

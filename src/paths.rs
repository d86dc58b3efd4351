//! Platform locations for the config file, score store, log and sprite.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.toml";
pub const STORE_FILE: &str = "store.json";
pub const LOG_FILE: &str = "dino-sura.log";
pub const SPRITE_FILE: &str = "runner.txt";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "dino-sura").ok_or(Error::NoProjectDirs)
}

/// Config directory, created if needed.
pub fn config_dir() -> Result<PathBuf> {
    let dir = project_dirs()?.config_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Data directory, created if needed.
pub fn data_dir() -> Result<PathBuf> {
    let dir = project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

pub fn store_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(STORE_FILE))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE))
}

/// Default sprite location: `<data dir>/assets/runner.txt`.
pub fn default_sprite_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("assets").join(SPRITE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_land_in_their_dirs() {
        // ProjectDirs may be unavailable on a bare CI box; only check when it is.
        if let (Ok(config), Ok(store)) = (config_path(), store_path()) {
            assert!(config.ends_with(CONFIG_FILE));
            assert!(store.ends_with(STORE_FILE));
        }
    }

    #[test]
    fn test_sprite_lives_under_assets() {
        if let Ok(path) = default_sprite_path() {
            assert!(path.ends_with("assets/runner.txt"));
        }
    }
}

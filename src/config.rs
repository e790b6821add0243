// Runtime configuration from environment variables
//
// PROSPECT_DATA_DIR    root of the artifact directory (default ./data)
// PROSPECT_LISTEN_ADDR server bind address (default 0.0.0.0:3000)

use std::env;
use std::path::PathBuf;

use crate::error::{LoadError, LoadResult};

pub const DATA_DIR_ENV: &str = "PROSPECT_DATA_DIR";
pub const LISTEN_ADDR_ENV: &str = "PROSPECT_LISTEN_ADDR";

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub listen_addr: String,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let data_dir = env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let listen_addr =
            env::var(LISTEN_ADDR_ENV).unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());

        Config {
            data_dir,
            listen_addr,
        }
    }

    /// Verify the data directory exists before anything tries to read it.
    pub fn check_data_dir(&self) -> LoadResult<()> {
        if !self.data_dir.is_dir() {
            return Err(LoadError::DataDirMissing {
                path: self.data_dir.clone(),
            });
        }
        Ok(())
    }
}

//! Fixed file locations for one run.
//!
//! `hmac.ini` and `log.txt` sit next to the executable unless another base
//! directory is supplied. The struct is built once in `main` and handed down.

use crate::error::Error;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "hmac.ini";
pub const LOG_FILE_NAME: &str = "log.txt";

#[derive(Clone, Debug)]
pub struct Settings {
    base_dir: PathBuf,
    config_path: PathBuf,
    log_path: PathBuf,
}

impl Settings {
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            config_path: base_dir.join(CONFIG_FILE_NAME),
            log_path: base_dir.join(LOG_FILE_NAME),
            base_dir,
        }
    }

    /// Resolve the base directory from the running executable.
    pub fn beside_executable() -> Result<Self, Error> {
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .ok_or(Error::InvalidArgs("executable path has no parent directory"))?;
        Ok(Self::with_base_dir(dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

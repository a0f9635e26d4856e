//! Bootstrap configuration
//!
//! Values resolve in this order:
//! 1. Command-line flag
//! 2. Environment variable (`SQLITE_SETUP_DATABASE`, `SQLITE_SETUP_OUTPUT_DIR`)
//! 3. TOML file passed with `--config`
//! 4. Compiled default
//!
//! Flags and environment variables are folded together by `clap`; this module
//! handles the file and the defaults.

use crate::error::{Error, Result};
use crate::metadata::AppInfo;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "myapp.db";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database file, relative to `output_dir` unless absolute
    pub database: PathBuf,
    /// Directory that receives the database and the connection artifacts
    pub output_dir: PathBuf,
    pub metadata: AppInfo,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            output_dir: PathBuf::from("."),
            metadata: AppInfo::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Apply values that outrank the file (flags and environment).
    pub fn with_overrides(mut self, database: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }

    /// Output directory as an absolute path.
    pub fn output_dir(&self) -> Result<PathBuf> {
        if self.output_dir.is_absolute() {
            Ok(self.output_dir.clone())
        } else {
            // components() drops the `.` of the default
            let joined = std::env::current_dir()?.join(&self.output_dir);
            Ok(joined.components().collect())
        }
    }

    /// Database file as an absolute path.
    pub fn db_path(&self) -> Result<PathBuf> {
        if self.database.is_absolute() {
            Ok(self.database.clone())
        } else {
            Ok(self.output_dir()?.join(&self.database))
        }
    }

    /// File name shown in connection hints.
    pub fn db_name(&self) -> String {
        self.database
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.database.display().to_string())
    }
}

//! Default on-disk state under `~/.config/pvreplace/`
//!
//! Missing assets are downloaded once and cached. Paths are resolved
//! explicitly at start-up and handed down, nothing is global.

use log::info;
use std::path::{Path, PathBuf};

use crate::error::{PvError, Result};
use crate::remote::AssetFetcher;

pub const CONFIG_FILE: &str = "config.yaml";
pub const IGNORE_LINES_FILE: &str = "ignore-lines.txt";
pub const OUTPUT_DIR: &str = "modified_request";

/// Locations of the default assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPaths {
    pub root: PathBuf,
}

impl DefaultPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.config/pvreplace`
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(PvError::NoHomeDir)?;
        Ok(Self::new(home.join(".config").join("pvreplace")))
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn ignore_lines_file(&self) -> PathBuf {
        self.root.join(IGNORE_LINES_FILE)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }
}

/// Return `path`, downloading asset `name` into it first if it does not exist
pub async fn ensure_asset(fetcher: &AssetFetcher, path: &Path, name: &str) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    let body = fetcher.fetch(name).await?;
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(path, &body).await?;

    info!("Downloaded {} to: {}", name, path.display());
    Ok(path.to_path_buf())
}

pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| PvError::Create {
        what: "output directory",
        path: dir.display().to_string(),
        source,
    })
}

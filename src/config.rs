//! Runtime configuration utilities for case-pulse.

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Folder holding dated report CSVs.
    pub data_dir: PathBuf,
    /// Explicit report file; bypasses the newest-file lookup in `data_dir`.
    pub data_file: Option<PathBuf>,
    /// Region shown first by the dashboard.
    pub default_region: String,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let data_file = env::var("DATA_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let default_region =
            env::var("DEFAULT_REGION").unwrap_or_else(|_| "Massachusetts".to_string());

        Ok(Self {
            data_dir,
            data_file,
            default_region,
        })
    }

    /// Settings pointing at a single report file, used by tests and tooling.
    pub fn for_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self {
            data_dir: path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            data_file: Some(path.to_path_buf()),
            default_region: "Massachusetts".to_string(),
        }
    }
}

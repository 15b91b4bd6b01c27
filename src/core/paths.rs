use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::platform::program_dir;

pub const URL_FILE_NAME: &str = "urls.txt";

/// Files and directories that live beside the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub base_dir: PathBuf,
    pub url_file: PathBuf,
    pub video_dir: PathBuf,
    pub audio_dir: PathBuf,
    /// Bundled-binary directory for a locally installed ffmpeg
    pub bin_dir: PathBuf,
}

impl AppPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            url_file: base_dir.join(URL_FILE_NAME),
            video_dir: base_dir.join("video"),
            audio_dir: base_dir.join("audio"),
            bin_dir: base_dir.join("bin"),
            base_dir,
        }
    }

    /// Resolve the layout from an optional override, else the program's own directory
    pub fn resolve(base_override: Option<&Path>, url_override: Option<&Path>) -> Result<Self> {
        let base = match base_override {
            Some(dir) => dir.to_path_buf(),
            None => program_dir().context("Could not determine the program directory")?,
        };

        let mut paths = Self::new(base);
        if let Some(url_file) = url_override {
            paths.url_file = url_file.to_path_buf();
        }
        Ok(paths)
    }

    /// Output directory for one folder group; the root group writes straight into `root`.
    ///
    /// Only plain components of `folder` are joined, so the result stays under `root`.
    pub fn folder_dir(root: &Path, folder: &str) -> PathBuf {
        let mut dir = root.to_path_buf();
        for component in Path::new(folder).components() {
            if let Component::Normal(part) = component {
                dir.push(part);
            }
        }
        dir
    }

    /// Create `folder_dir` if needed and return it
    pub fn ensure_folder_dir(root: &Path, folder: &str) -> Result<PathBuf> {
        let dir = Self::folder_dir(root, folder);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
        Ok(dir)
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_VIDEO_FORMAT: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";
pub const DEFAULT_AUDIO_SELECTOR: &str = "bestaudio/best";

/// User-tunable download knobs, read from `settings.json` in the config dir
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// yt-dlp format selector for video downloads
    pub video_format: String,
    /// Target codec for audio extraction
    pub audio_format: String,
    /// Audio bitrate in kbps
    pub audio_quality: String,
    pub retries: u32,
    /// YouTube player clients handed to yt-dlp's extractor args
    pub player_clients: Vec<String>,
    /// Maximum title length in output file names
    pub title_max_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            video_format: DEFAULT_VIDEO_FORMAT.to_string(),
            audio_format: "mp3".to_string(),
            audio_quality: "192".to_string(),
            retries: 3,
            player_clients: vec!["android".to_string(), "web".to_string()],
            title_max_len: 80,
        }
    }
}

impl Settings {
    /// Load settings from the user config directory, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Settings::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let data = fs::read(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        // Empty or corrupted files fall back to defaults
        if data.is_empty() {
            return Ok(Settings::default());
        }

        Ok(serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable settings file {:?}: {}", path, e);
            Settings::default()
        }))
    }

    pub fn get_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mediaharvester").join("settings.json"))
    }

    /// Value for yt-dlp's `--extractor-args`
    pub fn extractor_args(&self) -> String {
        format!("youtube:player_client={}", self.player_clients.join(","))
    }
}

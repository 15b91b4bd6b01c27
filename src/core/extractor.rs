// MediaExtractor - the boundary to yt-dlp
//
// Metadata lookups and downloads are delegated wholesale; this module only
// builds argument lists, streams progress and reports failures as text.

use serde::Deserialize;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;

use crate::core::settings::{Settings, DEFAULT_AUDIO_SELECTOR};
use crate::core::yt_dlp_manager::ExtractorCommand;
use crate::ui::progress;

/// A failed probe or download, carrying yt-dlp's own message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("{0}")]
    Failed(String),

    #[error("could not run yt-dlp: {0}")]
    Launch(String),

    #[error("unexpected yt-dlp output: {0}")]
    Parse(String),
}

impl ExtractError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// The subset of yt-dlp's info JSON we read
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    Video,
    Audio,
}

impl DownloadMode {
    pub fn noun(&self) -> &'static str {
        match self {
            DownloadMode::Video => "video(s)",
            DownloadMode::Audio => "audio file(s)",
        }
    }
}

/// Everything one download call needs besides the URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub mode: DownloadMode,
    /// Output template, including yt-dlp placeholders
    pub output_template: PathBuf,
    /// Directory containing ffmpeg, when one is known
    pub ffmpeg_location: Option<PathBuf>,
}

/// Output template `{dir}/{counter} - %(title).80s [%(id)s].%(ext)s`
pub fn output_template(dir: &Path, counter: usize, title_max_len: usize) -> PathBuf {
    dir.join(format!(
        "{} - %(title).{}s [%(id)s].%(ext)s",
        counter, title_max_len
    ))
}

pub trait MediaExtractor {
    /// Resolve metadata without downloading
    fn probe(&self, url: &str) -> Result<MediaInfo, ExtractError>;

    /// Download one URL, blocking until yt-dlp exits
    fn download(&self, url: &str, request: &DownloadRequest) -> Result<(), ExtractError>;
}

/// `MediaExtractor` backed by a yt-dlp process per call
pub struct YtDlpExtractor {
    command: ExtractorCommand,
    settings: Settings,
}

impl YtDlpExtractor {
    pub fn new(command: ExtractorCommand, settings: Settings) -> Self {
        Self { command, settings }
    }

    fn common_args(&self) -> Vec<String> {
        vec![
            "--no-warnings".to_string(),
            "--no-check-certificates".to_string(),
            "--no-playlist".to_string(),
            "--extractor-args".to_string(),
            self.settings.extractor_args(),
        ]
    }

    /// Argument list for a download, URL last
    pub fn download_args(&self, url: &str, request: &DownloadRequest) -> Vec<String> {
        let mut args = self.common_args();

        args.extend([
            "--quiet".to_string(),
            "--progress".to_string(),
            "--newline".to_string(),
            "--progress-template".to_string(),
            progress::PROGRESS_TEMPLATE.to_string(),
            "--windows-filenames".to_string(),
            "--restrict-filenames".to_string(),
            "--retries".to_string(),
            self.settings.retries.to_string(),
            "-o".to_string(),
            request.output_template.to_string_lossy().to_string(),
        ]);

        match request.mode {
            DownloadMode::Video => {
                args.push("-f".to_string());
                args.push(self.settings.video_format.clone());
            }
            DownloadMode::Audio => {
                args.extend([
                    "-f".to_string(),
                    DEFAULT_AUDIO_SELECTOR.to_string(),
                    "--extract-audio".to_string(),
                    "--audio-format".to_string(),
                    self.settings.audio_format.clone(),
                    "--audio-quality".to_string(),
                    format!("{}K", self.settings.audio_quality),
                ]);
            }
        }

        if let Some(location) = &request.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(location.to_string_lossy().to_string());
        }

        args.push(url.to_string());
        args
    }
}

/// Last `ERROR:` line from yt-dlp's stderr, or the whole text when there is none
fn error_message(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| line.starts_with("ERROR:"))
        .map(|line| line.trim_start_matches("ERROR:").trim().to_string())
        .unwrap_or_else(|| stderr.trim().to_string())
}

impl MediaExtractor for YtDlpExtractor {
    fn probe(&self, url: &str) -> Result<MediaInfo, ExtractError> {
        let mut cmd = self.command.command();
        cmd.args(self.common_args())
            .args(["--dump-single-json", "--skip-download", "--flat-playlist"])
            .arg(url)
            .stdin(Stdio::null());

        log::debug!("probing {}", url);
        let output = cmd
            .output()
            .map_err(|e| ExtractError::Launch(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Failed(error_message(&stderr)));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| ExtractError::Parse(e.to_string()))
    }

    fn download(&self, url: &str, request: &DownloadRequest) -> Result<(), ExtractError> {
        let mut cmd = self.command.command();
        cmd.args(self.download_args(url, request))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!("downloading {} -> {:?}", url, request.output_template);
        let mut child = cmd
            .spawn()
            .map_err(|e| ExtractError::Launch(e.to_string()))?;

        // Drain stderr on its own thread so a chatty child cannot block on a full pipe
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            std::thread::spawn(move || {
                let mut text = String::new();
                let _ = stderr.read_to_string(&mut text);
                text
            })
        });

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines().map_while(|l| l.ok()) {
                progress::show_download_progress(&line);
            }
        }

        let status = child
            .wait()
            .map_err(|e| ExtractError::Launch(e.to_string()))?;
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if status.success() {
            progress::finish_download();
            Ok(())
        } else {
            progress::clear_line();
            let message = error_message(&stderr);
            Err(ExtractError::Failed(if message.is_empty() {
                format!("yt-dlp exited with {}", status)
            } else {
                message
            }))
        }
    }
}

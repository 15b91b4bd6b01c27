// FFmpegManager - finds, installs and removes the ffmpeg transcoder
use colored::Colorize;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::core::system::SystemOps;
use crate::error::{HarvestError, Result};
use crate::platform::{set_executable, Platform};

const FFMPEG: &str = "ffmpeg";
const FFPROBE: &str = "ffprobe";

const EVERMEET_FFMPEG_URL: &str = "https://evermeet.cx/ffmpeg/getrelease/ffmpeg/zip";
const EVERMEET_FFPROBE_URL: &str = "https://evermeet.cx/ffmpeg/getrelease/ffprobe/zip";
const GYAN_ESSENTIALS_URL: &str = "https://www.gyan.dev/ffmpeg/builds/ffmpeg-release-essentials.zip";

/// Where the detected ffmpeg lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscoderOrigin {
    /// Bundled copy in the program's `bin/` directory
    Local,
    /// Found on PATH
    System,
}

/// Snapshot of ffmpeg availability, re-derived whenever it may have changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscoderState {
    pub path: Option<PathBuf>,
    pub origin: Option<TranscoderOrigin>,
}

impl TranscoderState {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }

    /// Directory handed to yt-dlp as `--ffmpeg-location`
    pub fn location(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_available() {
            "installed"
        } else {
            "not installed"
        }
    }
}

/// Install approach, picked from the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscoderStrategy {
    /// Homebrew, falling back to evermeet.cx static builds
    HomebrewOrStatic,
    /// gyan.dev release-essentials archive
    WindowsEssentials,
    /// No automatic install; print package-manager commands
    PackageManagerHint,
}

impl TranscoderStrategy {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::MacOs => TranscoderStrategy::HomebrewOrStatic,
            Platform::Windows => TranscoderStrategy::WindowsEssentials,
            Platform::OtherUnix => TranscoderStrategy::PackageManagerHint,
        }
    }

    /// Manual steps shown when the strategy fails
    pub fn remediation(&self) -> Vec<&'static str> {
        match self {
            TranscoderStrategy::HomebrewOrStatic => vec![
                "Manual installation options:",
                "  - Install Homebrew: /bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\"",
                "  - Then run: brew install ffmpeg",
            ],
            TranscoderStrategy::WindowsEssentials => vec![
                "Manual installation:",
                "  - Download from: https://www.gyan.dev/ffmpeg/builds/",
                "  - Or use: winget install ffmpeg",
            ],
            TranscoderStrategy::PackageManagerHint => vec![
                "Please install FFmpeg using your package manager:",
                "  - Ubuntu/Debian: sudo apt install ffmpeg",
                "  - Fedora: sudo dnf install ffmpeg",
                "  - Arch: sudo pacman -S ffmpeg",
            ],
        }
    }
}

pub struct FFmpegManager<'a> {
    system: &'a dyn SystemOps,
    platform: Platform,
    bin_dir: PathBuf,
}

impl<'a> FFmpegManager<'a> {
    pub fn new(system: &'a dyn SystemOps, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            system,
            platform: Platform::current(),
            bin_dir: bin_dir.into(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    pub fn strategy(&self) -> TranscoderStrategy {
        TranscoderStrategy::for_platform(self.platform)
    }

    /// Path of the bundled ffmpeg, whether or not it exists
    pub fn local_binary(&self) -> PathBuf {
        self.bin_dir.join(self.platform.exe_name(FFMPEG))
    }

    /// Locate ffmpeg; a bundled copy always wins over PATH
    pub fn detect(&self) -> TranscoderState {
        let local = self.local_binary();
        if local.is_file() {
            return TranscoderState {
                path: Some(local),
                origin: Some(TranscoderOrigin::Local),
            };
        }

        match self.system.which(FFMPEG) {
            Some(path) => TranscoderState {
                path: Some(path),
                origin: Some(TranscoderOrigin::System),
            },
            None => TranscoderState::missing(),
        }
    }

    /// First line of `ffmpeg -version`
    pub fn version(&self, ffmpeg: &Path) -> Result<String> {
        let output = self.system.capture(ffmpeg, &["-version"])?;
        Ok(output
            .lines()
            .next()
            .unwrap_or("Unknown version")
            .to_string())
    }

    /// Install ffmpeg using the platform strategy.
    ///
    /// Returns a short description of what was done.
    pub fn install(&self) -> Result<String> {
        match self.strategy() {
            TranscoderStrategy::HomebrewOrStatic => self.install_macos(),
            TranscoderStrategy::WindowsEssentials => self.install_windows(),
            TranscoderStrategy::PackageManagerHint => Err(HarvestError::unsupported(
                "automatic FFmpeg installation is not available on this platform",
            )),
        }
    }

    fn install_macos(&self) -> Result<String> {
        if let Some(brew) = self.system.which("brew") {
            println!("{}", "Found Homebrew. Installing ffmpeg via brew...".cyan());

            match self.system.run(&brew, &["install", FFMPEG], false) {
                Ok(true) => return Ok("Installed via Homebrew".to_string()),
                Ok(false) => {}
                Err(e) => log::warn!("brew could not be started: {}", e),
            }
            println!("{}", "Homebrew install failed, trying static binary...".yellow());
        }

        println!("{}", "Downloading FFmpeg static binary...".cyan());
        fs::create_dir_all(&self.bin_dir)?;

        for (name, url) in [(FFMPEG, EVERMEET_FFMPEG_URL), (FFPROBE, EVERMEET_FFPROBE_URL)] {
            println!("  Downloading {}...", name);

            let zip_path = self.bin_dir.join(format!("{}.zip", name));
            fs::write(&zip_path, self.system.fetch(url)?)?;

            let extracted = extract_members(&zip_path, &self.bin_dir, |member| {
                file_name(member).filter(|file| *file == name).map(String::from)
            });
            let _ = fs::remove_file(&zip_path);

            if extracted?.is_empty() {
                return Err(HarvestError::install(format!("{} not found in downloaded archive", name)));
            }
            set_executable(&self.bin_dir.join(name))?;
        }

        Ok(format!("FFmpeg installed to: {}", self.bin_dir.display()))
    }

    fn install_windows(&self) -> Result<String> {
        println!("{}", "Downloading FFmpeg for Windows...".cyan());
        fs::create_dir_all(&self.bin_dir)?;

        let zip_path = self.bin_dir.join("ffmpeg.zip");
        println!("  Downloading (this may take a moment)...");
        fs::write(&zip_path, self.system.fetch(GYAN_ESSENTIALS_URL)?)?;

        println!("  Extracting...");
        let extracted = extract_members(&zip_path, &self.bin_dir, windows_bin_member);
        let _ = fs::remove_file(&zip_path);

        let extracted = extracted?;
        let ffmpeg = self.platform.exe_name(FFMPEG);
        if !extracted.iter().any(|p| p.file_name().is_some_and(|f| f == ffmpeg.as_str())) {
            return Err(HarvestError::install("ffmpeg.exe not found in downloaded archive"));
        }

        Ok(format!("FFmpeg installed to: {}", self.bin_dir.display()))
    }

    pub fn has_local_install(&self) -> bool {
        self.bin_dir.is_dir()
    }

    /// Delete the bundled-binary directory. System installs are never touched.
    pub fn remove_local(&self) -> Result<()> {
        fs::remove_dir_all(&self.bin_dir)?;
        log::info!("removed {:?}", self.bin_dir);
        Ok(())
    }

    /// Command the user can run to remove a system-wide ffmpeg, when we know one
    pub fn system_uninstall_hint(&self) -> Option<&'static str> {
        match self.platform {
            Platform::MacOs if self.system.which("brew").is_some() => {
                Some("To uninstall system FFmpeg: brew uninstall ffmpeg")
            }
            Platform::Windows => Some("To uninstall system FFmpeg: winget uninstall ffmpeg"),
            _ => None,
        }
    }
}

fn file_name(member: &str) -> Option<&str> {
    member.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Release-essentials archives nest binaries under `<release-folder>/bin/`
fn windows_bin_member(member: &str) -> Option<String> {
    let member = member.replace('\\', "/");
    ["ffmpeg.exe", "ffprobe.exe"]
        .iter()
        .find(|exe| member.ends_with(&format!("/bin/{}", exe)))
        .map(|exe| exe.to_string())
}

/// Copy the archive entries accepted by `select` into `dest`, flattened to the
/// returned file name. Returns the written paths.
pub fn extract_members<F>(archive_path: &Path, dest: &Path, select: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> Option<String>,
{
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let Some(target_name) = select(entry.name()) else {
            continue;
        };

        let target = dest.join(&target_name);
        log::debug!("extracting {} -> {:?}", entry.name(), target);

        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written.push(target);
    }

    Ok(written)
}

use anyhow::Result;

use crate::core::ffmpeg_manager::FFmpegManager;
use crate::core::yt_dlp_manager::YtDlpManager;
use crate::ui::{self, Prompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallChoice {
    YtDlp,
    LocalFFmpeg,
    Both,
    Cancel,
}

impl UninstallChoice {
    /// Anything other than 1-3 cancels
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => UninstallChoice::YtDlp,
            "2" => UninstallChoice::LocalFFmpeg,
            "3" => UninstallChoice::Both,
            _ => UninstallChoice::Cancel,
        }
    }

    fn includes_yt_dlp(&self) -> bool {
        matches!(self, UninstallChoice::YtDlp | UninstallChoice::Both)
    }

    fn includes_ffmpeg(&self) -> bool {
        matches!(self, UninstallChoice::LocalFFmpeg | UninstallChoice::Both)
    }
}

/// Uninstall sub-menu. Each removal is confirmed first; a system-wide ffmpeg
/// is never touched.
pub fn execute(
    yt_dlp: &YtDlpManager<'_>,
    ffmpeg: &FFmpegManager<'_>,
    prompter: &mut dyn Prompter,
) -> Result<UninstallChoice> {
    println!();
    ui::bold("Uninstall Options:");
    println!("  1. Uninstall yt-dlp only");
    println!("  2. Uninstall local FFmpeg only");
    println!("  3. Uninstall both");
    println!("  4. Cancel");
    println!();

    let choice = UninstallChoice::parse(&prompter.ask("Enter choice (1-4)")?);
    if choice == UninstallChoice::Cancel {
        ui::dimmed("Cancelled.");
        return Ok(choice);
    }

    if choice.includes_yt_dlp() && prompter.confirm("Uninstall yt-dlp?")? {
        ui::info("Uninstalling yt-dlp...");
        match yt_dlp.uninstall() {
            Ok(method) => {
                log::info!("yt-dlp removed via {}", method);
                ui::success("yt-dlp uninstalled.");
            }
            Err(e) => {
                log::debug!("{}", e);
                ui::error("Failed to uninstall yt-dlp.");
            }
        }
    }

    if choice.includes_ffmpeg() {
        remove_local_ffmpeg(ffmpeg, prompter)?;
    }

    prompter.pause()?;
    Ok(choice)
}

fn remove_local_ffmpeg(ffmpeg: &FFmpegManager<'_>, prompter: &mut dyn Prompter) -> Result<()> {
    if !ffmpeg.has_local_install() {
        println!("No local FFmpeg installation found.");
        if let Some(hint) = ffmpeg.system_uninstall_hint() {
            ui::dimmed(hint);
        }
        return Ok(());
    }

    let prompt = format!("Remove local FFmpeg from {}?", ffmpeg.bin_dir().display());
    if prompter.confirm(&prompt)? {
        match ffmpeg.remove_local() {
            Ok(()) => ui::success("Local FFmpeg removed."),
            Err(e) => ui::error(&format!("Failed to remove: {}", e)),
        }
    }
    Ok(())
}

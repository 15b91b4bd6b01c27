use anyhow::Result;
use colored::Colorize;

use crate::core::ffmpeg_manager::FFmpegManager;
use crate::error::HarvestError;
use crate::ui::{self, Prompter};

/// Show the installed ffmpeg, or install one with the platform strategy.
///
/// Returns whether ffmpeg is available afterwards.
pub fn execute(manager: &FFmpegManager<'_>, prompter: &mut dyn Prompter) -> Result<bool> {
    let state = manager.detect();

    if let Some(path) = &state.path {
        println!();
        println!(
            "{} {}",
            "FFmpeg is already installed:".green(),
            path.display().to_string().cyan()
        );

        match manager.version(path) {
            Ok(version) => println!("{}", format!("Version: {}", version).dimmed()),
            Err(e) => log::debug!("could not read ffmpeg version: {}", e),
        }

        prompter.pause()?;
        return Ok(true);
    }

    println!();
    ui::bold("Installing FFmpeg...");

    let installed = match manager.install() {
        Ok(summary) => {
            println!("{}", summary.green());
            ui::success("FFmpeg installed successfully!");
            true
        }
        Err(HarvestError::Unsupported(reason)) => {
            log::debug!("{}", reason);
            for line in manager.strategy().remediation() {
                println!("{}", line);
            }
            false
        }
        Err(e) => {
            ui::error(&format!("Failed to download FFmpeg: {}", e));
            println!();
            for line in manager.strategy().remediation() {
                println!("{}", line);
            }
            false
        }
    };

    prompter.pause()?;
    Ok(installed)
}

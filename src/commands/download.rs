use anyhow::Result;
use colored::Colorize;

use crate::commands::session::Session;
use crate::commands::validate::print_separator;
use crate::core::batch::{download_all, BatchOptions, DownloadOutcome};
use crate::core::extractor::DownloadMode;

/// Download every URL in `mode`.
///
/// Audio needs ffmpeg for the MP3 conversion; without one nothing is
/// attempted and `None` is returned.
pub fn execute(session: &mut Session<'_>, mode: DownloadMode) -> Result<Option<DownloadOutcome>> {
    // ffmpeg may have been installed or removed since the session started
    session.refresh_transcoder();

    if mode == DownloadMode::Audio && !session.transcoder.is_available() {
        println!();
        println!("{}", "FFmpeg is required for MP3 conversion.".red());
        println!("{}", "Please use option 4 to install FFmpeg first.".yellow());
        session.prompter.pause()?;
        return Ok(None);
    }

    let output_dir = match mode {
        DownloadMode::Video => session.paths.video_dir.clone(),
        DownloadMode::Audio => session.paths.audio_dir.clone(),
    };

    let options = BatchOptions {
        mode,
        output_dir: &output_dir,
        ffmpeg_location: session.transcoder.location(),
        title_max_len: session.settings.title_max_len,
    };
    let outcome = download_all(&session.groups, session.extractor, &options)?;

    print_separator();
    println!("{}", format!("Downloaded: {}", outcome.succeeded).green());
    println!("{}", format!("Failed:     {}", outcome.failed).red());
    println!("{}", format!("Saved to:   {}", output_dir.display()).cyan());

    session.prompter.pause()?;
    Ok(Some(outcome))
}

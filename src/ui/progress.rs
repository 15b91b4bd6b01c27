// Download progress line driven by yt-dlp's progress template

use colored::Colorize;
use std::io::{self, Write};

/// Makes yt-dlp print `download:<percent>|<speed>` once per update
pub const PROGRESS_TEMPLATE: &str = "download:%(progress._percent_str)s|%(progress._speed_str)s";

/// Split a progress line into (percent, speed)
pub fn parse_progress_line(line: &str) -> Option<(&str, &str)> {
    let (percent, speed) = line.split_once('|')?;
    Some((percent.trim(), speed.trim()))
}

/// Redraw the in-place progress line for one yt-dlp stdout line
pub fn show_download_progress(line: &str) {
    match parse_progress_line(line) {
        Some((percent, speed)) => {
            print!(
                "\r        {} at {}  ",
                percent.yellow(),
                speed.cyan()
            );
            io::stdout().flush().ok();
        }
        None if !line.trim().is_empty() => log::debug!("yt-dlp: {}", line),
        None => {}
    }
}

/// Replace the progress line with a completion marker
pub fn finish_download() {
    println!("\r        {}                    ", "Done!".green());
}

/// Clear the current line (useful for progress bars)
pub fn clear_line() {
    print!("\r{}\r", " ".repeat(80));
    io::stdout().flush().ok();
}

// Batch operations over every URL in the folder groups
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::core::extractor::{output_template, DownloadMode, DownloadRequest, MediaExtractor};
use crate::core::failure::FailureHint;
use crate::core::paths::AppPaths;
use crate::core::url_list::FolderGroups;

const UNKNOWN_TITLE: &str = "Unknown";

/// Tally of one download batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

/// URLs split by whether yt-dlp could resolve them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: FolderGroups,
    pub invalid: FolderGroups,
}

/// Options shared by every URL in a batch
#[derive(Debug, Clone)]
pub struct BatchOptions<'a> {
    pub mode: DownloadMode,
    pub output_dir: &'a Path,
    pub ffmpeg_location: Option<&'a Path>,
    pub title_max_len: usize,
}

fn folder_label(folder: &str) -> &str {
    if folder.is_empty() {
        "(root)"
    } else {
        folder
    }
}

fn print_item(counter: usize, total: usize, folder: &str, text: &str) {
    println!(
        "{} {} {}",
        format!("[{}/{}]", counter, total).dimmed(),
        format!("[{}]", folder_label(folder)).cyan(),
        text
    );
}

/// Probe every URL and sort it into valid or invalid
pub fn validate_all(groups: &FolderGroups, extractor: &dyn MediaExtractor) -> ValidationReport {
    let total = groups.url_count();
    let mut report = ValidationReport::default();
    let mut counter = 0;

    println!();
    println!("{}", format!("Validating {} URL(s)...", total).bold());
    println!();

    for (folder, urls) in groups.iter() {
        for url in urls {
            counter += 1;

            match extractor.probe(url) {
                Ok(info) => {
                    let title = info.title.unwrap_or_else(|| "Unknown Title".to_string());
                    print_item(counter, total, folder, &title.green().to_string());
                    report.valid.push(folder, url.as_str());
                }
                Err(e) => {
                    log::debug!("probe failed for {}: {}", url, e);
                    print_item(counter, total, folder, &"Invalid URL".red().to_string());
                    report.invalid.push(folder, url.as_str());
                }
            }
        }
    }

    report
}

/// Download every URL, one at a time.
///
/// The counter is 1-based and runs across folders; it appears in the
/// progress line and leads the output file name. A failure never stops the
/// batch.
pub fn download_all(
    groups: &FolderGroups,
    extractor: &dyn MediaExtractor,
    options: &BatchOptions<'_>,
) -> Result<DownloadOutcome> {
    let total = groups.url_count();
    let mut outcome = DownloadOutcome::default();
    let mut counter = 0;

    println!();
    println!(
        "{}",
        format!("Downloading {} {}...", total, options.mode.noun()).bold()
    );
    println!();

    for (folder, urls) in groups.iter() {
        let folder_dir = AppPaths::ensure_folder_dir(options.output_dir, folder)?;

        for url in urls {
            counter += 1;

            let title = extractor
                .probe(url)
                .ok()
                .and_then(|info| info.title)
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
            print_item(counter, total, folder, &title);

            let request = DownloadRequest {
                mode: options.mode,
                output_template: output_template(&folder_dir, counter, options.title_max_len),
                ffmpeg_location: options.ffmpeg_location.map(Path::to_path_buf),
            };

            match extractor.download(url, &request) {
                Ok(()) => outcome.succeeded += 1,
                Err(e) => {
                    outcome.failed += 1;

                    let hint = FailureHint::classify(&e.message(), options.mode);
                    if !hint.is_classified() {
                        log::debug!("unclassified failure for {}: {}", url, e);
                    }

                    println!("        {}", "Download failed:".red());
                    for line in hint.lines(options.mode) {
                        if hint.is_classified() {
                            println!("        {}", line.yellow());
                        } else {
                            println!("        {}", line.dimmed());
                        }
                    }
                }
            }
        }
    }

    println!();
    Ok(outcome)
}

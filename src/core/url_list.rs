// urls.txt parsing
//
// Line syntax:
//   blank            ignored
//   \\ text          comment, ignored
//   # Folder         folder header for the URLs that follow
//   anything else    URL (validated)

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use super::url_validator::is_valid_url_format;

pub const COMMENT_MARKER: &str = "\\\\";
pub const FOLDER_MARKER: &str = "# ";

/// Maximum skipped lines echoed back to the user
pub const SKIPPED_PREVIEW_LIMIT: usize = 5;
const SKIPPED_PREVIEW_WIDTH: usize = 50;

const TEMPLATE: &str = "\\\\ Add URLs below, one per line
\\\\ Use # FolderName to organize into folders
\\\\ Example:
\\\\ # Music
\\\\ https://www.youtube.com/watch?v=VIDEO_ID
";

/// URLs grouped by folder name, in first-seen order.
///
/// The empty name is the root group (URLs before any header).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderGroups {
    groups: Vec<(String, Vec<String>)>,
}

impl FolderGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a URL to `folder`, creating the group on first use
    pub fn push(&mut self, folder: &str, url: impl Into<String>) {
        match self.groups.iter_mut().find(|(name, _)| name == folder) {
            Some((_, urls)) => urls.push(url.into()),
            None => self.groups.push((folder.to_string(), vec![url.into()])),
        }
    }

    pub fn get(&self, folder: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(name, _)| name == folder)
            .map(|(_, urls)| urls.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, urls)| (name.as_str(), urls.as_slice()))
    }

    pub fn folder_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total URLs across every group
    pub fn url_count(&self) -> usize {
        self.groups.iter().map(|(_, urls)| urls.len()).sum()
    }

    /// Number of named folders (the root group is not counted)
    pub fn named_folder_count(&self) -> usize {
        self.groups.iter().filter(|(name, _)| !name.is_empty()).count()
    }
}

/// A non-empty line that was neither comment, header nor valid URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub text: String,
}

/// Outcome of one parse pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub groups: FolderGroups,
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Lines describing the skipped entries, empty when nothing was skipped
    pub fn skipped_summary(&self) -> Vec<String> {
        if self.skipped.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![format!("Skipped {} invalid line(s):", self.skipped.len())];

        for skipped in self.skipped.iter().take(SKIPPED_PREVIEW_LIMIT) {
            lines.push(format!(
                "  Line {}: {}",
                skipped.line_number,
                preview(&skipped.text)
            ));
        }

        if self.skipped.len() > SKIPPED_PREVIEW_LIMIT {
            lines.push(format!(
                "  ... and {} more",
                self.skipped.len() - SKIPPED_PREVIEW_LIMIT
            ));
        }

        lines
    }

    /// Groups, or `None` when the pass found no valid URL
    pub fn into_groups(self) -> Option<FolderGroups> {
        if self.groups.is_empty() {
            None
        } else {
            Some(self.groups)
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > SKIPPED_PREVIEW_WIDTH {
        let cut: String = text.chars().take(SKIPPED_PREVIEW_WIDTH).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Parse urls.txt content into folder groups
pub fn parse_url_lines<'a, I>(lines: I) -> ParseReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = ParseReport::default();
    let mut current_folder = String::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        // A trimmed "# " is a bare "#": not a header, so it lands in the skipped list
        if let Some(rest) = line.strip_prefix(FOLDER_MARKER) {
            let folder = rest.trim();
            if !folder.is_empty() {
                current_folder = folder.to_string();
            }
            continue;
        }

        if !is_valid_url_format(line) {
            report.skipped.push(SkippedLine {
                line_number: index + 1,
                text: line.to_string(),
            });
            continue;
        }

        report.groups.push(&current_folder, line);
    }

    report
}

/// Read and parse a URL file.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_url_file(path: &Path) -> Result<Option<ParseReport>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL file: {:?}", path))?;

    // `lines()` only splits on `\n`; a lone `\r` also ends a line
    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    let report = parse_url_lines(content.lines());
    log::debug!(
        "parsed {:?}: {} url(s), {} skipped",
        path,
        report.groups.url_count(),
        report.skipped.len()
    );

    Ok(Some(report))
}

/// Load grouped URLs, printing the skipped-line summary.
///
/// `None` covers both a missing file and a file without valid URLs.
pub fn load_urls(path: &Path) -> Result<Option<FolderGroups>> {
    let Some(report) = read_url_file(path)? else {
        return Ok(None);
    };

    let summary = report.skipped_summary();
    if let Some((header, entries)) = summary.split_first() {
        println!();
        println!("{}", header.yellow());
        for entry in entries {
            println!("{}", entry.dimmed());
        }
    }

    Ok(report.into_groups())
}

/// Write the starter urls.txt
pub fn create_url_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    fs::write(path, TEMPLATE).with_context(|| format!("Failed to write URL file: {:?}", path))
}

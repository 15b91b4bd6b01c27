// URL shape check applied to every non-comment, non-header line of urls.txt
//
// The platform alternatives only document what we expect to see; the generic
// domain fallback accepts nearly anything shaped like a URL. The real job is
// rejecting lines that are obviously not URLs.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:www\.)?",
        r"(?:",
        r"youtube\.com/(?:watch\?v=|shorts/|playlist\?list=|embed/|v/)",
        r"|youtu\.be/",
        r"|vimeo\.com/",
        r"|dailymotion\.com/",
        r"|twitter\.com/.*/status/",
        r"|x\.com/.*/status/",
        r"|tiktok\.com/",
        r"|instagram\.com/",
        r"|facebook\.com/",
        r"|twitch\.tv/",
        r"|soundcloud\.com/",
        r"|reddit\.com/",
        r"|[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
        r")",
    ))
    .expect("URL pattern is a valid regex")
});

/// Returns true when `line` looks like a media URL
pub fn is_valid_url_format(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    URL_PATTERN.is_match(trimmed)
}

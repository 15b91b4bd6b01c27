// Maps a failed download's message onto a user-facing hint
//
// yt-dlp's CLI reports failures as free text only, so the keyword scan lives
// here and nowhere else.

use crate::core::extractor::DownloadMode;

/// Raw messages are cut to this many characters when no hint applies
pub const RAW_MESSAGE_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureHint {
    /// ffmpeg missing or merge/conversion failed
    TranscoderRequired,
    Private,
    LoginRequired,
    Unavailable,
    /// Unclassified; holds the truncated message
    Other(String),
}

impl FailureHint {
    /// Classify `message`; keywords are checked in priority order.
    ///
    /// "merge" only points at ffmpeg for video downloads, where audio and video
    /// streams are combined.
    pub fn classify(message: &str, mode: DownloadMode) -> Self {
        let lower = message.to_lowercase();

        let transcoder = lower.contains("ffmpeg")
            || (mode == DownloadMode::Video && lower.contains("merge"));

        if transcoder {
            FailureHint::TranscoderRequired
        } else if lower.contains("private") {
            FailureHint::Private
        } else if lower.contains("age") || lower.contains("sign in") {
            FailureHint::LoginRequired
        } else if lower.contains("available") {
            FailureHint::Unavailable
        } else {
            FailureHint::Other(message.chars().take(RAW_MESSAGE_LIMIT).collect())
        }
    }

    /// Lines printed under "Download failed:"
    pub fn lines(&self, mode: DownloadMode) -> Vec<String> {
        match self {
            FailureHint::TranscoderRequired => {
                let reason = match mode {
                    DownloadMode::Video => "FFmpeg is required to merge video+audio.",
                    DownloadMode::Audio => "FFmpeg is required for MP3 conversion.",
                };
                vec![reason.to_string(), "Install it via menu option 4.".to_string()]
            }
            FailureHint::Private => vec!["This video is private.".to_string()],
            FailureHint::LoginRequired => {
                vec!["This video requires age verification/login.".to_string()]
            }
            FailureHint::Unavailable => {
                vec!["Video unavailable (deleted or region-locked).".to_string()]
            }
            FailureHint::Other(message) => vec![message.clone()],
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, FailureHint::Other(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffmpeg_wins_over_other_keywords() {
        let hint = FailureHint::classify(
            "ERROR: ffmpeg not found; private video unavailable",
            DownloadMode::Audio,
        );
        assert_eq!(hint, FailureHint::TranscoderRequired);
    }

    #[test]
    fn test_merge_only_matters_for_video() {
        let message = "Requested formats are incompatible for merge";
        assert_eq!(
            FailureHint::classify(message, DownloadMode::Video),
            FailureHint::TranscoderRequired
        );
        assert!(matches!(
            FailureHint::classify(message, DownloadMode::Audio),
            FailureHint::Other(_)
        ));
    }

    #[test]
    fn test_keyword_categories() {
        let cases = [
            ("Private video. Sign in if you've been granted access", FailureHint::Private),
            ("Sign in to confirm your age", FailureHint::LoginRequired),
            ("Video unavailable. This video has been removed", FailureHint::Unavailable),
            ("This content isn't available in your country", FailureHint::Unavailable),
        ];

        for (message, expected) in cases {
            assert_eq!(FailureHint::classify(message, DownloadMode::Video), expected, "{}", message);
        }
    }

    #[test]
    fn test_unclassified_message_is_truncated() {
        let message = "z".repeat(500);
        match FailureHint::classify(&message, DownloadMode::Video) {
            FailureHint::Other(text) => assert_eq!(text.len(), RAW_MESSAGE_LIMIT),
            other => panic!("unexpected hint: {:?}", other),
        }
    }

    #[test]
    fn test_hint_lines() {
        let lines = FailureHint::TranscoderRequired.lines(DownloadMode::Audio);
        assert_eq!(lines[0], "FFmpeg is required for MP3 conversion.");
        assert!(lines[1].contains("option 4"));
        assert!(FailureHint::Private.is_classified());
        assert!(!FailureHint::Other("x".into()).is_classified());
    }
}

use mediaharvester::core::extractor::{
    DownloadMode, DownloadRequest, ExtractError, MediaExtractor, MediaInfo,
};
use mediaharvester::core::failure::FailureHint;
use mediaharvester::core::{download_all, validate_all, BatchOptions, DownloadOutcome, FolderGroups};
use std::cell::RefCell;
use std::collections::HashMap;
use tempfile::TempDir;

/// Answers from a table of canned failures; every other URL succeeds
#[derive(Default)]
struct CannedExtractor {
    failures: HashMap<String, String>,
    attempted: RefCell<Vec<String>>,
}

impl CannedExtractor {
    fn failing(mut self, url: &str, message: &str) -> Self {
        self.failures.insert(url.to_string(), message.to_string());
        self
    }
}

impl MediaExtractor for CannedExtractor {
    fn probe(&self, url: &str) -> Result<MediaInfo, ExtractError> {
        match self.failures.get(url) {
            Some(message) => Err(ExtractError::Failed(message.clone())),
            None => Ok(MediaInfo {
                id: Some(url.rsplit('/').next().unwrap_or_default().to_string()),
                title: None,
            }),
        }
    }

    fn download(&self, url: &str, _request: &DownloadRequest) -> Result<(), ExtractError> {
        self.attempted.borrow_mut().push(url.to_string());
        match self.failures.get(url) {
            Some(message) => Err(ExtractError::Failed(message.clone())),
            None => Ok(()),
        }
    }
}

fn groups(urls: &[(&str, &str)]) -> FolderGroups {
    let mut groups = FolderGroups::new();
    for (folder, url) in urls {
        groups.push(folder, *url);
    }
    groups
}

#[test]
fn test_second_url_failing_still_attempts_third() {
    let temp = TempDir::new().unwrap();
    let groups = groups(&[
        ("", "https://youtu.be/one"),
        ("", "https://youtu.be/two"),
        ("", "https://youtu.be/three"),
    ]);
    let extractor =
        CannedExtractor::default().failing("https://youtu.be/two", "Video unavailable");

    let options = BatchOptions {
        mode: DownloadMode::Video,
        output_dir: temp.path(),
        ffmpeg_location: None,
        title_max_len: 80,
    };
    let outcome = download_all(&groups, &extractor, &options).unwrap();

    assert_eq!(outcome, DownloadOutcome { succeeded: 2, failed: 1 });
    assert_eq!(
        *extractor.attempted.borrow(),
        vec![
            "https://youtu.be/one".to_string(),
            "https://youtu.be/two".to_string(),
            "https://youtu.be/three".to_string(),
        ]
    );
}

#[test]
fn test_folders_become_output_subdirectories() {
    let temp = TempDir::new().unwrap();
    let groups = groups(&[
        ("Music", "https://youtu.be/a"),
        ("Podcasts", "https://youtu.be/b"),
    ]);

    let options = BatchOptions {
        mode: DownloadMode::Audio,
        output_dir: temp.path(),
        ffmpeg_location: Some(temp.path()),
        title_max_len: 80,
    };
    download_all(&groups, &CannedExtractor::default(), &options).unwrap();

    assert!(temp.path().join("Music").is_dir());
    assert!(temp.path().join("Podcasts").is_dir());
}

#[test]
fn test_validate_reports_each_side() {
    let groups = groups(&[
        ("", "https://youtu.be/good"),
        ("Talks", "https://youtu.be/gone"),
    ]);
    let extractor = CannedExtractor::default().failing("https://youtu.be/gone", "404");

    let report = validate_all(&groups, &extractor);

    assert_eq!(report.valid.url_count(), 1);
    assert_eq!(report.valid.get(""), Some(&["https://youtu.be/good".to_string()][..]));
    assert_eq!(report.invalid.get("Talks"), Some(&["https://youtu.be/gone".to_string()][..]));
    assert!(extractor.attempted.borrow().is_empty());
}

#[test]
fn test_failure_hint_order() {
    let cases = [
        ("Postprocessing: ffmpeg not found", DownloadMode::Audio, FailureHint::TranscoderRequired),
        ("unable to merge formats", DownloadMode::Video, FailureHint::TranscoderRequired),
        ("Private video", DownloadMode::Video, FailureHint::Private),
        ("Sign in to confirm your age", DownloadMode::Audio, FailureHint::LoginRequired),
        ("This video is not available", DownloadMode::Video, FailureHint::Unavailable),
    ];

    for (message, mode, expected) in cases {
        assert_eq!(FailureHint::classify(message, mode), expected, "{}", message);
    }

    assert_eq!(
        FailureHint::classify("HTTP Error 403: Forbidden", DownloadMode::Video),
        FailureHint::Other("HTTP Error 403: Forbidden".to_string())
    );
}

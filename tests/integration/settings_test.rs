use mediaharvester::core::paths::AppPaths;
use mediaharvester::Settings;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_partial_settings_keep_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    fs::write(&path, r#"{ "audio_quality": "320", "retries": 5 }"#).unwrap();

    let settings = Settings::load_from(&path).unwrap();

    assert_eq!(settings.audio_quality, "320");
    assert_eq!(settings.retries, 5);
    assert_eq!(settings.audio_format, "mp3");
    assert_eq!(settings.title_max_len, 80);
    assert_eq!(settings.extractor_args(), "youtube:player_client=android,web");
}

#[test]
fn test_corrupt_settings_fall_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.retries, Settings::default().retries);
}

#[test]
fn test_paths_follow_base_override() {
    let temp = TempDir::new().unwrap();
    let paths = AppPaths::resolve(Some(temp.path()), None).unwrap();

    assert_eq!(paths.url_file, temp.path().join("urls.txt"));
    assert_eq!(paths.video_dir, temp.path().join("video"));
    assert_eq!(paths.audio_dir, temp.path().join("audio"));
    assert_eq!(paths.bin_dir, temp.path().join("bin"));
}

#[test]
fn test_root_folder_writes_into_output_dir() {
    let root = Path::new("/media/video");
    assert_eq!(AppPaths::folder_dir(root, ""), root.to_path_buf());
    assert_eq!(AppPaths::folder_dir(root, "Music"), root.join("Music"));
}

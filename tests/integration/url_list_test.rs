use mediaharvester::core::url_list::{create_url_file, load_urls, read_url_file, FolderGroups};
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = "\
\\\\ my downloads
https://youtu.be/root1

# Music
https://youtu.be/song1
https://youtu.be/song2
not a url

# Talks
https://vimeo.com/1
#
https://vimeo.com/2

# Music
https://youtu.be/song3
";

#[test]
fn test_read_groups_in_file_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("urls.txt");
    fs::write(&path, SAMPLE).unwrap();

    let report = read_url_file(&path).unwrap().unwrap();

    let folders: Vec<&str> = report.groups.folder_names().collect();
    assert_eq!(folders, vec!["", "Music", "Talks"]);
    assert_eq!(
        report.groups.get("Music").unwrap(),
        &[
            "https://youtu.be/song1".to_string(),
            "https://youtu.be/song2".to_string(),
            "https://youtu.be/song3".to_string(),
        ][..]
    );
    assert_eq!(report.groups.get("Talks").unwrap().len(), 2);
    assert_eq!(report.groups.url_count(), 6);
    assert_eq!(report.groups.named_folder_count(), 2);

    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].line_number, 7);
    assert_eq!(report.skipped[0].text, "not a url");
    assert_eq!(report.skipped[1].line_number, 11);
    assert_eq!(report.skipped[1].text, "#");
}

#[test]
fn test_missing_file_loads_nothing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("urls.txt");

    assert!(read_url_file(&path).unwrap().is_none());
    assert!(load_urls(&path).unwrap().is_none());
}

#[test]
fn test_created_template_has_no_urls() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("urls.txt");

    create_url_file(&path).unwrap();

    assert!(path.is_file());
    let report = read_url_file(&path).unwrap().unwrap();
    assert!(report.skipped.is_empty());
    assert!(load_urls(&path).unwrap().is_none());
}

#[test]
fn test_load_returns_groups() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("urls.txt");
    fs::write(&path, "# Clips\nhttps://youtu.be/a\n").unwrap();

    let mut expected = FolderGroups::new();
    expected.push("Clips", "https://youtu.be/a");

    assert_eq!(load_urls(&path).unwrap(), Some(expected));
}

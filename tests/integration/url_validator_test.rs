use mediaharvester::core::url_validator::is_valid_url_format;

#[test]
fn test_accepts_supported_sites() {
    let urls = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://youtube.com/shorts/abc123",
        "http://youtu.be/abc123",
        "https://vimeo.com/123456",
        "https://x.com/someone/status/1234567890",
        "https://soundcloud.com/artist/track",
        "HTTPS://WWW.TWITCH.TV/somechannel",
    ];

    for url in urls {
        assert!(is_valid_url_format(url), "should accept {}", url);
    }
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    assert!(is_valid_url_format("   https://youtu.be/abc123   "));
}

#[test]
fn test_rejects_non_urls() {
    let lines = [
        "",
        "   ",
        "youtube.com/watch?v=abc",
        "ftp://example.com/file",
        "https://",
        "just some words",
        "# Music",
    ];

    for line in lines {
        assert!(!is_valid_url_format(line), "should reject {:?}", line);
    }
}

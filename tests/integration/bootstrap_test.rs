use mediaharvester::core::ffmpeg_manager::{extract_members, TranscoderOrigin};
use mediaharvester::core::{ExtractorCommand, FFmpegManager, SystemOps, YtDlpManager};
use mediaharvester::platform::Platform;
use mediaharvester::{HarvestError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Host stand-in: a PATH table, a set of command lines that succeed, and a log
#[derive(Default)]
struct StubHost {
    path: HashMap<&'static str, PathBuf>,
    ok: Vec<String>,
    stdout: HashMap<String, String>,
    log: RefCell<Vec<String>>,
}

impl StubHost {
    fn on_path(mut self, name: &'static str, location: &str) -> Self {
        self.path.insert(name, PathBuf::from(location));
        self
    }

    fn ok(mut self, command_line: &str) -> Self {
        self.ok.push(command_line.to_string());
        self
    }

    fn command_line(program: &Path, args: &[&str]) -> String {
        std::iter::once(program.display().to_string())
            .chain(args.iter().map(|a| a.to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SystemOps for StubHost {
    fn run(&self, program: &Path, args: &[&str], _quiet: bool) -> Result<bool> {
        let line = Self::command_line(program, args);
        self.log.borrow_mut().push(line.clone());
        Ok(self.ok.contains(&line))
    }

    fn capture(&self, program: &Path, args: &[&str]) -> Result<String> {
        let line = Self::command_line(program, args);
        self.stdout
            .get(&line)
            .cloned()
            .ok_or_else(|| HarvestError::other(format!("{} exited with 1", line)))
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        self.path.get(program).cloned()
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Err(HarvestError::other(format!("offline: {}", url)))
    }
}

#[test]
fn test_yt_dlp_found_as_python_module() {
    let mut host = StubHost::default().on_path("python3", "/usr/bin/python3");
    host.stdout.insert(
        "/usr/bin/python3 -m yt_dlp --version".to_string(),
        "2025.01.15\n".to_string(),
    );

    let manager = YtDlpManager::new(&host)
        .with_platform(Platform::OtherUnix)
        .with_home_dir(None);

    let command = manager.detect().unwrap();
    assert_eq!(command, ExtractorCommand::PythonModule(PathBuf::from("/usr/bin/python3")));
    assert_eq!(command.prefix_args(), &["-m", "yt_dlp"]);
    assert_eq!(manager.version(&command).unwrap(), "2025.01.15");
}

#[test]
fn test_yt_dlp_found_in_user_bin() {
    let temp = TempDir::new().unwrap();
    let bin = temp.path().join(".local").join("bin");
    fs::create_dir_all(&bin).unwrap();
    fs::write(bin.join("yt-dlp"), b"").unwrap();

    let host = StubHost::default();
    let manager = YtDlpManager::new(&host)
        .with_platform(Platform::OtherUnix)
        .with_home_dir(Some(temp.path().to_path_buf()));

    assert_eq!(manager.detect(), Some(ExtractorCommand::Binary(bin.join("yt-dlp"))));
}

#[test]
fn test_install_failure_offers_manual_steps() {
    let host = StubHost::default().on_path("python3", "/usr/bin/python3");
    let manager = YtDlpManager::new(&host)
        .with_platform(Platform::MacOs)
        .with_home_dir(None);

    let result = manager.ensure();

    assert!(matches!(result, Err(HarvestError::Install(_))));
    // pipx, pip x2, pip3 x2
    assert_eq!(host.log.borrow().len(), 5);
    assert!(manager
        .manual_instructions()
        .iter()
        .any(|line| line.contains("brew install yt-dlp")));
}

#[test]
fn test_pipx_install_stops_the_chain() {
    let temp = TempDir::new().unwrap();
    let host = StubHost::default()
        .on_path("pipx", "/usr/bin/pipx")
        .on_path("python3", "/usr/bin/python3")
        .ok("/usr/bin/pipx install yt-dlp");

    // Installed but never visible afterwards
    let result = YtDlpManager::new(&host)
        .with_platform(Platform::OtherUnix)
        .with_home_dir(Some(temp.path().to_path_buf()))
        .ensure();

    assert!(matches!(result, Err(HarvestError::ToolNotFound(_))));
    assert_eq!(*host.log.borrow(), vec!["/usr/bin/pipx install yt-dlp".to_string()]);
}

#[test]
fn test_local_ffmpeg_wins_over_path() {
    let temp = TempDir::new().unwrap();
    let bin = temp.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    fs::write(bin.join("ffmpeg.exe"), b"").unwrap();

    let host = StubHost::default().on_path("ffmpeg", "C:/ffmpeg/bin/ffmpeg.exe");
    let state = FFmpegManager::new(&host, &bin)
        .with_platform(Platform::Windows)
        .detect();

    assert_eq!(state.origin, Some(TranscoderOrigin::Local));
    assert_eq!(state.location(), Some(bin.as_path()));
}

#[test]
fn test_linux_install_is_unsupported() {
    let temp = TempDir::new().unwrap();
    let host = StubHost::default();

    let manager = FFmpegManager::new(&host, temp.path().join("bin")).with_platform(Platform::OtherUnix);

    assert!(matches!(manager.install(), Err(HarvestError::Unsupported(_))));
    assert!(host.log.borrow().is_empty());
    assert!(manager
        .strategy()
        .remediation()
        .iter()
        .any(|line| line.contains("apt install ffmpeg")));
}

#[test]
fn test_extract_members_flattens_selected_entries() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("bundle.zip");

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in [
        ("release/bin/ffmpeg.exe", &b"a"[..]),
        ("release/doc/ffmpeg.html", &b"b"[..]),
    ] {
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(body).unwrap();
    }
    fs::write(&archive, writer.finish().unwrap().into_inner()).unwrap();

    let out = temp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    let written = extract_members(&archive, &out, |member| {
        member.ends_with("/bin/ffmpeg.exe").then(|| "ffmpeg.exe".to_string())
    })
    .unwrap();

    assert_eq!(written, vec![out.join("ffmpeg.exe")]);
    assert_eq!(fs::read(out.join("ffmpeg.exe")).unwrap(), b"a");
    assert!(!out.join("ffmpeg.html").exists());
}

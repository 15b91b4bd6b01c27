// Host platform probe and small OS-specific helpers

use std::io;
use std::path::{Path, PathBuf};

/// Operating system families the bootstrapper distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    OtherUnix,
}

impl Platform {
    /// Detect the platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::OtherUnix
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOs => "macOS",
            Platform::Windows => "Windows",
            Platform::OtherUnix => "Linux/Unix",
        }
    }

    /// Executable file name for a tool on this platform (`ffmpeg` -> `ffmpeg.exe`)
    pub fn exe_name(&self, tool: &str) -> String {
        match self {
            Platform::Windows => format!("{}.exe", tool),
            _ => tool.to_string(),
        }
    }
}

/// Directory that holds the running executable
pub fn program_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| io::Error::other("executable has no parent directory"))
}

/// Mark a file as executable (no-op outside Unix)
#[cfg(unix)]
pub fn set_executable(path: &Path) -> io::Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

// YtDlpManager - finds, installs and removes the yt-dlp extractor
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::system::SystemOps;
use crate::error::{HarvestError, Result};
use crate::platform::Platform;

const PACKAGE: &str = "yt-dlp";
const MODULE: &str = "yt_dlp";

/// How yt-dlp gets invoked once found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractorCommand {
    /// Standalone `yt-dlp` executable
    Binary(PathBuf),
    /// `python -m yt_dlp`
    PythonModule(PathBuf),
}

impl ExtractorCommand {
    /// Program to spawn
    pub fn program(&self) -> &Path {
        match self {
            ExtractorCommand::Binary(path) | ExtractorCommand::PythonModule(path) => path,
        }
    }

    /// Arguments that precede the yt-dlp arguments
    pub fn prefix_args(&self) -> &'static [&'static str] {
        match self {
            ExtractorCommand::Binary(_) => &[],
            ExtractorCommand::PythonModule(_) => &["-m", MODULE],
        }
    }

    /// A `Command` ready to receive yt-dlp arguments
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.program());
        cmd.args(self.prefix_args());
        cmd
    }

    fn args_with<'a>(&self, args: &[&'a str]) -> Vec<&'a str> {
        let mut full: Vec<&str> = self.prefix_args().to_vec();
        full.extend_from_slice(args);
        full
    }
}

/// Which program an install or uninstall step launches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Launcher {
    /// The detected Python interpreter
    Python,
    /// A program looked up by name
    Named(&'static str),
}

/// One way of installing or removing yt-dlp
#[derive(Debug, Clone, Copy)]
pub struct PackageStep {
    pub method: &'static str,
    launcher: Launcher,
    args: &'static [&'static str],
}

/// Tried in order until one succeeds
const INSTALL_STEPS: &[PackageStep] = &[
    PackageStep {
        method: "pipx",
        launcher: Launcher::Named("pipx"),
        args: &["install", PACKAGE],
    },
    PackageStep {
        method: "pip",
        launcher: Launcher::Python,
        args: &["-m", "pip", "install", "--user", "--break-system-packages", "-q", PACKAGE],
    },
    PackageStep {
        method: "pip",
        launcher: Launcher::Python,
        args: &["-m", "pip", "install", "--user", "-q", PACKAGE],
    },
    PackageStep {
        method: "pip3",
        launcher: Launcher::Named("pip3"),
        args: &["install", "--user", "--break-system-packages", "-q", PACKAGE],
    },
    PackageStep {
        method: "pip3",
        launcher: Launcher::Named("pip3"),
        args: &["install", "--user", "-q", PACKAGE],
    },
];

const UNINSTALL_STEPS: &[PackageStep] = &[
    PackageStep {
        method: "pip",
        launcher: Launcher::Python,
        args: &["-m", "pip", "uninstall", "-y", PACKAGE],
    },
    PackageStep {
        method: "pipx",
        launcher: Launcher::Named("pipx"),
        args: &["uninstall", PACKAGE],
    },
    PackageStep {
        method: "pip3",
        launcher: Launcher::Named("pip3"),
        args: &["uninstall", "-y", PACKAGE],
    },
];

pub struct YtDlpManager<'a> {
    system: &'a dyn SystemOps,
    platform: Platform,
    home_dir: Option<PathBuf>,
}

impl<'a> YtDlpManager<'a> {
    pub fn new(system: &'a dyn SystemOps) -> Self {
        Self {
            system,
            platform: Platform::current(),
            home_dir: dirs::home_dir(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    /// Python interpreters worth trying, most specific first
    fn python_candidates(&self) -> &'static [&'static str] {
        match self.platform {
            Platform::Windows => &["python", "py", "python3"],
            _ => &["python3", "python"],
        }
    }

    fn find_python(&self) -> Option<PathBuf> {
        self.python_candidates()
            .iter()
            .find_map(|name| self.system.which(name))
    }

    /// Where `pip install --user` and pipx drop console scripts
    fn user_bin_candidate(&self) -> Option<PathBuf> {
        let home = self.home_dir.as_ref()?;
        let exe = self.platform.exe_name(PACKAGE);
        Some(home.join(".local").join("bin").join(exe))
    }

    /// Locate a working yt-dlp.
    ///
    /// Order: PATH, the user-scoped script directory, then `python -m yt_dlp`.
    pub fn detect(&self) -> Option<ExtractorCommand> {
        if let Some(path) = self.system.which(PACKAGE) {
            log::debug!("yt-dlp found on PATH: {:?}", path);
            return Some(ExtractorCommand::Binary(path));
        }

        if let Some(path) = self.user_bin_candidate().filter(|p| p.is_file()) {
            log::debug!("yt-dlp found in user bin: {:?}", path);
            return Some(ExtractorCommand::Binary(path));
        }

        for name in self.python_candidates() {
            let Some(python) = self.system.which(name) else {
                continue;
            };

            if self
                .system
                .capture(&python, &["-m", MODULE, "--version"])
                .is_ok()
            {
                log::debug!("yt-dlp importable through {:?}", python);
                return Some(ExtractorCommand::PythonModule(python));
            }
        }

        None
    }

    /// Version string reported by the detected extractor
    pub fn version(&self, command: &ExtractorCommand) -> Result<String> {
        let args = command.args_with(&["--version"]);
        let output = self.system.capture(command.program(), &args)?;
        Ok(output.trim().to_string())
    }

    fn resolve_launcher(&self, launcher: Launcher) -> Option<PathBuf> {
        match launcher {
            Launcher::Python => self.find_python(),
            Launcher::Named(name) => Some(
                self.system
                    .which(name)
                    .unwrap_or_else(|| PathBuf::from(name)),
            ),
        }
    }

    /// Run `steps` in order; returns the method of the first one that succeeded
    fn run_first_success(&self, steps: &[PackageStep]) -> Option<&'static str> {
        for step in steps {
            let Some(program) = self.resolve_launcher(step.launcher) else {
                log::debug!("skipping {} step: no interpreter found", step.method);
                continue;
            };

            match self.system.run(&program, step.args, true) {
                Ok(true) => return Some(step.method),
                Ok(false) => log::debug!("{} {} failed", program.display(), step.args.join(" ")),
                Err(e) => log::debug!("{} unavailable: {}", program.display(), e),
            }
        }
        None
    }

    /// Return the extractor, installing it first if it is missing.
    ///
    /// The second tuple field names the install method when one was needed.
    pub fn ensure(&self) -> Result<(ExtractorCommand, Option<&'static str>)> {
        if let Some(command) = self.detect() {
            return Ok((command, None));
        }

        log::info!("yt-dlp not found, trying installers");

        let method = self
            .run_first_success(INSTALL_STEPS)
            .ok_or_else(|| HarvestError::install("every yt-dlp install method failed"))?;

        log::info!("yt-dlp installed via {}", method);

        let command = self.detect().ok_or_else(|| {
            HarvestError::tool_not_found(format!(
                "yt-dlp was installed via {} but cannot be found; check that ~/.local/bin is on PATH",
                method
            ))
        })?;

        Ok((command, Some(method)))
    }

    /// Remove yt-dlp with whichever installer accepts the request
    pub fn uninstall(&self) -> Result<&'static str> {
        self.run_first_success(UNINSTALL_STEPS)
            .ok_or_else(|| HarvestError::install("could not uninstall yt-dlp"))
    }

    /// Manual install instructions for when every automatic method failed
    pub fn manual_instructions(&self) -> Vec<&'static str> {
        match self.platform {
            Platform::MacOs => vec![
                "  Option 1 (recommended for Mac):",
                "    brew install yt-dlp",
                "  Option 2:",
                "    pipx install yt-dlp",
                "  Option 3:",
                "    pip3 install --user --break-system-packages yt-dlp",
            ],
            Platform::Windows => vec!["    pip install yt-dlp"],
            Platform::OtherUnix => vec!["    pip3 install --user yt-dlp"],
        }
    }
}

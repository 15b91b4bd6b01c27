// SystemOps - process, PATH and network access used by the bootstrapper
//
// Everything the install strategies touch on the host goes through this trait
// so they can be exercised against a scripted implementation in tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{HarvestError, Result};

const USER_AGENT: &str = concat!("mediaharvester/", env!("CARGO_PKG_VERSION"));

pub trait SystemOps {
    /// Run a program to completion. `Ok(false)` means it ran and failed;
    /// `Err` means it could not be started at all.
    fn run(&self, program: &Path, args: &[&str], quiet: bool) -> Result<bool>;

    /// Run a program and return its stdout if it exited successfully
    fn capture(&self, program: &Path, args: &[&str]) -> Result<String>;

    /// Resolve a program name against PATH
    fn which(&self, program: &str) -> Option<PathBuf>;

    /// Download a resource into memory
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// The real host: `std::process`, `which` and blocking `reqwest`
#[derive(Debug, Default, Clone, Copy)]
pub struct HostSystem;

impl SystemOps for HostSystem {
    fn run(&self, program: &Path, args: &[&str], quiet: bool) -> Result<bool> {
        log::debug!("running {} {}", program.display(), args.join(" "));

        let mut cmd = Command::new(program);
        cmd.args(args);
        if quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status()?;
        log::debug!("{} exited with {}", program.display(), status);

        Ok(status.success())
    }

    fn capture(&self, program: &Path, args: &[&str]) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(HarvestError::other(format!(
                "{} {} failed with status: {}",
                program.display(),
                args.join(" "),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::info!("downloading {}", url);

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None)
            .build()?;

        let response = client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?.to_vec();

        log::info!("downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}

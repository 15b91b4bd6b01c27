use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use crossterm::{cursor, execute};
use std::io;
use std::path::PathBuf;
use std::process;

use mediaharvester::commands::{self, download, ffmpeg, uninstall, validate, Session};
use mediaharvester::core::extractor::{DownloadMode, YtDlpExtractor};
use mediaharvester::core::paths::AppPaths;
use mediaharvester::core::url_list::{create_url_file, load_urls};
use mediaharvester::core::{ExtractorCommand, FFmpegManager, HostSystem, SystemOps, YtDlpManager};
use mediaharvester::platform::Platform;
use mediaharvester::ui::{self, clear_screen, TerminalPrompter};
use mediaharvester::{init_logging, Settings};

fn build_cli() -> Command {
    Command::new("mediaharvester")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Batch-download videos and MP3s from a list of URLs")
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .help("Base directory for urls.txt, video/, audio/ and bin/ (default: program directory)"),
        )
        .arg(
            Arg::new("urls")
                .long("urls")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .help("URL list to read instead of <DIR>/urls.txt"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("validate").about("Check every URL without downloading"))
        .subcommand(Command::new("video").about("Download every URL as video"))
        .subcommand(Command::new("audio").about("Download every URL as MP3 (requires FFmpeg)"))
        .subcommand(Command::new("ffmpeg").about("Show the installed FFmpeg or install one"))
        .subcommand(Command::new("uninstall").about("Remove yt-dlp and/or the local FFmpeg"))
}

fn main() {
    install_broken_pipe_hook();

    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        if is_broken_pipe(&e) {
            process::exit(0);
        }
        println!();
        println!("{} {:#}", "Unexpected error:".red(), e);
        process::exit(1);
    }
}

/// Exit quietly when stdout is closed under us (e.g. piped into `head`)
fn install_broken_pipe_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("");

        if payload.contains("Broken pipe") {
            process::exit(0);
        }
        default_hook(info);
    }));
}

fn is_broken_pipe(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}

fn run(matches: &ArgMatches) -> Result<()> {
    ctrlc::set_handler(|| {
        let _ = execute!(io::stdout(), cursor::Show);
        println!();
        println!();
        println!("Interrupted by user. Goodbye!");
        process::exit(0);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let paths = AppPaths::resolve(
        matches.get_one::<PathBuf>("dir").map(PathBuf::as_path),
        matches.get_one::<PathBuf>("urls").map(PathBuf::as_path),
    )?;
    log::debug!("{} host, using {:?}", Platform::current().name(), paths);

    let system = HostSystem;

    // Dependency management works without yt-dlp or a URL list
    match matches.subcommand() {
        Some(("ffmpeg", _)) => {
            let manager = FFmpegManager::new(&system, paths.bin_dir.clone());
            ffmpeg::execute(&manager, &mut TerminalPrompter::without_pause())?;
            return Ok(());
        }
        Some(("uninstall", _)) => {
            let yt_dlp = YtDlpManager::new(&system);
            let manager = FFmpegManager::new(&system, paths.bin_dir.clone());
            uninstall::execute(&yt_dlp, &manager, &mut TerminalPrompter::without_pause())?;
            return Ok(());
        }
        _ => {}
    }

    let interactive = matches.subcommand().is_none();
    if interactive {
        clear_screen();
    }

    let Some(command) = bootstrap_extractor(&system) else {
        return Ok(());
    };

    if !paths.url_file.exists() {
        create_url_file(&paths.url_file)?;
        println!("Created {}", url_file_name(&paths));
        println!("Add YouTube URLs to it, then run again.");
        return Ok(());
    }

    let Some(groups) = load_urls(&paths.url_file)? else {
        println!(
            "No valid URLs in {} - add some and run again.",
            url_file_name(&paths)
        );
        return Ok(());
    };

    let settings = Settings::load()?;
    let extractor = YtDlpExtractor::new(command, settings.clone());
    let mut prompter = if interactive {
        TerminalPrompter::new()
    } else {
        TerminalPrompter::without_pause()
    };

    let mut session = Session::new(paths, groups, settings, &system, &extractor, &mut prompter);

    match matches.subcommand() {
        Some(("validate", _)) => {
            validate::execute(&mut session)?;
        }
        Some(("video", _)) => {
            download::execute(&mut session, DownloadMode::Video)?;
        }
        Some(("audio", _)) => {
            download::execute(&mut session, DownloadMode::Audio)?;
        }
        _ => {
            commands::menu(&mut session)?;
        }
    }

    Ok(())
}

fn url_file_name(paths: &AppPaths) -> String {
    paths
        .url_file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| paths.url_file.display().to_string())
}

/// Find yt-dlp, installing it on first run.
///
/// `None` means every install method failed and the manual steps were shown.
fn bootstrap_extractor(system: &dyn SystemOps) -> Option<ExtractorCommand> {
    let manager = YtDlpManager::new(system);

    let command = match manager.detect() {
        Some(command) => command,
        None => {
            println!("First run - installing dependencies...");

            match manager.ensure() {
                Ok((command, method)) => {
                    if let Some(method) = method {
                        println!("{}", format!("Done! (via {})", method).green());
                        println!();
                    }
                    command
                }
                Err(e) => {
                    ui::error("Error: Failed to auto-install yt-dlp.");
                    ui::dimmed(&e.to_string());
                    println!();
                    ui::warn("Please install manually using one of these methods:");
                    for line in manager.manual_instructions() {
                        println!("{}", line);
                    }
                    return None;
                }
            }
        }
    };

    match manager.version(&command) {
        Ok(version) => log::debug!("yt-dlp {} via {:?}", version, command),
        Err(e) => log::warn!("could not read yt-dlp version: {}", e),
    }

    Some(command)
}

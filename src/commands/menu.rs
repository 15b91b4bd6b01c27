// Interactive main menu

use anyhow::Result;
use colored::Colorize;

use crate::commands::session::Session;
use crate::commands::{download, ffmpeg, uninstall, validate};
use crate::core::extractor::DownloadMode;
use crate::ui::{self, clear_screen, print_banner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Validate,
    DownloadVideo,
    DownloadAudio,
    Transcoder,
    Uninstall,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Validate),
            "2" => Some(MenuChoice::DownloadVideo),
            "3" => Some(MenuChoice::DownloadAudio),
            "4" => Some(MenuChoice::Transcoder),
            "5" => Some(MenuChoice::Uninstall),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn print_header(session: &Session<'_>) {
    let urls = session.groups.url_count().to_string();
    let folders = session.groups.named_folder_count();

    if folders > 0 {
        println!(
            "{}{}{}{}{}",
            "Found ".dimmed(),
            urls.yellow(),
            " URL(s) in ".dimmed(),
            folders.to_string().yellow(),
            " folder(s)".dimmed()
        );
    } else {
        println!(
            "{}{}{}",
            "Found ".dimmed(),
            urls.yellow(),
            " URL(s) in urls.txt".dimmed()
        );
    }
    println!();
}

fn print_options(session: &Session<'_>) {
    let label = session.transcoder.status_label();
    let status = if session.transcoder.is_available() {
        label.green()
    } else {
        label.red()
    };

    println!("{}", "What would you like to do?".bold());
    println!("  {} Validate URLs", "1.".cyan());
    println!("  {} Download all videos", "2.".cyan());
    println!(
        "  {} Download as MP3 {}{}{}",
        "3.".cyan(),
        "[FFmpeg: ".dimmed(),
        status,
        "]".dimmed()
    );
    println!(
        "  {} Install/check FFmpeg {}{}{}",
        "4.".cyan(),
        "[".dimmed(),
        status,
        "]".dimmed()
    );
    println!("  {} Uninstall dependencies", "5.".cyan());
    println!("  {} Exit", "6.".cyan());
    println!();
}

/// Redraw the menu until a valid choice is entered
pub fn read_choice(session: &mut Session<'_>) -> Result<MenuChoice> {
    loop {
        clear_screen();
        print_banner();
        print_header(session);
        print_options(session);

        let answer = session.prompter.ask("Enter choice (1-6)")?;
        if let Some(choice) = MenuChoice::parse(&answer) {
            return Ok(choice);
        }

        ui::error("Invalid choice. Please enter 1-6.");
        println!();
    }
}

/// Run one menu action. Returns `false` once the user chose to exit.
pub fn dispatch(session: &mut Session<'_>, choice: MenuChoice) -> Result<bool> {
    match choice {
        MenuChoice::Validate => {
            validate::execute(session)?;
        }
        MenuChoice::DownloadVideo => {
            download::execute(session, DownloadMode::Video)?;
        }
        MenuChoice::DownloadAudio => {
            download::execute(session, DownloadMode::Audio)?;
        }
        MenuChoice::Transcoder => {
            let manager = session.ffmpeg_manager();
            ffmpeg::execute(&manager, &mut *session.prompter)?;
            session.refresh_transcoder();
        }
        MenuChoice::Uninstall => {
            let yt_dlp = session.yt_dlp_manager();
            let manager = session.ffmpeg_manager();
            uninstall::execute(&yt_dlp, &manager, &mut *session.prompter)?;
            session.refresh_transcoder();
        }
        MenuChoice::Exit => {
            println!("{}", "Goodbye!".purple());
            return Ok(false);
        }
    }
    Ok(true)
}

/// Main menu loop
pub fn run(session: &mut Session<'_>) -> Result<()> {
    loop {
        let choice = read_choice(session)?;
        log::debug!("menu choice: {:?}", choice);

        if !dispatch(session, choice)? {
            return Ok(());
        }
    }
}

// Screen header shown at startup and above the main menu

use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, IsTerminal};

const LOGO: &[&str] = &[
    r"  __  __          _ _         _   _                           _            ",
    r" |  \/  | ___  __| (_) __ _  | | | | __ _ _ ____   _____  ___| |_ ___ _ __ ",
    r" | |\/| |/ _ \/ _` | |/ _` | | |_| |/ _` | '__\ \ / / _ \/ __| __/ _ \ '__|",
    r" | |  | |  __/ (_| | | (_| | |  _  | (_| | |   \ V /  __/\__ \ ||  __/ |   ",
    r" |_|  |_|\___|\__,_|_|\__,_| |_| |_|\__,_|_|    \_/ \___||___/\__\___|_|   ",
];

/// Clear the terminal and park the cursor at the top-left corner.
///
/// Does nothing when stdout is not a terminal.
pub fn clear_screen() {
    if !io::stdout().is_terminal() {
        return;
    }
    if let Err(e) = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
        log::debug!("could not clear screen: {}", e);
    }
}

pub fn print_banner() {
    println!();
    for line in LOGO {
        println!("{}", line.cyan().bold());
    }
    println!(
        "{}",
        format!("{:>75}", format!("v{}", env!("CARGO_PKG_VERSION"))).dimmed()
    );
    println!();
}

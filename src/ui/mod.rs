// UI and terminal output module

pub mod banner;
pub mod progress;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use banner::{clear_screen, print_banner};
pub use progress::clear_line;
pub use prompts::{bold, dimmed, error, info, success, warn, Prompter, TerminalPrompter};

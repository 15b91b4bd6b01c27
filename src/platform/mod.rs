// Platform-specific code module

pub mod host;

pub use host::{program_dir, set_executable, Platform};

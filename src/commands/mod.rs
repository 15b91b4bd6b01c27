// Command handlers module
pub mod download;
pub mod ffmpeg;
pub mod menu;
pub mod session;
pub mod uninstall;
pub mod validate;

// Re-exports for cleaner imports
pub use menu::run as menu;
pub use session::Session;

// Core business logic module

pub mod batch;
pub mod extractor;
pub mod failure;
pub mod ffmpeg_manager;
pub mod paths;
pub mod settings;
pub mod system;
pub mod url_list;
pub mod url_validator;
pub mod yt_dlp_manager;

// Re-export commonly used items
pub use batch::{download_all, validate_all, BatchOptions, DownloadOutcome, ValidationReport};
pub use extractor::{DownloadMode, DownloadRequest, MediaExtractor, MediaInfo, YtDlpExtractor};
pub use ffmpeg_manager::{FFmpegManager, TranscoderState};
pub use paths::AppPaths;
pub use system::{HostSystem, SystemOps};
pub use url_list::FolderGroups;
pub use yt_dlp_manager::{ExtractorCommand, YtDlpManager};

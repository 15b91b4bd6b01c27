// State threaded through the interactive menu

use crate::core::extractor::MediaExtractor;
use crate::core::ffmpeg_manager::{FFmpegManager, TranscoderState};
use crate::core::paths::AppPaths;
use crate::core::settings::Settings;
use crate::core::system::SystemOps;
use crate::core::url_list::FolderGroups;
use crate::core::yt_dlp_manager::YtDlpManager;
use crate::platform::Platform;
use crate::ui::Prompter;

/// Everything a menu action may read or change.
///
/// The URL groups are loaded once at startup and never reloaded. The
/// transcoder state is re-derived after any action that can change it.
pub struct Session<'a> {
    pub paths: AppPaths,
    pub groups: FolderGroups,
    pub settings: Settings,
    pub platform: Platform,
    pub transcoder: TranscoderState,
    pub system: &'a dyn SystemOps,
    pub extractor: &'a dyn MediaExtractor,
    pub prompter: &'a mut dyn Prompter,
}

impl<'a> Session<'a> {
    pub fn new(
        paths: AppPaths,
        groups: FolderGroups,
        settings: Settings,
        system: &'a dyn SystemOps,
        extractor: &'a dyn MediaExtractor,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        let mut session = Self {
            paths,
            groups,
            settings,
            platform: Platform::current(),
            transcoder: TranscoderState::missing(),
            system,
            extractor,
            prompter,
        };
        session.refresh_transcoder();
        session
    }

    /// Switch platform (tests) and re-detect the transcoder for it
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self.refresh_transcoder();
        self
    }

    pub fn ffmpeg_manager(&self) -> FFmpegManager<'a> {
        FFmpegManager::new(self.system, self.paths.bin_dir.clone()).with_platform(self.platform)
    }

    pub fn yt_dlp_manager(&self) -> YtDlpManager<'a> {
        YtDlpManager::new(self.system).with_platform(self.platform)
    }

    pub fn refresh_transcoder(&mut self) {
        self.transcoder = self.ffmpeg_manager().detect();
        log::debug!("transcoder: {:?}", self.transcoder);
    }
}

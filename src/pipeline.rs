//! Two-stage orchestration: acquire, then split
//!
//! ```text
//! Acquiring --ok--> Splitting --ok--> Done
//!     |                 |
//!     +------err--------+-----------> Failed
//! ```

use crate::acquirer::{self, Downloader};
use crate::splitter::{self, SplitOutputs, Transcoder};
use crate::utils::config::PipelineConfig;
use crate::utils::error::PipelineError;
use crate::utils::paths::RunPaths;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Pipeline position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Acquiring,
    Splitting,
    Done,
    Failed,
}

impl PipelineState {
    /// Forward-only transitions; nothing leaves `Done` or `Failed`
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        matches!(
            (self, next),
            (PipelineState::Acquiring, PipelineState::Splitting)
                | (PipelineState::Acquiring, PipelineState::Failed)
                | (PipelineState::Splitting, PipelineState::Done)
                | (PipelineState::Splitting, PipelineState::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineState::Acquiring => "acquiring",
            PipelineState::Splitting => "splitting",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl PipelineError {
    /// State the pipeline was in when it failed
    pub fn stage(&self) -> PipelineState {
        match self {
            PipelineError::Acquisition(_) => PipelineState::Acquiring,
            PipelineError::Splitting(_) => PipelineState::Splitting,
        }
    }
}

/// Downloader + transcoder + settings for one or more runs
pub struct Pipeline<D, T> {
    downloader: D,
    transcoder: T,
    config: PipelineConfig,
    ffmpeg_location: Option<PathBuf>,
    console: bool,
}

impl<D: Downloader, T: Transcoder> Pipeline<D, T> {
    pub fn new(downloader: D, transcoder: T, config: PipelineConfig) -> Self {
        Self {
            downloader,
            transcoder,
            config,
            ffmpeg_location: None,
            console: true,
        }
    }

    /// ffmpeg binary the downloader should use for its own post-processing
    pub fn with_ffmpeg_location(mut self, ffmpeg: impl Into<PathBuf>) -> Self {
        self.ffmpeg_location = Some(ffmpeg.into());
        self
    }

    /// Suppress the user-facing progress lines on stdout
    pub fn quiet(mut self) -> Self {
        self.console = false;
        self
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    /// Run both stages for `url` inside `paths`.
    ///
    /// The splitter only runs after a successful acquisition.
    pub async fn run(&self, url: &str, paths: &RunPaths) -> Result<SplitOutputs, PipelineError> {
        let mut state = PipelineState::Acquiring;
        self.announce("Starting video download and split process...");

        let mut options = self.config.download_options();
        options.ffmpeg_location = self.ffmpeg_location.clone();

        self.announce("Downloading video...");
        let media = match acquirer::acquire(&self.downloader, url, paths.intermediate(), &options).await
        {
            Ok(media) => media,
            Err(e) => {
                advance(&mut state, PipelineState::Failed);
                return Err(e.into());
            }
        };
        self.announce("Video downloaded successfully.");

        advance(&mut state, PipelineState::Splitting);
        self.announce("Splitting video into separate video and audio files...");
        let outputs =
            match splitter::split(&self.transcoder, &media.path, &self.config.split_options()).await {
                Ok(outputs) => outputs,
                Err(e) => {
                    advance(&mut state, PipelineState::Failed);
                    return Err(e.into());
                }
            };

        advance(&mut state, PipelineState::Done);
        self.announce("Video split successfully.");
        self.announce(&format!("Video file: {}", outputs.video.display()));
        self.announce(&format!("Audio file: {}", outputs.audio.display()));
        self.announce("Process completed successfully.");
        info!(
            "Pipeline finished: {} / {}",
            outputs.video.display(),
            outputs.audio.display()
        );

        Ok(outputs)
    }

    fn announce(&self, line: &str) {
        if self.console {
            println!("{}", line);
        }
    }
}

fn advance(state: &mut PipelineState, next: PipelineState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal pipeline transition {} -> {}",
        state,
        next
    );
    debug!("Pipeline {} -> {}", state, next);
    *state = next;
}

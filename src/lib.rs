//! ytsplit library

pub mod acquirer;
pub mod pipeline;
pub mod splitter;
pub mod utils;

// Re-export main types for easier use
pub use acquirer::{AcquiredMedia, DownloadOptions, Downloader, YtDlpDownloader};
pub use pipeline::{Pipeline, PipelineState};
pub use splitter::{FfmpegTranscoder, SplitOptions, SplitOutputs, TranscodeJob, Transcoder};
pub use utils::{PartialOutputPolicy, PipelineConfig, PipelineError, RunPaths};

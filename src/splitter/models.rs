//! Splitting inputs and outputs

use crate::utils::config::PartialOutputPolicy;
use crate::utils::error::ExtractStep;
use crate::utils::paths::derived_path;
use std::path::{Path, PathBuf};

/// A single transcoder invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeJob {
    /// Keep the first video stream, re-encode it, drop audio
    VideoOnly { output: PathBuf, codec: String },
    /// Keep the first audio stream, re-encode it, drop video
    AudioOnly { output: PathBuf, codec: String },
}

impl TranscodeJob {
    pub fn output(&self) -> &Path {
        match self {
            TranscodeJob::VideoOnly { output, .. } | TranscodeJob::AudioOnly { output, .. } => {
                output
            }
        }
    }

    pub fn step(&self) -> ExtractStep {
        match self {
            TranscodeJob::VideoOnly { .. } => ExtractStep::Video,
            TranscodeJob::AudioOnly { .. } => ExtractStep::Audio,
        }
    }
}

/// Codecs, extensions and failure policy for the splitting stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub video_codec: String,
    pub audio_codec: String,
    pub video_extension: String,
    pub audio_extension: String,
    pub partial_policy: PartialOutputPolicy,
}

impl SplitOptions {
    /// Output paths for `input`; they depend on nothing but its file name
    pub fn outputs_for(&self, input: &Path) -> SplitOutputs {
        SplitOutputs {
            video: derived_path(input, "video", &self.video_extension),
            audio: derived_path(input, "audio", &self.audio_extension),
        }
    }

    pub fn video_job(&self, outputs: &SplitOutputs) -> TranscodeJob {
        TranscodeJob::VideoOnly {
            output: outputs.video.clone(),
            codec: self.video_codec.clone(),
        }
    }

    pub fn audio_job(&self, outputs: &SplitOutputs) -> TranscodeJob {
        TranscodeJob::AudioOnly {
            output: outputs.audio.clone(),
            codec: self.audio_codec.clone(),
        }
    }
}

/// The two terminal artifacts of a successful split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutputs {
    pub video: PathBuf,
    pub audio: PathBuf,
}

//! Error handling for ytsplit
//!
//! Each stage reports its own error type; `PipelineError` wraps them with the
//! stage that failed so the binary can pick an exit code and message.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two extraction steps of the splitter ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStep {
    Video,
    Audio,
}

impl ExtractStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractStep::Video => "video",
            ExtractStep::Audio => "audio",
        }
    }
}

impl fmt::Display for ExtractStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Failure to locate an external tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0} not found. Please install {0}")]
    NotFound(&'static str),

    #[error("{} is not an executable file", .0.display())]
    NotExecutable(PathBuf),
}

/// Failure while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Acquisition stage failure (downloader collaborator)
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("Invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("Failed to launch yt-dlp")]
    Spawn(#[source] std::io::Error),

    #[error("yt-dlp failed with {}: {diagnostic}", exit_label(.code))]
    Failed {
        code: Option<i32>,
        diagnostic: String,
    },

    #[error("Downloaded file {} does not exist", .0.display())]
    MissingOutput(PathBuf),
}

/// Single transcoder invocation failure
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Failed to launch ffmpeg")]
    Spawn(#[source] std::io::Error),

    #[error("ffmpeg failed with {}: {diagnostic}", exit_label(.code))]
    Failed {
        code: Option<i32>,
        diagnostic: String,
    },
}

impl TranscodeError {
    /// Captured diagnostic text, if the transcoder ran at all
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            TranscodeError::Failed { diagnostic, .. } => Some(diagnostic),
            TranscodeError::Spawn(_) => None,
        }
    }
}

/// Splitting stage failure
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Input file {} not found", .0.display())]
    MissingInput(PathBuf),

    /// `left_on_disk` lists derived files that still exist after the
    /// partial-output policy was applied.
    #[error("{step} extraction failed")]
    Extraction {
        step: ExtractStep,
        #[source]
        source: TranscodeError,
        left_on_disk: Vec<PathBuf>,
    },

    #[error("Failed to remove input file {}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    /// The extraction step that failed, if the failure was an extraction
    pub fn step(&self) -> Option<ExtractStep> {
        match self {
            SplitError::Extraction { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Top-level pipeline failure, tagged by stage
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error downloading video")]
    Acquisition(#[from] AcquireError),

    #[error("Error splitting video")]
    Splitting(#[from] SplitError),
}

impl PipelineError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Acquisition(_) => 1,
            PipelineError::Splitting(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_includes_diagnostic() {
        let err = AcquireError::Failed {
            code: Some(1),
            diagnostic: "ERROR: Unsupported URL".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Unsupported URL"));
    }

    #[test]
    fn test_signal_exit_label() {
        let err = TranscodeError::Failed {
            code: None,
            diagnostic: String::new(),
        };
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn test_split_error_reports_step() {
        let err = SplitError::Extraction {
            step: ExtractStep::Audio,
            source: TranscodeError::Failed {
                code: Some(1),
                diagnostic: "Unknown encoder".to_string(),
            },
            left_on_disk: Vec::new(),
        };
        assert_eq!(err.step(), Some(ExtractStep::Audio));
        assert_eq!(err.to_string(), "audio extraction failed");
        assert_eq!(SplitError::MissingInput(PathBuf::from("x.mp4")).step(), None);
    }

    #[test]
    fn test_both_stages_exit_with_one() {
        let acquire: PipelineError = AcquireError::InvalidUrl(String::new()).into();
        let split: PipelineError = SplitError::MissingInput(PathBuf::from("x.mp4")).into();
        assert_eq!(acquire.exit_code(), 1);
        assert_eq!(split.exit_code(), 1);
    }
}

//! ffmpeg wrapper for stream extraction

use crate::splitter::models::TranscodeJob;
use crate::splitter::traits::Transcoder;
use crate::utils::error::{ToolError, TranscodeError};
use crate::utils::tools::{self, Tool};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error};

/// Transcoder backed by the ffmpeg executable
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
}

impl FfmpegTranscoder {
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ToolError> {
        let ffmpeg_path = tools::locate(Tool::Ffmpeg, explicit)?;
        Ok(Self { ffmpeg_path })
    }

    pub fn with_binary(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// `-y` overwrites existing outputs, `-nostdin` keeps ffmpeg from
    /// waiting on the terminal.
    pub fn build_args(input: &Path, job: &TranscodeJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-y", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(input.as_os_str().to_os_string());

        let (map, codec_flag, codec, drop_flag) = match job {
            TranscodeJob::VideoOnly { codec, .. } => ("0:v:0", "-c:v", codec, "-an"),
            TranscodeJob::AudioOnly { codec, .. } => ("0:a:0", "-c:a", codec, "-vn"),
        };
        args.push("-map".into());
        args.push(map.into());
        args.push(codec_flag.into());
        args.push(codec.clone().into());
        args.push(drop_flag.into());
        args.push(job.output().as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn id(&self) -> &'static str {
        "ffmpeg"
    }

    async fn transcode(&self, input: &Path, job: &TranscodeJob) -> Result<(), TranscodeError> {
        debug!(
            "Extracting {} from {} into {}",
            job.step(),
            input.display(),
            job.output().display()
        );

        let output = AsyncCommand::new(&self.ffmpeg_path)
            .args(Self::build_args(input, job))
            .output()
            .await
            .map_err(TranscodeError::Spawn)?;

        if !output.status.success() {
            let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("ffmpeg {} extraction failed: {}", job.step(), diagnostic);
            return Err(TranscodeError::Failed {
                code: output.status.code(),
                diagnostic,
            });
        }

        Ok(())
    }
}

//! yt-dlp wrapper for media acquisition
//!
//! Downloads the selected stream(s) into a caller-chosen path and has yt-dlp
//! run an ffmpeg stream copy over the result that transcodes the audio track.
//! The copy step runs whether or not the format needed a merge.

use crate::acquirer::models::{AcquiredMedia, DownloadOptions};
use crate::acquirer::traits::Downloader;
use crate::utils::error::{AcquireError, ToolError};
use crate::utils::tools::{self, Tool};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, warn};

/// Downloader backed by the yt-dlp executable
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    ytdlp_path: PathBuf,
}

impl YtDlpDownloader {
    /// Find yt-dlp (explicit path first, then the usual places)
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ToolError> {
        let ytdlp_path = tools::locate(Tool::YtDlp, explicit)?;
        Ok(Self { ytdlp_path })
    }

    /// Use a known binary without any lookup
    pub fn with_binary(ytdlp_path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }

    /// Command line for one download.
    ///
    /// `--print after_move:filepath` makes yt-dlp report the final file once
    /// all post-processing is done; `--no-simulate` keeps `--print` from
    /// turning the run into a dry run.
    pub fn build_args(url: &str, target: &Path, options: &DownloadOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--no-playlist",
            "--no-progress",
            "--no-warnings",
            "--force-overwrites",
            "-f",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push(options.format.clone().into());
        args.push("--merge-output-format".into());
        args.push(options.merge_container.clone().into());
        // Merger only runs for `a+b` selections; CopyStream runs on every file
        args.push("--use-postprocessor".into());
        args.push("FFmpegCopyStream".into());
        args.push("--postprocessor-args".into());
        args.push(format!("CopyStream+ffmpeg_o:{}", options.audio_postprocess_args()).into());

        if let Some(ffmpeg) = &options.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(ffmpeg.clone().into_os_string());
        }

        args.push("-o".into());
        args.push(target.as_os_str().to_os_string());
        args.push("--print".into());
        args.push("after_move:filepath".into());
        args.push("--no-simulate".into());
        // End of options: a URL starting with '-' must not be read as a flag
        args.push("--".into());
        args.push(url.into());
        args
    }
}

#[async_trait]
impl Downloader for YtDlpDownloader {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(
        &self,
        url: &str,
        target: &Path,
        options: &DownloadOptions,
    ) -> Result<AcquiredMedia, AcquireError> {
        debug!("Downloading {} to {}", url, target.display());

        let output = AsyncCommand::new(&self.ytdlp_path)
            .args(Self::build_args(url, target, options))
            .output()
            .await
            .map_err(AcquireError::Spawn)?;

        if !output.status.success() {
            let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("yt-dlp download failed: {}", diagnostic);
            return Err(AcquireError::Failed {
                code: output.status.code(),
                diagnostic,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = match reported_path(&stdout) {
            Some(path) => path,
            None => {
                warn!("yt-dlp did not report a file path, assuming {}", target.display());
                target.to_path_buf()
            }
        };

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(AcquireError::MissingOutput(path));
        }

        Ok(AcquiredMedia { path })
    }
}

/// Last non-empty stdout line, which is where `--print after_move:filepath`
/// ends up
fn reported_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

//! Splitting stage: combined file -> video-only + audio-only files

pub mod ffmpeg;
pub mod models;
pub mod traits;

pub use ffmpeg::FfmpegTranscoder;
pub use models::{SplitOptions, SplitOutputs, TranscodeJob};
pub use traits::Transcoder;

use crate::utils::config::PartialOutputPolicy;
use crate::utils::error::SplitError;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, error, info, warn};

/// Split `input` into its video-only and audio-only derivatives.
///
/// Video is extracted first and audio only after it succeeded. The input is
/// removed only once both outputs exist; on any extraction failure it stays
/// where it is and `options.partial_policy` decides what happens to the
/// derived files this run wrote. A file left by an earlier run that the
/// failing step never touched is neither rolled back nor reported.
pub async fn split<T: Transcoder + ?Sized>(
    transcoder: &T,
    input: &Path,
    options: &SplitOptions,
) -> Result<SplitOutputs, SplitError> {
    if !tokio::fs::try_exists(input).await.unwrap_or(false) {
        return Err(SplitError::MissingInput(input.to_path_buf()));
    }

    let outputs = options.outputs_for(input);
    let jobs = [options.video_job(&outputs), options.audio_job(&outputs)];

    let mut written: Vec<&Path> = Vec::new();

    for job in &jobs {
        info!("Extracting {} into {}", job.step(), job.output().display());
        let before = fingerprint(job.output()).await;

        if let Err(source) = transcoder.transcode(input, job).await {
            if let Some(diagnostic) = source.diagnostic() {
                error!("{} {} extraction: {}", transcoder.id(), job.step(), diagnostic);
            }
            if fingerprint(job.output()).await != before {
                written.push(job.output());
            }
            let left_on_disk = settle_partial(&written, options.partial_policy).await;
            return Err(SplitError::Extraction {
                step: job.step(),
                source,
                left_on_disk,
            });
        }
        written.push(job.output());
    }

    tokio::fs::remove_file(input)
        .await
        .map_err(|source| SplitError::Cleanup {
            path: input.to_path_buf(),
            source,
        })?;
    debug!("Removed {}", input.display());

    Ok(outputs)
}

/// Modification time and size of `path`, `None` when it does not exist
async fn fingerprint(path: &Path) -> Option<(Option<SystemTime>, u64)> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    Some((metadata.modified().ok(), metadata.len()))
}

/// Apply the partial-output policy to the derived files of a failed split and
/// report which of them are still on disk.
async fn settle_partial(paths: &[&Path], policy: PartialOutputPolicy) -> Vec<PathBuf> {
    debug!("Settling {} partial output(s), policy: {}", paths.len(), policy.as_str());
    let mut left = Vec::new();

    for path in paths {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            continue;
        }

        match policy {
            PartialOutputPolicy::Retain => {
                warn!("Leaving partial output {}", path.display());
                left.push(path.to_path_buf());
            }
            PartialOutputPolicy::Rollback => match tokio::fs::remove_file(path).await {
                Ok(()) => debug!("Rolled back {}", path.display()),
                Err(e) => {
                    warn!("Failed to roll back {}: {}", path.display(), e);
                    left.push(path.to_path_buf());
                }
            },
        }
    }

    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_settle_retain_reports_existing_only() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("a_video.mp4");
        let absent = temp.path().join("a_audio.mp3");
        std::fs::write(&present, b"video").unwrap();

        let left = settle_partial(&[present.as_path(), absent.as_path()], PartialOutputPolicy::Retain).await;
        assert_eq!(left, vec![present.clone()]);
        assert!(present.exists());
    }

    #[tokio::test]
    async fn test_settle_rollback_removes_files() {
        let temp = TempDir::new().unwrap();
        let video = temp.path().join("a_video.mp4");
        let audio = temp.path().join("a_audio.mp3");
        std::fs::write(&video, b"video").unwrap();
        std::fs::write(&audio, b"partial").unwrap();

        let left = settle_partial(&[video.as_path(), audio.as_path()], PartialOutputPolicy::Rollback).await;
        assert!(left.is_empty());
        assert!(!video.exists());
        assert!(!audio.exists());
    }

    #[tokio::test]
    async fn test_fingerprint_tracks_writes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a_video.mp4");
        assert_eq!(fingerprint(&path).await, None);

        std::fs::write(&path, b"video").unwrap();
        let first = fingerprint(&path).await;
        assert!(first.is_some());
        assert_eq!(fingerprint(&path).await, first);

        std::fs::write(&path, b"longer video").unwrap();
        assert_ne!(fingerprint(&path).await, first);
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_transcoding() {
        struct Unreachable;

        #[async_trait::async_trait]
        impl Transcoder for Unreachable {
            fn id(&self) -> &'static str {
                "unreachable"
            }

            async fn transcode(
                &self,
                _input: &Path,
                _job: &TranscodeJob,
            ) -> Result<(), crate::utils::error::TranscodeError> {
                panic!("transcoder must not run without input");
            }
        }

        let temp = TempDir::new().unwrap();
        let input = temp.path().join("youtube_video.mp4");
        let options = crate::utils::config::PipelineConfig::default().split_options();

        let err = split(&Unreachable, &input, &options).await.unwrap_err();
        assert!(matches!(err, SplitError::MissingInput(p) if p == input));
    }
}

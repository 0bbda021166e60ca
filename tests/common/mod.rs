//! In-process fakes for the two collaborators.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use ytsplit::utils::{AcquireError, ExtractStep, TranscodeError};
use ytsplit::{AcquiredMedia, DownloadOptions, Downloader, TranscodeJob, Transcoder};

/// Writes a small combined file to the target, or fails like yt-dlp would.
pub struct FakeDownloader {
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDownloader {
    pub fn ok() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Downloader for FakeDownloader {
    fn id(&self) -> &'static str {
        "fake-downloader"
    }

    async fn download(
        &self,
        url: &str,
        target: &Path,
        _options: &DownloadOptions,
    ) -> Result<AcquiredMedia, AcquireError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(AcquireError::Failed {
                code: Some(1),
                diagnostic: format!("ERROR: Unsupported URL: {}", url),
            });
        }
        std::fs::write(target, format!("combined:{}", url)).unwrap();
        Ok(AcquiredMedia {
            path: target.to_path_buf(),
        })
    }
}

/// Records every job and writes its output, failing on a chosen step.
pub struct FakeTranscoder {
    pub fail_on: Option<ExtractStep>,
    /// Write a truncated output before failing, like an interrupted ffmpeg
    pub leave_partial: bool,
    pub jobs: Mutex<Vec<TranscodeJob>>,
}

impl FakeTranscoder {
    pub fn ok() -> Self {
        Self {
            fail_on: None,
            leave_partial: false,
            jobs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(step: ExtractStep) -> Self {
        Self {
            fail_on: Some(step),
            leave_partial: false,
            jobs: Mutex::new(Vec::new()),
        }
    }

    pub fn steps(&self) -> Vec<ExtractStep> {
        self.jobs.lock().unwrap().iter().map(|j| j.step()).collect()
    }
}

#[async_trait]
impl Transcoder for FakeTranscoder {
    fn id(&self) -> &'static str {
        "fake-transcoder"
    }

    async fn transcode(&self, input: &Path, job: &TranscodeJob) -> Result<(), TranscodeError> {
        self.jobs.lock().unwrap().push(job.clone());
        assert!(input.exists(), "transcoder input must exist");

        if self.fail_on == Some(job.step()) {
            if self.leave_partial {
                std::fs::write(job.output(), b"partial").unwrap();
            }
            return Err(TranscodeError::Failed {
                code: Some(1),
                diagnostic: format!("Conversion failed for {} stream", job.step()),
            });
        }

        std::fs::write(job.output(), job.step().as_str()).unwrap();
        Ok(())
    }
}

/// Sorted file names in `dir`
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn file(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

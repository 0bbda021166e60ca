//! Acquisition inputs and outputs

use std::path::PathBuf;

/// Options passed to the downloader for one acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Format preference string, e.g. `bv*+ba/b`
    pub format: String,
    /// Container separate video/audio streams are merged into
    pub merge_container: String,
    /// ffmpeg encoder the audio is transcoded with
    pub audio_codec: String,
    pub audio_bitrate_kbps: u32,
    /// ffmpeg binary the downloader should use for post-processing
    pub ffmpeg_location: Option<PathBuf>,
}

impl DownloadOptions {
    /// ffmpeg output arguments for the stream-copy pass: keep the video stream
    /// as-is, transcode audio to the configured codec and bitrate.
    pub fn audio_postprocess_args(&self) -> String {
        format!(
            "-c:v copy -c:a {} -b:a {}k",
            self.audio_codec, self.audio_bitrate_kbps
        )
    }
}

/// The combined media file a successful acquisition produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredMedia {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::PipelineConfig;

    #[test]
    fn test_postprocess_args_use_bitrate() {
        let options = PipelineConfig::default().download_options();
        assert_eq!(
            options.audio_postprocess_args(),
            "-c:v copy -c:a libmp3lame -b:a 192k"
        );
    }
}

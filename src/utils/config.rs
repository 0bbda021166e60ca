//! Pipeline configuration

use crate::acquirer::DownloadOptions;
use crate::splitter::SplitOptions;
use crate::utils::error::ConfigError;
use crate::utils::paths::DEFAULT_INTERMEDIATE_NAME;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline settings
///
/// Every field has a default, so a settings file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// yt-dlp format preference string
    pub format: String,

    /// Container yt-dlp merges separate streams into
    pub merge_container: String,

    /// Audio bitrate applied during acquisition (kbit/s)
    pub audio_bitrate_kbps: u32,

    /// Encoder for the video-only output
    pub video_codec: String,

    /// Encoder for the audio-only output (also used during acquisition)
    pub audio_codec: String,

    pub video_extension: String,
    pub audio_extension: String,

    /// Name of the intermediate combined file inside the working directory
    pub intermediate_name: String,

    /// What happens to derived files when splitting fails halfway
    pub partial_policy: PartialOutputPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            format: "bv*+ba/b".to_string(),
            merge_container: "mp4".to_string(),
            audio_bitrate_kbps: 192,
            video_codec: "libx264".to_string(),
            audio_codec: "libmp3lame".to_string(),
            video_extension: "mp4".to_string(),
            audio_extension: "mp3".to_string(),
            intermediate_name: DEFAULT_INTERMEDIATE_NAME.to_string(),
            partial_policy: PartialOutputPolicy::Retain,
        }
    }
}

impl PipelineConfig {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject settings the collaborators cannot act on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("format", &self.format),
            ("merge_container", &self.merge_container),
            ("video_codec", &self.video_codec),
            ("audio_codec", &self.audio_codec),
            ("video_extension", &self.video_extension),
            ("audio_extension", &self.audio_extension),
            ("intermediate_name", &self.intermediate_name),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }

        if self.audio_bitrate_kbps == 0 {
            return Err(ConfigError::Invalid(
                "audio_bitrate_kbps must be greater than zero".to_string(),
            ));
        }

        // The intermediate file always lives directly in the working directory
        let name = Path::new(&self.intermediate_name);
        if name.components().count() != 1 || name.file_name().is_none() {
            return Err(ConfigError::Invalid(format!(
                "intermediate_name must be a plain file name, got {:?}",
                self.intermediate_name
            )));
        }

        Ok(())
    }

    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            format: self.format.clone(),
            merge_container: self.merge_container.clone(),
            audio_codec: self.audio_codec.clone(),
            audio_bitrate_kbps: self.audio_bitrate_kbps,
            ffmpeg_location: None,
        }
    }

    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            video_codec: self.video_codec.clone(),
            audio_codec: self.audio_codec.clone(),
            video_extension: self.video_extension.clone(),
            audio_extension: self.audio_extension.clone(),
            partial_policy: self.partial_policy,
        }
    }
}

/// Partial-output policy for a failed split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialOutputPolicy {
    /// Leave whatever the successful step produced
    #[default]
    Retain,
    /// Delete derived files written by the failed run
    Rollback,
}

impl PartialOutputPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartialOutputPolicy::Retain => "retain",
            PartialOutputPolicy::Rollback => "rollback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.intermediate_name, "youtube_video.mp4");
        assert_eq!(config.audio_bitrate_kbps, 192);
        assert_eq!(config.partial_policy, PartialOutputPolicy::Retain);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ytsplit.json");
        std::fs::write(
            &path,
            r#"{ "audio_bitrate_kbps": 320, "partial_policy": "rollback" }"#,
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.audio_bitrate_kbps, 320);
        assert_eq!(config.partial_policy, PartialOutputPolicy::Rollback);
        assert_eq!(config.video_codec, "libx264");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = PipelineConfig::load(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = PipelineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PipelineConfig::default();
        config.audio_bitrate_kbps = 0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.video_codec = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.intermediate_name = "nested/youtube_video.mp4".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_options_follow_config() {
        let mut config = PipelineConfig::default();
        config.audio_codec = "libshine".to_string();
        config.partial_policy = PartialOutputPolicy::Rollback;

        assert_eq!(config.download_options().audio_codec, "libshine");
        let split = config.split_options();
        assert_eq!(split.audio_codec, "libshine");
        assert_eq!(split.partial_policy, PartialOutputPolicy::Rollback);
    }
}

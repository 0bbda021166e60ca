use crate::splitter::models::TranscodeJob;
use crate::utils::error::TranscodeError;
use async_trait::async_trait;
use std::path::Path;

/// Boundary to the media transcoder
///
/// One call produces one output file from `input`, overwriting it if it
/// already exists.
#[async_trait]
pub trait Transcoder: Send + Sync {
    fn id(&self) -> &'static str;

    async fn transcode(&self, input: &Path, job: &TranscodeJob) -> Result<(), TranscodeError>;
}

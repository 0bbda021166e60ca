use crate::acquirer::models::{AcquiredMedia, DownloadOptions};
use crate::utils::error::AcquireError;
use async_trait::async_trait;
use std::path::Path;

/// Boundary to the media downloader
///
/// Implementations retrieve the stream selected by `options.format`, transcode
/// its audio as requested and write the result to `target`, overwriting
/// whatever is there.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Short identifier used in logs (e.g. "yt-dlp")
    fn id(&self) -> &'static str;

    async fn download(
        &self,
        url: &str,
        target: &Path,
        options: &DownloadOptions,
    ) -> Result<AcquiredMedia, AcquireError>;
}

//! Acquisition stage: fetch remote media into a local combined file

pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{AcquiredMedia, DownloadOptions};
pub use traits::Downloader;
pub use ytdlp::YtDlpDownloader;

use crate::utils::error::AcquireError;
use std::path::Path;
use tracing::{error, info};

/// Run the acquisition stage.
///
/// There is no retry: any downloader failure is logged with its raw
/// diagnostic and returned as is.
pub async fn acquire<D: Downloader + ?Sized>(
    downloader: &D,
    url: &str,
    target: &Path,
    options: &DownloadOptions,
) -> Result<AcquiredMedia, AcquireError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AcquireError::InvalidUrl(url.to_string()));
    }

    info!(
        "Acquiring {} into {} via {}",
        url,
        target.display(),
        downloader.id()
    );

    match downloader.download(url, target, options).await {
        Ok(media) => {
            info!("Acquired {}", media.path.display());
            Ok(media)
        }
        Err(e) => {
            error!("Acquisition failed: {}", e);
            Err(e)
        }
    }
}

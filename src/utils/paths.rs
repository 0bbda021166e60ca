//! Per-run file layout
//!
//! Every path the pipeline touches is derived from a `RunPaths` value that is
//! resolved once at startup and handed to both stages.

use path_absolutize::Absolutize;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Intermediate file name used when nothing else is configured
pub const DEFAULT_INTERMEDIATE_NAME: &str = "youtube_video.mp4";

/// Working directory plus the intermediate combined file inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    dir: PathBuf,
    intermediate: PathBuf,
}

impl RunPaths {
    pub fn new(dir: impl Into<PathBuf>, intermediate_name: &str) -> Self {
        let dir = dir.into();
        let intermediate = dir.join(intermediate_name);
        Self { dir, intermediate }
    }

    /// Resolve the layout for one run.
    ///
    /// `dir` defaults to the process working directory. With `unique` the
    /// intermediate stem gets a random suffix so runs sharing a directory
    /// never touch each other's files.
    pub fn resolve(dir: Option<&Path>, intermediate_name: &str, unique: bool) -> io::Result<Self> {
        let dir = match dir {
            Some(dir) => dir.absolutize()?.into_owned(),
            None => std::env::current_dir()?,
        };

        let name = if unique {
            unique_name(intermediate_name)
        } else {
            intermediate_name.to_string()
        };

        let paths = Self::new(dir, &name);
        debug!("Run paths: {:?}", paths);
        Ok(paths)
    }

    /// Create the working directory if needed
    pub async fn prepare(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn intermediate(&self) -> &Path {
        &self.intermediate
    }
}

/// `youtube_video.mp4` -> `youtube_video_<uuid>.mp4`
pub fn unique_name(name: &str) -> String {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = uuid::Uuid::new_v4().simple();

    match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, id, ext.to_string_lossy()),
        None => format!("{}_{}", stem, id),
    }
}

/// Sibling of `input` named `<stem>_<suffix>.<extension>`.
///
/// Only the final extension is stripped, and a leading dot does not count as
/// one, so `.hidden` keeps its whole name as the stem.
pub fn derived_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut name: OsString = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(format!("_{}.{}", suffix, extension));
    input.with_file_name(name)
}

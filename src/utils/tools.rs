//! External tool discovery
//!
//! Both collaborators are plain executables. Lookup order:
//! 1. Explicit path given on the command line
//! 2. Next to the current executable (bundled/dev layouts)
//! 3. System PATH
//! 4. Common installation paths (Homebrew, pip user installs, etc.)

use crate::utils::error::ToolError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The external programs the pipeline drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    YtDlp,
    Ffmpeg,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::YtDlp => "yt-dlp",
            Tool::Ffmpeg => "ffmpeg",
        }
    }

    /// File name of the binary on this platform
    pub fn binary_name(&self) -> String {
        format!("{}{}", self.name(), exe_extension())
    }
}

/// Resolve a tool, honouring an explicit path first
pub fn locate(tool: Tool, explicit: Option<&Path>) -> Result<PathBuf, ToolError> {
    if let Some(path) = explicit {
        if path.is_file() && is_executable(path) {
            info!("Using {} at: {}", tool.name(), path.display());
            return Ok(path.to_path_buf());
        }
        return Err(ToolError::NotExecutable(path.to_path_buf()));
    }

    if let Some(path) = find_adjacent(tool) {
        info!("✓ Using bundled {}: {}", tool.name(), path.display());
        return Ok(path);
    }

    if let Some(path) = find_in_path(tool) {
        info!("✓ Using system {}: {}", tool.name(), path.display());
        return Ok(path);
    }

    if let Some(path) = find_in_common_paths(tool) {
        info!("✓ Using {} from common path: {}", tool.name(), path.display());
        return Ok(path);
    }

    warn!("✗ {} not found anywhere!", tool.name());
    Err(ToolError::NotFound(tool.name()))
}

/// Binary sitting next to the running executable
fn find_adjacent(tool: Tool) -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    let candidate = exe_dir.join(tool.binary_name());
    debug!("Checking adjacent path: {:?}", candidate);
    if candidate.is_file() && is_executable(&candidate) {
        return Some(candidate);
    }

    // macOS bundle: App.app/Contents/MacOS/ytsplit -> Contents/Resources/bin/<tool>
    if exe_dir.ends_with("MacOS") {
        let bundled = exe_dir
            .parent()?
            .join("Resources")
            .join("bin")
            .join(tool.binary_name());
        if bundled.is_file() && is_executable(&bundled) {
            return Some(bundled);
        }
    }

    None
}

fn find_in_path(tool: Tool) -> Option<PathBuf> {
    which::which(tool.name()).ok().filter(|path| path.exists())
}

fn find_in_common_paths(tool: Tool) -> Option<PathBuf> {
    let candidates = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin",
        // macOS Homebrew (Intel)
        "/usr/local/bin",
        "/usr/bin",
        "/Library/Frameworks/Python.framework/Versions/Current/bin",
        "~/.local/bin",
    ];

    for dir in candidates {
        let dir = match dir.strip_prefix("~/") {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            },
            None => PathBuf::from(dir),
        };

        let candidate = dir.join(tool.binary_name());
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }

    None
}

/// Check if a file is executable
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        // No executable bit on Windows
        path.exists()
    }
}

/// Platform-specific executable extension
pub fn exe_extension() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        ".exe"
    }
    #[cfg(not(target_os = "windows"))]
    {
        ""
    }
}

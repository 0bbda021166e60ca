//! Utility modules for errors, configuration, paths and tool lookup

pub mod config;
pub mod error;
pub mod paths;
pub mod tools;

// Re-export for convenience
pub use config::{PartialOutputPolicy, PipelineConfig};
pub use error::{
    AcquireError, ConfigError, ExtractStep, PipelineError, SplitError, ToolError, TranscodeError,
};
pub use paths::{derived_path, RunPaths, DEFAULT_INTERMEDIATE_NAME};
pub use tools::Tool;

//! ytsplit - download a video and split it into separate video and audio files
//!
//! yt-dlp fetches the media (audio transcoded to MP3 on the way), ffmpeg then
//! produces a video-only and an audio-only file next to it.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use ytsplit::utils::{PartialOutputPolicy, PipelineConfig, PipelineError, RunPaths};
use ytsplit::{FfmpegTranscoder, Pipeline, YtDlpDownloader};

#[derive(Parser)]
#[command(
    name = "ytsplit",
    version,
    about = "Download a video and split it into separate video and audio files."
)]
struct Args {
    /// Video URL
    url: String,

    /// Directory for the intermediate and output files (default: current directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Give the intermediate file a per-run unique name
    #[arg(long)]
    unique: bool,

    /// Delete partial split output when the audio step fails
    #[arg(long)]
    rollback_partial: bool,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Explicit yt-dlp binary
    #[arg(long = "yt-dlp", value_name = "PATH")]
    yt_dlp: Option<PathBuf>,

    /// Explicit ffmpeg binary
    #[arg(long, value_name = "PATH")]
    ffmpeg: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            if is_split_failure(&err) {
                eprintln!("Failed to split the video.");
            }
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Stage failures carry their own code; config and tool errors exit 1
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<PipelineError>()
        .map_or(1, PipelineError::exit_code)
}

fn is_split_failure(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::Splitting(_))
    )
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if args.rollback_partial {
        config.partial_policy = PartialOutputPolicy::Rollback;
    }
    config.validate()?;

    // Both tools must exist before anything touches the disk
    let downloader = YtDlpDownloader::locate(args.yt_dlp.as_deref())?;
    let transcoder = FfmpegTranscoder::locate(args.ffmpeg.as_deref())?;
    let ffmpeg = transcoder.ffmpeg_path().to_path_buf();

    let paths = RunPaths::resolve(args.dir.as_deref(), &config.intermediate_name, args.unique)
        .context("Failed to resolve working directory")?;
    paths
        .prepare()
        .await
        .with_context(|| format!("Failed to create {}", paths.dir().display()))?;

    let pipeline = Pipeline::new(downloader, transcoder, config).with_ffmpeg_location(ffmpeg);
    pipeline.run(&args.url, &paths).await?;

    Ok(())
}

/// `RUST_LOG` wins; otherwise verbosity picks the level for this crate.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "ytsplit=warn",
        1 => "ytsplit=info",
        _ => "ytsplit=debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

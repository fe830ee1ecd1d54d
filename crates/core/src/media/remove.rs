//! Stripping every subtitle stream from a video.

use super::{copy_video_audio_codecs, copy_video_audio_maps, run, Tools};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, trace};

/// ffmpeg arguments keeping only the video and audio streams of `video`.
pub fn remove_args(video: &Path, output: &Path) -> Vec<String> {
    let mut args = vec!["-i".to_string(), video.display().to_string()];
    args.extend(copy_video_audio_maps());
    args.extend(copy_video_audio_codecs());
    args.push(output.display().to_string());
    args
}

/// Write `output`: `video` without subtitle streams.
pub fn remove_subtitles(tools: &Tools, video: &Path, output: &Path) -> Result<()> {
    trace!(
        "remove_subtitles(video={}, output={})",
        video.display(),
        output.display()
    );
    run(&tools.ffmpeg, &remove_args(video, output)).context("error removing subtitles")?;
    info!("subtitles removed, saved output to {}", output.display());
    Ok(())
}

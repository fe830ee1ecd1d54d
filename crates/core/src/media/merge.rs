//! Muxing external subtitle files into a video as titled tracks.

use super::{copy_video_audio_codecs, copy_video_audio_maps, run, Tools};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, trace};

/// A subtitle file to attach and the title its track gets.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleInput {
    pub path: PathBuf,
    pub title: String,
}

impl SubtitleInput {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }
}

/// ffmpeg arguments copying video/audio of `video` and appending `subtitles`
/// as SRT tracks in the given order.
pub fn merge_args(video: &Path, subtitles: &[SubtitleInput], output: &Path) -> Vec<String> {
    let mut args = vec!["-i".to_string(), video.display().to_string()];
    for sub in subtitles {
        args.push("-i".to_string());
        args.push(sub.path.display().to_string());
    }
    args.extend(copy_video_audio_maps());
    for input in 1..=subtitles.len() {
        args.push("-map".to_string());
        args.push(format!("{input}:s"));
    }
    args.extend(copy_video_audio_codecs());
    args.push("-c:s".to_string());
    args.push("srt".to_string());
    for (track, sub) in subtitles.iter().enumerate() {
        args.push(format!("-metadata:s:s:{track}"));
        args.push(format!("title={}", sub.title));
    }
    args.push(output.display().to_string());
    args
}

/// Write `output`: `video` with `subtitles` added as new tracks.
pub fn merge_subtitles(
    tools: &Tools,
    video: &Path,
    subtitles: &[SubtitleInput],
    output: &Path,
) -> Result<()> {
    trace!(
        "merge_subtitles(video={}, subtitles={}, output={})",
        video.display(),
        subtitles.len(),
        output.display()
    );
    run(&tools.ffmpeg, &merge_args(video, subtitles, output))
        .context("error merging subtitles")?;
    info!("subtitles merged, saved output to {}", output.display());
    Ok(())
}

//! ffmpeg/ffprobe invocations for subtitle track work.
//! Every operation builds an argument list, runs the tool to completion and
//! judges the result by its exit status.

use crate::config::Settings;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

pub mod extract;
pub mod merge;
pub mod probe;
pub mod remove;

pub use extract::{extract_subtitles, Extraction};
pub use merge::{merge_subtitles, SubtitleInput};
pub use probe::{list_subtitle_tracks, SubtitleTrack};
pub use remove::remove_subtitles;

/// Locations of the external media tools.
#[derive(Debug, Clone, PartialEq)]
pub struct Tools {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl From<&Settings> for Tools {
    fn from(settings: &Settings) -> Self {
        Self {
            ffmpeg: settings.ffmpeg.clone(),
            ffprobe: settings.ffprobe.clone(),
        }
    }
}

/// Run `program` with `args` and return its stdout.
/// A non-zero exit becomes an error carrying the tool's stderr.
pub(crate) fn run(program: &Path, args: &[String]) -> Result<String> {
    debug!("running {} {}", program.display(), args.join(" "));
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to start {}", program.display()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            stderr.trim()
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Arguments shared by merge and removal: keep video and audio untouched.
fn copy_video_audio_maps() -> Vec<String> {
    ["-map", "0:v", "-map", "0:a"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn copy_video_audio_codecs() -> Vec<String> {
    ["-c:v", "copy", "-c:a", "copy"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

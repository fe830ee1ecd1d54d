//! Subtitle stream enumeration through ffprobe.

use super::{run, Tools};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, trace};

/// Language recorded for streams without a language tag.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// A subtitle stream found in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// Absolute stream index inside the container.
    pub index: u32,
    pub language: String,
}

#[derive(Debug, Deserialize)]
struct Probe {
    #[serde(default)]
    streams: Vec<Stream>,
}

#[derive(Debug, Deserialize)]
struct Stream {
    index: u32,
    #[serde(default)]
    tags: Tags,
}

#[derive(Debug, Default, Deserialize)]
struct Tags {
    language: Option<String>,
}

/// ffprobe arguments listing subtitle stream indices and languages as JSON.
pub fn probe_args(video: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-select_streams".to_string(),
        "s".to_string(),
        "-show_entries".to_string(),
        "stream=index:stream_tags=language".to_string(),
        "-of".to_string(),
        "json".to_string(),
        video.display().to_string(),
    ]
}

/// Turn ffprobe JSON output into track descriptors.
/// Blank output means the container has no subtitle streams.
pub fn parse_probe(output: &str) -> Result<Vec<SubtitleTrack>> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }
    let probe: Probe = serde_json::from_str(output).context("unexpected ffprobe output")?;
    Ok(probe
        .streams
        .into_iter()
        .map(|s| SubtitleTrack {
            index: s.index,
            language: s
                .tags
                .language
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        })
        .collect())
}

/// List the subtitle streams of `video`.
pub fn list_subtitle_tracks(tools: &Tools, video: &Path) -> Result<Vec<SubtitleTrack>> {
    trace!("list_subtitle_tracks(video={})", video.display());
    let stdout = run(&tools.ffprobe, &probe_args(video))
        .context("error retrieving subtitle track information")?;
    let tracks = parse_probe(&stdout)?;
    info!("found {} subtitle track(s) in {}", tracks.len(), video.display());
    Ok(tracks)
}

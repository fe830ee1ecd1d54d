//! Extraction of every subtitle stream of a video into its own SRT file.

use super::probe::{list_subtitle_tracks, SubtitleTrack};
use super::{run, Tools};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, trace};

/// Result of extracting one track.
#[derive(Debug)]
pub struct Extraction {
    pub track: SubtitleTrack,
    pub output: PathBuf,
    /// Failure reason when the track could not be extracted.
    pub error: Option<String>,
}

impl Extraction {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// `output/subtitles` next to the running executable.
pub fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the running executable")?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))?;
    Ok(dir.join("output").join("subtitles"))
}

/// File name for an extracted track: `{base}_sub{index}_{lang}.srt`.
pub fn track_file_name(video: &Path, track: &SubtitleTrack) -> String {
    let base = video.file_stem().unwrap_or_default().to_string_lossy();
    format!("{}_sub{}_{}.srt", base, track.index, track.language)
}

/// ffmpeg arguments converting stream `track.index` of `video` to SRT at `output`.
pub fn extract_args(video: &Path, track: &SubtitleTrack, output: &Path) -> Vec<String> {
    vec![
        "-i".to_string(),
        video.display().to_string(),
        "-map".to_string(),
        format!("0:{}", track.index),
        "-c:s".to_string(),
        "srt".to_string(),
        output.display().to_string(),
        "-y".to_string(),
    ]
}

/// Extract all subtitle streams of `video` into `output_dir`
/// (or [`default_output_dir`]).
/// A failed probe aborts; a failed track is recorded and the rest continue.
pub fn extract_subtitles(
    tools: &Tools,
    video: &Path,
    output_dir: Option<&Path>,
) -> Result<Vec<Extraction>> {
    trace!("extract_subtitles(video={})", video.display());
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_output_dir()?,
    };
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let tracks = list_subtitle_tracks(tools, video)?;
    Ok(extract_tracks(tools, video, &tracks, &dir))
}

/// Run one ffmpeg extraction per track, never stopping early.
fn extract_tracks(
    tools: &Tools,
    video: &Path,
    tracks: &[SubtitleTrack],
    dir: &Path,
) -> Vec<Extraction> {
    tracks
        .iter()
        .map(|track| {
            let output = dir.join(track_file_name(video, track));
            let result = run(&tools.ffmpeg, &extract_args(video, track, &output));
            let error = match result {
                Ok(_) => {
                    info!(
                        "extracted subtitle track {} ({}) to {}",
                        track.index,
                        track.language,
                        output.display()
                    );
                    None
                }
                Err(err) => {
                    error!(
                        "error extracting subtitle track {} ({}): {:#}",
                        track.index, track.language, err
                    );
                    Some(format!("{err:#}"))
                }
            };
            Extraction {
                track: track.clone(),
                output,
                error,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn track(index: u32, language: &str) -> SubtitleTrack {
        SubtitleTrack {
            index,
            language: language.to_string(),
        }
    }

    #[test]
    fn names_tracks_by_index_and_language() {
        let video = Path::new("/videos/movie.mkv");
        assert_eq!(track_file_name(video, &track(0, "en")), "movie_sub0_en.srt");
        assert_eq!(
            track_file_name(video, &track(1, "unknown")),
            "movie_sub1_unknown.srt"
        );
    }

    #[test]
    fn builds_expected_ffmpeg_args() {
        let args = extract_args(
            Path::new("movie.mkv"),
            &track(3, "fre"),
            Path::new("out/movie_sub3_fre.srt"),
        );
        let expected = [
            "-i",
            "movie.mkv",
            "-map",
            "0:3",
            "-c:s",
            "srt",
            "out/movie_sub3_fre.srt",
            "-y",
        ];
        assert_eq!(args, expected);
    }

    #[test]
    fn default_dir_is_output_subtitles() {
        let dir = default_output_dir().unwrap();
        assert!(dir.ends_with("output/subtitles"));
    }

    #[cfg(unix)]
    #[test]
    fn one_outcome_per_track() {
        let dir = tempdir().unwrap();
        let tools = Tools {
            ffmpeg: "true".into(),
            ffprobe: "true".into(),
        };
        let tracks = [track(0, "en"), track(1, "unknown")];
        let done = extract_tracks(&tools, Path::new("movie.mkv"), &tracks, dir.path());
        assert_eq!(done.len(), 2);
        assert!(done.iter().all(Extraction::is_ok));
        assert_eq!(done[0].output, dir.path().join("movie_sub0_en.srt"));
        assert_eq!(done[1].output, dir.path().join("movie_sub1_unknown.srt"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_track_does_not_stop_the_rest() {
        let dir = tempdir().unwrap();
        let tools = Tools {
            ffmpeg: "false".into(),
            ffprobe: "true".into(),
        };
        let tracks = [track(2, "eng"), track(5, "ger"), track(6, "jpn")];
        let done = extract_tracks(&tools, Path::new("show.mp4"), &tracks, dir.path());
        assert_eq!(done.len(), 3);
        assert!(done.iter().all(|e| e.error.is_some()));
        assert_eq!(done[2].track, tracks[2]);
    }

    /// Write an executable shell script named `name` into `dir`.
    #[cfg(unix)]
    fn stub_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn extracts_every_probed_stream_to_named_files() {
        let bin = tempdir().unwrap();
        let out = tempdir().unwrap();
        let ffprobe = stub_tool(
            bin.path(),
            "ffprobe",
            r#"cat <<'JSON'
{"streams": [
  {"index": 0, "tags": {"language": "en"}},
  {"index": 1, "tags": {"language": ""}},
  {"index": 4}
]}
JSON"#,
        );
        // The output path is the seventh argument of the extraction command.
        let ffmpeg = stub_tool(bin.path(), "ffmpeg", r#": > "$7""#);
        let tools = Tools { ffmpeg, ffprobe };
        let done =
            extract_subtitles(&tools, Path::new("/videos/movie.mkv"), Some(out.path())).unwrap();
        assert_eq!(done.len(), 3);
        assert!(done.iter().all(Extraction::is_ok));
        let mut names: Vec<String> = fs::read_dir(out.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "movie_sub0_en.srt",
                "movie_sub1_unknown.srt",
                "movie_sub4_unknown.srt",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn creates_output_dir_even_without_tracks() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("subs");
        let tools = Tools {
            ffmpeg: "false".into(),
            ffprobe: "true".into(),
        };
        let done = extract_subtitles(&tools, Path::new("movie.mkv"), Some(&out)).unwrap();
        assert!(done.is_empty());
        assert!(out.is_dir());
    }
}

//! Runtime settings read from the environment.

use std::path::PathBuf;

/// Endpoint used when `SUBTRACK_TRANSLATE_URL` is not set.
pub const DEFAULT_TRANSLATE_URL: &str = "https://api.mymemory.translated.net/get";

/// External tool locations and translation service parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    /// Language the subtitles are translated from.
    pub source_lang: String,
    pub translate_url: String,
    /// Contact address sent along with translation requests, if any.
    pub translate_email: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            source_lang: "en".to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            translate_email: None,
        }
    }
}

impl Settings {
    /// Build settings from the `SUBTRACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    /// Unset or blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Self {
            ffmpeg: get("SUBTRACK_FFMPEG").map(PathBuf::from).unwrap_or(defaults.ffmpeg),
            ffprobe: get("SUBTRACK_FFPROBE").map(PathBuf::from).unwrap_or(defaults.ffprobe),
            source_lang: get("SUBTRACK_SOURCE_LANG").unwrap_or(defaults.source_lang),
            translate_url: get("SUBTRACK_TRANSLATE_URL").unwrap_or(defaults.translate_url),
            translate_email: get("SUBTRACK_TRANSLATE_EMAIL"),
        }
    }
}

//! Subtitle translation.
//! This module wires encoding detection, SRT parsing, per-cue translation
//! and output writing.

use crate::{encoding, srt};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

pub mod mymemory;

/// Default number of cues per progress report.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Translates single strings into a target language.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_lang`.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

/// Progress after a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// 1-based batch number.
    pub batch: usize,
    /// Cues translated so far.
    pub done: usize,
    pub total: usize,
}

impl BatchProgress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.done as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for BatchProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Translating batch {} ({:.2}%)", self.batch, self.percent())
    }
}

/// Output path for a translation: the language code goes before the extension.
pub fn translated_path(input: &Path, target_lang: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "srt".to_string());
    input.with_file_name(format!("{stem}_{target_lang}.{ext}"))
}

/// Translate every cue of `cues` in place, batch by batch.
/// `on_batch` is called after each finished batch. The first failure aborts.
pub async fn translate_cues<T, F>(
    cues: &mut [srt::Cue],
    translator: &T,
    target_lang: &str,
    batch_size: usize,
    mut on_batch: F,
) -> Result<()>
where
    T: Translator + ?Sized,
    F: FnMut(BatchProgress),
{
    if batch_size == 0 {
        return Err(anyhow!("batch size must be at least 1"));
    }
    let total = cues.len();
    let mut done = 0;
    for (i, batch) in cues.chunks_mut(batch_size).enumerate() {
        for cue in batch.iter_mut() {
            let text = cue.joined_text();
            if text.trim().is_empty() {
                continue;
            }
            let translated = translator
                .translate(&text, target_lang)
                .await
                .with_context(|| format!("translating cue {}", cue.index))?;
            cue.set_text(&translated);
        }
        done += batch.len();
        on_batch(BatchProgress {
            batch: i + 1,
            done,
            total,
        });
    }
    Ok(())
}

/// Translate the subtitle file at `input` into `target_lang`.
/// The result is written as UTF-8 next to the input, see [`translated_path`].
/// Nothing is written when any cue fails to translate.
pub async fn translate_file<T, F>(
    input: &Path,
    target_lang: &str,
    translator: &T,
    batch_size: usize,
    on_batch: F,
) -> Result<PathBuf>
where
    T: Translator + ?Sized,
    F: FnMut(BatchProgress),
{
    trace!(
        "translate_file(input={}, target_lang={}, batch_size={})",
        input.display(),
        target_lang,
        batch_size
    );
    let content = encoding::read_to_string(input)?;
    let mut cues = srt::parse(&content).with_context(|| format!("parsing {}", input.display()))?;
    debug!("loaded {} cues from {}", cues.len(), input.display());
    translate_cues(&mut cues, translator, target_lang, batch_size, on_batch).await?;
    let out_path = translated_path(input, target_lang);
    fs::write(&out_path, srt::format(&cues))
        .with_context(|| format!("writing {}", out_path.display()))?;
    info!("translated subtitle saved to {}", out_path.display());
    Ok(out_path)
}

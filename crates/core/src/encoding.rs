//! Byte encoding detection for subtitle files.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Guess the text encoding of `bytes`.
/// A byte order mark wins; otherwise the statistical detector decides.
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Read `path` and decode it with the detected encoding.
pub fn read_to_string(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let encoding = detect(&bytes);
    debug!("detected {} encoding for {}", encoding.name(), path.display());
    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(
            "{} contains bytes invalid in {}, replaced",
            path.display(),
            encoding.name()
        );
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn plain_utf8_is_detected() {
        let text = "1\n00:00:00,000 --> 00:00:01,000\nÇa va très bien, merci\n";
        assert_eq!(detect(text.as_bytes()), encoding_rs::UTF_8);
    }

    #[test]
    fn bom_decides_encoding() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "hi".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect(&bytes), encoding_rs::UTF_16LE);
    }

    #[test]
    fn decodes_legacy_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.srt");
        let (bytes, _, _) = encoding_rs::WINDOWS_1252
            .encode(
                "1\n00:00:00,000 --> 00:00:01,000\nCafé déjà vu, à bientôt, où êtes-vous?\n\n\
                 2\n00:00:01,000 --> 00:00:02,000\nLe garçon a été très énervé à la fenêtre.\n",
            );
        fs::write(&path, &bytes).unwrap();
        let text = read_to_string(&path).unwrap();
        assert!(text.contains("Café déjà vu"));
    }
}

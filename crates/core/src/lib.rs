//! Subtitle track tooling: extract, merge, strip and translate.

pub mod config;
pub mod encoding;
pub mod media;
pub mod srt;
pub mod translate;

//! SubRip (`.srt`) reading and writing.
//! Cue timings and order survive a parse/format cycle untouched.

use anyhow::{anyhow, Context, Result};

/// One timed subtitle cue.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub index: u32,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: Vec<String>,
}

impl Cue {
    /// Text of the cue with its lines joined by `\n`.
    pub fn joined_text(&self) -> String {
        self.text.join("\n")
    }

    /// Replace the text of the cue, splitting `text` on line breaks.
    /// Blank lines are dropped since a blank line ends a cue in SRT.
    pub fn set_text(&mut self, text: &str) {
        self.text = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
    }
}

/// Parse SRT text into cues, keeping file order.
pub fn parse(input: &str) -> Result<Vec<Cue>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut cues = Vec::new();
    let mut lines = input.lines().enumerate();
    loop {
        let (line_no, index_line) = match lines.next() {
            Some((n, l)) if !l.trim().is_empty() => (n + 1, l.trim()),
            Some(_) => continue,
            None => break,
        };
        let index: u32 = index_line
            .parse()
            .with_context(|| format!("line {line_no}: bad cue index {index_line:?}"))?;
        let (time_no, time_line) = lines
            .next()
            .ok_or_else(|| anyhow!("line {line_no}: cue {index} has no timing line"))?;
        let (start_ms, end_ms) =
            parse_times(time_line).with_context(|| format!("line {}: bad timing", time_no + 1))?;
        let mut text = Vec::new();
        for (_, line) in lines.by_ref() {
            if line.trim().is_empty() {
                break;
            }
            text.push(line.to_string());
        }
        cues.push(Cue {
            index,
            start_ms,
            end_ms,
            text,
        });
    }
    Ok(cues)
}

/// Format cues back to SRT text, one blank line after each cue.
pub fn format(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in cues {
        out.push_str(&format!(
            "{}\n{} --> {}\n",
            cue.index,
            format_time(cue.start_ms),
            format_time(cue.end_ms),
        ));
        for line in &cue.text {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Parse a time range like `00:00:01,000 --> 00:00:02,000` to milliseconds.
fn parse_times(line: &str) -> Result<(u64, u64)> {
    let (start, end) = line
        .split_once("-->")
        .ok_or_else(|| anyhow!("missing `-->` in {line:?}"))?;
    Ok((parse_time(start.trim())?, parse_time(end.trim())?))
}

/// Parse `HH:MM:SS,mmm` (or `HH:MM:SS.mmm`) into milliseconds.
fn parse_time(t: &str) -> Result<u64> {
    let parts: Vec<&str> = t.split([':', ',', '.']).collect();
    if parts.len() != 4 {
        return Err(anyhow!("bad time {t:?}"));
    }
    let h: u64 = parts[0].parse()?;
    let m: u64 = parts[1].parse()?;
    let s: u64 = parts[2].parse()?;
    let ms: u64 = parts[3].parse()?;
    h.checked_mul(60)
        .and_then(|v| v.checked_add(m))
        .and_then(|v| v.checked_mul(60))
        .and_then(|v| v.checked_add(s))
        .and_then(|v| v.checked_mul(1000))
        .and_then(|v| v.checked_add(ms))
        .ok_or_else(|| anyhow!("time {t:?} is out of range"))
}

fn format_time(ms: u64) -> String {
    let h = ms / 3_600_000;
    let m = (ms % 3_600_000) / 60_000;
    let s = (ms % 60_000) / 1000;
    let ms = ms % 1000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_matches_canonical_input() {
        let input = "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n\
                     2\n01:02:03,004 --> 01:02:05,000\nTwo\nlines\n\n";
        let cues = parse(input).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].start_ms, 3_723_004);
        assert_eq!(cues[1].text, vec!["Two".to_string(), "lines".to_string()]);
        assert_eq!(format(&cues), input);
    }

    #[test]
    fn tolerates_bom_crlf_and_dot_separator() {
        let input = "\u{feff}1\r\n00:00:01.500 --> 00:00:02.250 \r\nHi there\r\n\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nBye";
        let cues = parse(input).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!((cues[0].start_ms, cues[0].end_ms), (1500, 2250));
        assert_eq!(cues[0].text, vec!["Hi there".to_string()]);
        assert_eq!(cues[1].text, vec!["Bye".to_string()]);
    }

    #[test]
    fn empty_cue_text_is_kept() {
        let cues = parse("7\n00:00:00,000 --> 00:00:01,000\n\n").unwrap();
        assert_eq!(cues[0].index, 7);
        assert!(cues[0].text.is_empty());
        assert_eq!(format(&cues), "7\n00:00:00,000 --> 00:00:01,000\n\n");
    }

    #[test]
    fn malformed_timing_names_the_line() {
        let err = parse("1\n00:00:00,000 -> 00:00:01,000\nHello\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn non_numeric_index_is_rejected() {
        assert!(parse("one\n00:00:00,000 --> 00:00:01,000\nHello\n").is_err());
    }

    #[test]
    fn huge_hour_field_is_an_error() {
        let err = parse("1\n9999999999999999:00:00,000 --> 00:00:01,000\nHello\n").unwrap_err();
        assert!(format!("{err:#}").contains("out of range"));
    }

    #[test]
    fn set_text_drops_blank_lines() {
        let input = "1\n00:00:00,000 --> 00:00:01,000\na\n\n\
                     2\n00:00:01,000 --> 00:00:02,000\nb\n";
        let mut cues = parse(input).unwrap();
        for cue in cues.iter_mut() {
            let text = format!("{}\n\n  \nextra", cue.joined_text());
            cue.set_text(&text);
        }
        let reparsed = parse(&format(&cues)).unwrap();
        assert_eq!(reparsed, cues);
        assert_eq!(reparsed[1].text, vec!["b".to_string(), "extra".to_string()]);
    }

    #[test]
    fn set_text_splits_lines() {
        let mut cue = Cue {
            index: 1,
            start_ms: 0,
            end_ms: 1,
            text: vec!["a".into(), "b".into()],
        };
        assert_eq!(cue.joined_text(), "a\nb");
        cue.set_text("x\ny");
        assert_eq!(cue.text, vec!["x".to_string(), "y".to_string()]);
    }
}

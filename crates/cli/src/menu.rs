//! Interactive numbered menu: prompts for one operation and runs it.

use anyhow::{Context, Result};
use dialoguer::Input;
use std::io::Write;
use std::path::PathBuf;
use subtrack_core::config::Settings;
use subtrack_core::media::{self, SubtitleInput, Tools};
use subtrack_core::translate::{mymemory::MyMemoryTranslator, translate_file, DEFAULT_BATCH_SIZE};
use tracing::{error, trace, warn};

/// An operation chosen from the menu along with its answers.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Extract {
        video: PathBuf,
        output_dir: Option<PathBuf>,
    },
    Merge {
        video: PathBuf,
        subtitles: Vec<SubtitleInput>,
        output: PathBuf,
    },
    Remove {
        video: PathBuf,
        output: PathBuf,
    },
    Translate {
        subtitle: PathBuf,
        target_lang: String,
    },
}

/// Source of answers for the menu questions.
pub trait Prompt {
    /// Show `text` on its own line.
    fn say(&mut self, text: &str) -> Result<()>;

    /// Ask `question` and return the trimmed answer, which may be empty.
    fn ask(&mut self, question: &str) -> Result<String>;

    fn ask_path(&mut self, question: &str) -> Result<PathBuf> {
        Ok(PathBuf::from(self.ask(question)?))
    }
}

/// Prompts on the controlling terminal.
pub struct Terminal;

impl Prompt for Terminal {
    fn say(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("failed to read answer for: {question}"))?;
        Ok(answer.trim().to_string())
    }
}

/// Show the menu and collect the answers for the chosen operation.
/// An invalid choice is reported and yields `None`.
pub fn read_action<P: Prompt>(p: &mut P) -> Result<Option<Action>> {
    p.say("Choose an option:")?;
    p.say("1. Extract subtitles from a video")?;
    p.say("2. Merge subtitles with a video")?;
    p.say("3. Remove subtitles from a video")?;
    p.say("4. Translate a subtitle file")?;
    let choice = p.ask("Enter your choice (1-4)")?;
    trace!("menu choice {choice:?}");
    let action = match choice.as_str() {
        "1" => {
            let video = p.ask_path("Enter the path to the video file (absolute path)")?;
            let dir = p.ask(
                "Enter the output directory for extracted subtitles (leave empty for default 'output/subtitles')",
            )?;
            Action::Extract {
                video,
                output_dir: (!dir.is_empty()).then(|| PathBuf::from(dir)),
            }
        }
        "2" => {
            let video = p.ask_path("Enter the path to the video file (absolute path)")?;
            let count = p.ask("Enter the number of subtitle files to merge")?;
            let count: usize = count
                .parse()
                .with_context(|| format!("{count:?} is not a number of subtitle files"))?;
            let mut subtitles = Vec::with_capacity(count);
            for _ in 0..count {
                let path = p.ask_path("Enter the path to a subtitle file (absolute path)")?;
                let title = p.ask("Enter the title for this subtitle track")?;
                subtitles.push(SubtitleInput::new(path, title));
            }
            let output =
                p.ask_path("Enter the output path for the video with merged subtitles")?;
            Action::Merge {
                video,
                subtitles,
                output,
            }
        }
        "3" => {
            let video = p.ask_path("Enter the path to the video file (absolute path)")?;
            let output = p.ask_path("Enter the output path for the video without subtitles")?;
            Action::Remove { video, output }
        }
        "4" => {
            let subtitle = p.ask_path("Enter the path to the subtitle file (absolute path)")?;
            let target_lang =
                p.ask("Enter the target language code (e.g., 'en', 'fr', 'ar')")?;
            Action::Translate {
                subtitle,
                target_lang,
            }
        }
        _ => {
            p.say("Invalid choice. Exiting.")?;
            return Ok(None);
        }
    };
    Ok(Some(action))
}

/// Run `action`, writing user-facing results to `out`.
/// Media tool failures are reported and swallowed; translation failures propagate.
pub async fn run_action<W: Write>(action: Action, settings: &Settings, out: &mut W) -> Result<()> {
    let tools = Tools::from(settings);
    match action {
        Action::Extract { video, output_dir } => {
            match media::extract_subtitles(&tools, &video, output_dir.as_deref()) {
                Ok(extracted) => {
                    for e in extracted {
                        match &e.error {
                            None => writeln!(
                                out,
                                "Extracted subtitle track {} ({}) to {}",
                                e.track.index,
                                e.track.language,
                                e.output.display()
                            )?,
                            Some(reason) => writeln!(
                                out,
                                "Error extracting subtitle track {} ({}): {}",
                                e.track.index, e.track.language, reason
                            )?,
                        }
                    }
                }
                Err(err) => report(out, err)?,
            }
        }
        Action::Merge {
            video,
            subtitles,
            output,
        } => match media::merge_subtitles(&tools, &video, &subtitles, &output) {
            Ok(()) => writeln!(
                out,
                "Subtitles merged with names. Saved output to {}",
                output.display()
            )?,
            Err(err) => report(out, err)?,
        },
        Action::Remove { video, output } => {
            match media::remove_subtitles(&tools, &video, &output) {
                Ok(()) => writeln!(
                    out,
                    "Subtitles removed. Saved output to {}",
                    output.display()
                )?,
                Err(err) => report(out, err)?,
            }
        }
        Action::Translate {
            subtitle,
            target_lang,
        } => {
            let translator = MyMemoryTranslator::new(settings);
            let mut write_err = None;
            let saved = translate_file(
                &subtitle,
                &target_lang,
                &translator,
                DEFAULT_BATCH_SIZE,
                |progress| {
                    if let Err(err) = writeln!(out, "{progress}") {
                        warn!("failed to show progress: {err}");
                        write_err.get_or_insert(err);
                    }
                },
            )
            .await?;
            if let Some(err) = write_err {
                return Err(err.into());
            }
            writeln!(out, "Translated subtitle saved to {}", saved.display())?;
        }
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, err: anyhow::Error) -> Result<()> {
    error!("{err:#}");
    writeln!(out, "{err:#}")?;
    Ok(())
}

use std::path::PathBuf;

use nalja_config::Config;
use nalja_core::ExtractedMatch;
use serde::Serialize;
use tracing::info;

use super::{build_extractor, print_json, read_text};

/// Input for the extract command.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub now: Option<String>,
}

/// One line of a notes file and what was found in it.
#[derive(Debug, Serialize)]
struct NoteDates<'a> {
    line: usize,
    text: &'a str,
    dates: Vec<ExtractedMatch>,
}

/// Strategy for printing the dates found in a note.
///
/// With `--file`, every non-empty line is a note and the notes are extracted
/// in parallel against one reference instant.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let extractor = build_extractor(&config, input.now.as_deref())?;
        let pretty = config.display.pretty_json;

        if let Some(path) = input.file {
            let content = tokio::fs::read_to_string(&path).await?;
            let notes: Vec<(usize, &str)> = content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| (i + 1, line))
                .collect();
            info!("Extracting {} notes from {}", notes.len(), path.display());

            let texts: Vec<&str> = notes.iter().map(|(_, line)| *line).collect();
            let results: Vec<NoteDates<'_>> = notes
                .iter()
                .zip(extractor.extract_batch_checked(&texts)?)
                .map(|(&(line, text), dates)| NoteDates { line, text, dates })
                .collect();
            return print_json(&results, pretty);
        }

        let text = read_text(input.text).await?;
        let dates = extractor.extract_checked(&text)?;
        print_json(&dates, pretty)
    }
}

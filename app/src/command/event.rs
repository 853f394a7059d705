use nalja_config::Config;
use nalja_core::{EventDraft, ExtractedMatch, MemoRef};
use tracing::info;

use super::print_json;

/// Input for the event command.
#[derive(Debug, Clone)]
pub struct EventInput {
    /// One match as printed by `nalja extract`.
    pub match_json: String,
    pub calendar_id: String,
    pub title: Option<String>,
    /// Note body; defaults to the match text.
    pub content: Option<String>,
    pub memo_id: Option<String>,
}

/// Strategy for turning an extracted match into a calendar event draft.
#[derive(Debug, Clone, Copy)]
pub struct EventStrategy;

impl super::CommandStrategy for EventStrategy {
    type Input = EventInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let found: ExtractedMatch = serde_json::from_str(&input.match_json)?;
        let content = input.content.as_deref().unwrap_or(found.text.as_str());

        let draft = EventDraft::from_match(
            &found,
            &input.calendar_id,
            MemoRef {
                id: input.memo_id.as_deref(),
                title: input.title.as_deref(),
                content,
            },
        )?;
        info!(
            "Event draft {} at {}",
            draft.id,
            draft.start.format_compact()
        );
        print_json(&draft, config.display.pretty_json)
    }
}

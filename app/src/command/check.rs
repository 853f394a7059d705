use nalja_config::Config;

use super::{build_extractor, read_text};

/// Input for the check command.
#[derive(Debug, Clone)]
pub struct CheckInput {
    pub text: Option<String>,
    pub now: Option<String>,
}

/// Strategy for answering whether a note mentions a date at all.
#[derive(Debug, Clone, Copy)]
pub struct CheckStrategy;

impl super::CommandStrategy for CheckStrategy {
    type Input = CheckInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let extractor = build_extractor(&config, input.now.as_deref())?;
        let text = read_text(input.text).await?;

        println!("{}", extractor.has_date_references_checked(&text)?);
        Ok(())
    }
}

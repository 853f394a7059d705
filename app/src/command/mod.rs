//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use nalja_config::Config;
use nalja_core::{Clock, FixedClock, LocalInstant, SystemClock};
use nalja_extract::DateExtractor;
use serde::Serialize;
use tracing::info;

mod check;
mod event;
mod extract;
mod info;
mod init;
mod version;

pub use check::{CheckInput, CheckStrategy};
pub use event::{EventInput, EventStrategy};
pub use extract::{ExtractInput, ExtractStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build an extractor pinned to `--now`, or to the current local time.
///
/// Pinning once keeps every note in a run on the same reference instant.
fn build_extractor(
    config: &Config,
    now: Option<&str>,
) -> anyhow::Result<DateExtractor<FixedClock>> {
    let reference = match now {
        Some(raw) => LocalInstant::parse_local_iso(raw)?,
        None => SystemClock.now(),
    };
    info!("Reference instant: {}", reference);
    Ok(DateExtractor::with_clock(
        config.extractor.clone(),
        FixedClock(reference),
    )?)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Read the note text from `--text`, or from stdin when it is absent.
async fn read_text(text: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut buf = String::new();
    tokio::io::AsyncReadExt::read_to_string(&mut tokio::io::stdin(), &mut buf).await?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

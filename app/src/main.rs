#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command::{
    CheckInput, CheckStrategy, CommandStrategy, EventInput, EventStrategy, ExtractInput,
    ExtractStrategy, InfoStrategy, InitStrategy, VersionStrategy,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "nalja")]
#[command(about = "Find dates and times in English and Korean notes", long_about = None)]
struct Cli {
    /// Log per-rule diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dates found in a note as JSON
    Extract {
        /// Note text; read from stdin when neither this nor --file is given
        #[arg(short = 't', long, conflicts_with = "file")]
        text: Option<String>,

        /// File with one note per line
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Reference time as YYYY-MM-DDTHH:mm:ss (defaults to local now)
        #[arg(long)]
        now: Option<String>,
    },
    /// Print whether a note mentions any date
    Check {
        #[arg(short = 't', long)]
        text: Option<String>,

        #[arg(long)]
        now: Option<String>,
    },
    /// Build a calendar event draft from one extracted match
    Event {
        /// Match JSON as printed by `extract`
        #[arg(short = 'm', long = "match")]
        match_json: String,

        /// Target calendar id
        #[arg(short = 'c', long = "calendar")]
        calendar_id: String,

        /// Note title
        #[arg(long)]
        title: Option<String>,

        /// Note body
        #[arg(long)]
        content: Option<String>,

        /// Note id to link the event to
        #[arg(long)]
        memo_id: Option<String>,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract { text, file, now } => {
            ExtractStrategy
                .execute(ExtractInput { text, file, now })
                .await?;
        }
        Commands::Check { text, now } => {
            CheckStrategy.execute(CheckInput { text, now }).await?;
        }
        Commands::Event {
            match_json,
            calendar_id,
            title,
            content,
            memo_id,
        } => {
            EventStrategy
                .execute(EventInput {
                    match_json,
                    calendar_id,
                    title,
                    content,
                    memo_id,
                })
                .await?;
        }
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Info => InfoStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}

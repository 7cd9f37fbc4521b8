//! chronoline CLI entry point.

use chronoline_engine::{HostHandle, HttpHost, WorkbenchHost};
use chronoline_tui::Mode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "chronoline",
    about = "Timeline viewer and editor for dated course events",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Display the timeline
    View {
        #[command(flatten)]
        host: HostArgs,
    },
    /// Author the timeline in the studio editor
    Edit {
        #[command(flatten)]
        host: HostArgs,
    },
}

#[derive(Args)]
struct HostArgs {
    /// Base URL of the course-platform widget handlers
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Local workbench file (degraded host without lifecycle notifications)
    #[arg(long, default_value = "timeline.json")]
    file: PathBuf,

    /// Seed the workbench file with the demo scenario if it does not exist
    #[arg(long)]
    demo: bool,
}

impl HostArgs {
    async fn into_host(self) -> Result<HostHandle, Box<dyn std::error::Error>> {
        if let Some(url) = self.url {
            Ok(HostHandle::Http(HttpHost::new(url)?))
        } else {
            let host = WorkbenchHost::new(self.file);
            if self.demo {
                host.seed_sample().await?;
            }
            Ok(HostHandle::Workbench(host))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The TUI owns stdout; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::View { host } => chronoline_tui::run(host.into_host().await?, Mode::Viewer).await,
        Command::Edit { host } => chronoline_tui::run(host.into_host().await?, Mode::Editor).await,
    }
}

mod client;
mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use eventdir_core::agenda::Agenda;

#[derive(Parser)]
#[command(name = "eventdir")]
#[command(about = "Interact with your eventdir records and the eventdir API")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events grouped by day
    List {
        /// Show events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only events carrying this tag (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Only online events
        #[arg(long, conflicts_with = "in_person")]
        online: bool,

        /// Only in-person events
        #[arg(long)]
        in_person: bool,

        /// Only free events
        #[arg(long)]
        free: bool,

        /// Substring match on the organization name
        #[arg(long)]
        org: Option<String>,

        /// Free-text search over names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Include submissions and declined records, not just approved events
        #[arg(long)]
        all: bool,
    },
    /// Write events.json and events_grouped_by_date.json for static hosting
    Export {
        /// Output directory
        #[arg(short, long, default_value = "dist/data")]
        out: PathBuf,
    },
    /// Validate and submit an event from a YAML or JSON file
    Submit {
        /// Submission file (.yml, .yaml or .json)
        file: PathBuf,

        /// Write straight into the local record directory instead of POSTing
        #[arg(long)]
        local: bool,

        /// Server base URL
        #[arg(long, default_value = client::DEFAULT_SERVER_URL)]
        server: String,
    },
    /// Parse every record in the data directory and report failures
    Validate,
    /// Review submitted events (staff)
    Review {
        #[command(subcommand)]
        action: ReviewAction,

        /// Bearer token for the review API
        #[arg(long, env = "EVENTDIR_REVIEW_TOKEN")]
        token: String,

        /// Server base URL
        #[arg(long, default_value = client::DEFAULT_SERVER_URL)]
        server: String,
    },
    /// Generate fake event records for local development
    Mock {
        /// How many events to generate
        #[arg(short, long, default_value_t = 10)]
        count: usize,

        /// Earliest event date (YYYY-MM-DD, default today)
        #[arg(long)]
        from: Option<String>,

        /// Latest event date (YYYY-MM-DD, default +90 days)
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
enum ReviewAction {
    /// List submissions waiting for review
    List,
    /// Approve a submission by id
    Approve { id: String },
    /// Decline (and delete) a submission by id
    Decline { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("eventdir=debug,eventdir_core=debug")
            .init();
    }

    match cli.command {
        Commands::List {
            from,
            to,
            tag,
            online,
            in_person,
            free,
            org,
            search,
            all,
        } => {
            let agenda = Agenda::load()?;
            let options = commands::list::Options {
                from,
                to,
                tags: tag,
                online: if online {
                    Some(true)
                } else if in_person {
                    Some(false)
                } else {
                    None
                },
                free,
                org,
                search,
                all,
            };
            commands::list::run(&agenda, options)
        }
        Commands::Export { out } => {
            let agenda = Agenda::load()?;
            commands::export::run(&agenda, &out)
        }
        Commands::Submit {
            file,
            local,
            server,
        } => commands::submit::run(&file, local, &server).await,
        Commands::Validate => {
            let agenda = Agenda::load()?;
            commands::validate::run(&agenda)
        }
        Commands::Review {
            action,
            token,
            server,
        } => {
            let client = client::Client::new(&server);
            match action {
                ReviewAction::List => commands::review::list(&client, &token).await,
                ReviewAction::Approve { id } => {
                    commands::review::approve(&client, &token, &id).await
                }
                ReviewAction::Decline { id } => {
                    commands::review::decline(&client, &token, &id).await
                }
            }
        }
        Commands::Mock { count, from, to } => {
            let agenda = Agenda::load()?;
            commands::mock::run(&agenda, count, from.as_deref(), to.as_deref())
        }
    }
}

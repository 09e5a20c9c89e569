use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use todo_sync::{Config, SyncedList, TodoClient, TodoView, UreqTransport};

#[derive(Parser)]
#[command(name = "todo", about = "Keep a local todo list in sync with a todo server")]
struct Cli {
    /// Base URL of the todo server (overrides TODO_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Show the list without the add form
    #[arg(long)]
    read_only: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current list
    List,
    /// Add one item, then print the refreshed list
    Add { text: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let url = cli.url.unwrap_or_else(|| config.api_url.clone());
    let mut options = config.view_options();
    options.allow_create &= !cli.read_only;
    debug!(%url, allow_create = options.allow_create, "starting");

    let mut view = TodoView::new(TodoClient::new(&url), Arc::new(UreqTransport::new()), options);
    let mounted = view.mount().await;

    match cli.command {
        Some(Command::List) => {
            show(&view);
            mounted?;
        }
        Some(Command::Add { text }) => {
            let creator = view.creator().ok_or("adding items is disabled")?;
            creator.input(text);
            let submitted = creator.submit().await;
            show(&view);
            submitted?;
        }
        None => interactive(&mut view).await?,
    }
    Ok(())
}

/// Each stdin line is typed into the draft and submitted. Without a creator a
/// line just refreshes the list.
async fn interactive(view: &mut TodoView) -> Result<(), Box<dyn Error>> {
    show(view);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let applied = match view.creator() {
            Some(creator) => {
                creator.input(line);
                creator.submit().await
            }
            None => view.list().refresh().await,
        };
        if let Err(error) = applied {
            // Shown to the user through the notice.
            debug!(%error, "line not applied");
        }
        show(view);
    }
    Ok(())
}

/// Entries on stdout, the notice (if any) on stderr.
fn show(view: &TodoView) {
    print!("{}", view.render_items());
    if let Some(line) = view.notice_line() {
        eprintln!("{line}");
    }
}

mod app;
mod config;
mod error;
mod event;
mod form;
mod github;
mod lookup;
mod reconcile;
mod store;
#[cfg(test)]
mod test_utils;
mod ui;
mod view;

use app::App;
use clap::Parser;
use config::{ApiFlavor, Config};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::BranchscopeError;
use event::AppEvent;
use form::{FieldName, InputForm};
use futures::StreamExt;
use github::{client::GitHubLookup, BranchLookup};
use reconcile::FetchTicket;
use std::path::Path;
use std::sync::{Arc, Mutex};
use store::{FileStore, KeyValueStore, MemoryStore};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "branchscope", about = "Look up a GitHub branch head, its repository and your API rate limit")]
struct Cli {
    #[arg(long, help = "Repository owner to pre-fill")]
    owner: Option<String>,

    #[arg(long, help = "Repository name to pre-fill")]
    repo: Option<String>,

    #[arg(long, help = "Branch name to pre-fill")]
    branch: Option<String>,

    #[arg(long, value_enum, help = "GitHub API to query")]
    api: Option<CliApi>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CliApi {
    Graphql,
    Rest,
}

impl From<CliApi> for ApiFlavor {
    fn from(api: CliApi) -> Self {
        match api {
            CliApi::Graphql => ApiFlavor::Graphql,
            CliApi::Rest => ApiFlavor::Rest,
        }
    }
}

fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("warning: logging disabled, cannot open {}: {e}", path.display());
            return;
        }
    };

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("branchscope=info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn open_store(config: &Config) -> Box<dyn KeyValueStore> {
    let path = config.resolved_store_path();
    match FileStore::open(path.clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Token store unavailable, using memory");
            Box::new(MemoryStore::default())
        }
    }
}

fn start_lookup(
    lookup: Arc<dyn BranchLookup>,
    ticket: FetchTicket,
    tx: mpsc::UnboundedSender<AppEvent>,
) -> tokio::task::JoinHandle<()> {
    let FetchTicket { generation, tuple } = ticket;
    tokio::spawn(async move {
        // A panicking lookup must still settle its generation.
        let task = tokio::spawn(async move { lookup.lookup(&tuple).await });
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(generation, error = %e, "Lookup task failed");
                Err(BranchscopeError::Transport(format!("lookup task failed: {e}")))
            }
        };
        let _ = tx.send(AppEvent::LookupDone { generation, outcome });
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.api.map(ApiFlavor::from));
    init_logging(&config.resolved_log_file());
    tracing::info!(?config, "Starting");

    let mut form = InputForm::new(open_store(&config), config.github_token.as_deref());
    for (name, value) in [
        (FieldName::Owner, &cli.owner),
        (FieldName::Repo, &cli.repo),
        (FieldName::Branch, &cli.branch),
    ] {
        if let Some(v) = value {
            form.prefill(name, v);
        }
    }

    let lookup: Arc<dyn BranchLookup> = Arc::new(GitHubLookup::new(config.api));
    let mut app = App::new(config, form);

    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });

    loop {
        if let Some(ticket) = app.take_pending_fetch() {
            start_lookup(lookup.clone(), ticket, tx.clone());
        }

        terminal.draw(|f| app.render(f))?;

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };
        app.handle_event(first);
        while let Ok(pending) = rx.try_recv() {
            app.handle_event(pending);
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

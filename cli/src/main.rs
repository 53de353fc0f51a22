use board::consts::DEFAULT_COLOR;
use board::note::{NewNote, NoteId, ValidationError, validate_new_note};
use clap::{Parser, Subcommand};
use sync::http::{API_URL_VAR, DEFAULT_API_URL};
use sync::{HttpNoteStore, NoteStore, StoreError};


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "stickyboard", about = "Sticky note store CLI")]
struct Cli {
    #[arg(long, env = API_URL_VAR, default_value = DEFAULT_API_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the note store is up.
    Ping,
    /// Print every note, newest first.
    List,
    /// Create a note.
    Add {
        content: String,
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f64>,
    },
    /// Move a note's top-left corner.
    Move {
        id: NoteId,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Set a note's stacking index.
    Raise { id: NoteId, z_index: i64 },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let store = HttpNoteStore::new(&cli.base_url)?;

    match cli.command {
        Command::Ping => run_ping(&store).await,
        Command::List => print_json(&store.list_notes().await?),
        Command::Add { content, color, x, y } => {
            validate_new_note(&content, &color)?;
            let note = NewNote { content, color, position_x: x, position_y: y };
            print_json(&store.create_note(&note).await?)
        }
        Command::Move { id, x, y } => print_json(&store.update_position(id, x, y).await?),
        Command::Raise { id, z_index } => print_json(&store.update_z_index(id, z_index).await?),
    }
}

async fn run_ping(store: &HttpNoteStore) -> Result<(), CliError> {
    let url = format!("{}/healthz", store.base_url());
    let status = reqwest::get(url).await?.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

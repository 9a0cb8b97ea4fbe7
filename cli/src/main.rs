use std::path::{Path, PathBuf};
use std::sync::Arc;

use canvas::doc::{BookFormat, Page};
use canvas::wire::PhotobookEnvelope;
use clap::{Parser, Subcommand};
use editor::config::DEFAULT_BASE_URL;
use editor::{BridgeError, EditorConfig, EditorSession, HttpPhotobookApi, PhotobookApi, SessionPhase};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("gallery {gallery_id} has no editable photobook (phase: {phase})")]
    NotEditable { gallery_id: Uuid, phase: SessionPhase },
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "photobook", about = "Photobook layout storage CLI")]
struct Cli {
    #[arg(long, env = "PHOTOBOOK_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the gallery's photobook, or null.
    Show { gallery_id: Uuid },
    /// Choose a format and create the draft.
    Create {
        gallery_id: Uuid,
        #[arg(long)]
        format: BookFormat,
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Append two empty pages and save.
    AddSpread { gallery_id: Uuid },
    /// Save metadata and optionally replace all pages from a JSON file.
    Save {
        gallery_id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, help = "JSON array of pages")]
        pages: Option<PathBuf>,
    },
    /// Submit the photobook; it can no longer be edited afterwards.
    Submit {
        gallery_id: Uuid,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = EditorConfig::with_env_timeouts(&cli.base_url)?;
    let api: Arc<dyn PhotobookApi> = Arc::new(HttpPhotobookApi::new(&config)?);

    let session = run(api, cli.command).await?;
    print_json(&PhotobookEnvelope { photobook: session.to_doc() })
}

async fn run(api: Arc<dyn PhotobookApi>, command: Command) -> Result<EditorSession, CliError> {
    let gallery_id = match &command {
        Command::Show { gallery_id }
        | Command::Create { gallery_id, .. }
        | Command::AddSpread { gallery_id }
        | Command::Save { gallery_id, .. }
        | Command::Submit { gallery_id, .. } => *gallery_id,
    };
    let mut session = EditorSession::new(api, gallery_id);
    session.load().await?;

    match command {
        Command::Show { .. } => {}
        Command::Create { format, title, .. } => {
            session.select_format(format, &title).await?;
        }
        Command::AddSpread { .. } => {
            editable_canvas(&mut session)?.add_spread();
            session.save().await?;
        }
        Command::Save { title, notes, pages, .. } => {
            if let Some(title) = title {
                session.set_title(&title)?;
            }
            if let Some(notes) = notes {
                session.set_notes(&notes)?;
            }
            if let Some(path) = pages {
                let pages = read_pages(&path)?;
                editable_canvas(&mut session)?.load_pages(pages);
            }
            session.save().await?;
        }
        Command::Submit { notes, .. } => {
            if let Some(notes) = notes {
                session.set_notes(&notes)?;
            }
            session.review()?;
            session.submit().await?;
        }
    }
    Ok(session)
}

fn editable_canvas(session: &mut EditorSession) -> Result<&mut canvas::engine::EngineCore, CliError> {
    let gallery_id = session.gallery_id();
    let phase = session.phase();
    session
        .canvas_mut()
        .ok_or(CliError::NotEditable { gallery_id, phase })
}

fn read_pages(path: &Path) -> Result<Vec<Page>, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    Ok(serde_json::from_str(&text)?)
}

fn print_json(value: &PhotobookEnvelope) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

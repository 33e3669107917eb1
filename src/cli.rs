//! Command-line surface: the interactive interface by default, plus headless
//! `compose` and `library` commands for scripting.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::export;
use crate::muse::{self, PoetryModel};
use crate::session::{
    ImageSelection, PoemStyle, SessionIntent, SessionReducer, SessionState, VisualTheme,
    PREVIEW_MAX_DIMENSION,
};
use crate::storage::{KvStore, Library, PoemDraft, SavedPoemRecord};
use crate::ui::app::UiCommand;
use crate::ui::effects::run_command;
use crate::ui::events::AppEvent;
use crate::ui::mvi::Reducer;
use crate::ui::LaunchOptions;

#[derive(Debug, Parser)]
#[command(name = "photopoet", version)]
#[command(about = "Turn a photograph into a poem", long_about = None)]
pub struct Cli {
    /// Configuration file (default: <config_dir>/photopoet/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Open this photograph on startup
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Initial poem style
    #[arg(long, value_enum)]
    pub style: Option<PoemStyle>,

    /// Initial visual theme
    #[arg(long, value_enum)]
    pub theme: Option<VisualTheme>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Interactive mode is the default when no subcommand is given.
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            image: self.image.clone(),
            style: self.style,
            theme: self.theme,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose a poem from a photograph without the interface
    Compose(ComposeArgs),
    /// Inspect or manage saved poems
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },
}

#[derive(Debug, clap::Args)]
pub struct ComposeArgs {
    /// Photograph to write about
    pub image: PathBuf,

    #[arg(long, value_enum, default_value_t = PoemStyle::default())]
    pub style: PoemStyle,

    /// Glean inspiration from the scene before composing
    #[arg(long)]
    pub inspire: bool,

    /// Keep the poem in the library
    #[arg(long)]
    pub save: bool,

    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum LibraryAction {
    /// List saved poems, newest first
    List,
    /// Print one poem
    Show { id: u64 },
    /// Remove a poem
    Delete { id: u64 },
    /// Write a poem as a document
    Export {
        id: u64,
        /// Output directory (default: the configured export directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

/// Drive one compose session to completion against `model`.
///
/// Runs the same reducer the interface uses, so the result is exactly what
/// the user would have seen on screen.
pub async fn compose_session(
    model: &dyn PoetryModel,
    image: ImageSelection,
    style: PoemStyle,
    inspire: bool,
) -> SessionState {
    let mut state = SessionState::new(style, VisualTheme::default());
    state = SessionReducer::reduce(state, SessionIntent::SelectImage(image));

    if inspire {
        state = SessionReducer::reduce(state, SessionIntent::RequestInspiration);
        if let Some(image) = state.image.clone() {
            let command = UiCommand::DescribeImage {
                epoch: state.epoch,
                image,
            };
            if let AppEvent::InspirationReady { epoch, outcome } =
                run_command(model, command).await
            {
                state = SessionReducer::reduce(
                    state,
                    SessionIntent::InspirationResolved { epoch, outcome },
                );
            }
        }
        // A failed inspiration does not block the poem.
        state = SessionReducer::reduce(state, SessionIntent::DismissError);
    }

    state = SessionReducer::reduce(state, SessionIntent::StartGeneration);
    if let Some(image) = state.image.clone() {
        let command = UiCommand::ComposePoem {
            epoch: state.epoch,
            image,
            style: state.selected_style,
        };
        if let AppEvent::PoemReady { epoch, outcome } = run_command(model, command).await {
            state = SessionReducer::reduce(state, SessionIntent::PoemResolved { epoch, outcome });
        }
    }
    state
}

pub async fn run_compose(config: &Config, args: ComposeArgs) -> Result<()> {
    let image = ImageSelection::from_path(&args.image)
        .with_context(|| format!("Failed to load {}", args.image.display()))?;
    let model = muse::build_model(&config.gemini);

    let mut state = compose_session(model.as_ref(), image, args.style, args.inspire).await;
    if let Some(message) = state.error_message.take() {
        bail!(message);
    }
    if let Some(title) = args.title {
        state = SessionReducer::reduce(state, SessionIntent::UpdateTitle(title));
    }
    // An empty poem is a valid result and prints as a blank line.
    let poem = state.poem_text.clone().unwrap_or_default();

    let mut stdout = io::stdout().lock();
    if let Some(title) = &state.poem_title {
        writeln!(stdout, "{}\n", title)?;
    }
    writeln!(stdout, "{}", poem)?;
    if let Some(inspiration) = &state.inspiration_text {
        writeln!(stdout, "\n“{}”", inspiration)?;
    }

    if args.save {
        let library = open_library(config)?;
        let draft = PoemDraft {
            title: state.poem_title.clone(),
            poem,
            inspiration: state.inspiration_text.clone(),
            image_preview: state
                .image
                .as_ref()
                .map(|image| image.thumbnail_data_uri(PREVIEW_MAX_DIMENSION)),
        };
        let record = library.save_poem(draft).context("Failed to save poem")?;
        writeln!(stdout, "\nSaved as {}", record.id)?;
    }
    Ok(())
}

pub fn run_library(config: &Config, action: LibraryAction) -> Result<()> {
    let library = open_library(config)?;
    let mut stdout = io::stdout().lock();

    match action {
        LibraryAction::List => {
            let records = library.list_saved_poems();
            if records.is_empty() {
                writeln!(stdout, "Your library is empty.")?;
            }
            for record in records {
                writeln!(stdout, "{}", list_row(&record))?;
            }
        }
        LibraryAction::Show { id } => {
            let record = find(&library, id)?;
            writeln!(stdout, "{}", record.display_title())?;
            writeln!(
                stdout,
                "{}\n",
                record.created_at.with_timezone(&Local).format("%B %-d, %Y")
            )?;
            writeln!(stdout, "{}", record.poem)?;
            if let Some(inspiration) = &record.inspiration {
                writeln!(stdout, "\n“{}”", inspiration)?;
            }
        }
        LibraryAction::Delete { id } => {
            if !library.delete_poem(id).context("Failed to delete poem")? {
                bail!("No saved poem with id {}", id);
            }
            writeln!(stdout, "Deleted {}", id)?;
        }
        LibraryAction::Export { id, out } => {
            let record = find(&library, id)?;
            let dir = out.unwrap_or_else(|| config.storage.resolved_export_dir());
            let path = export::export_document(
                &dir,
                record.title.as_deref(),
                record.inspiration.as_deref(),
                &record.poem,
                record.created_at.with_timezone(&Local),
            )?;
            writeln!(stdout, "{}", path.display())?;
        }
    }
    Ok(())
}

fn open_library(config: &Config) -> Result<Library> {
    let dir = config.storage.resolved_data_dir();
    let store = KvStore::open(&dir)
        .with_context(|| format!("Failed to open data directory {}", dir.display()))?;
    Ok(Library::new(store))
}

fn find(library: &Library, id: u64) -> Result<SavedPoemRecord> {
    library
        .get(id)
        .with_context(|| format!("No saved poem with id {}", id))
}

/// `<id>  <date>  <title>  <first line>`
pub fn list_row(record: &SavedPoemRecord) -> String {
    format!(
        "{}  {}  {}  {}",
        record.id,
        record.created_at.with_timezone(&Local).format("%Y-%m-%d"),
        record.display_title(),
        record.first_line()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::parse_from(["photopoet", "library", "export", "7", "--out", "/tmp/x"]);
        match cli.command {
            Some(Command::Library {
                action: LibraryAction::Export { id, out },
            }) => {
                assert_eq!(id, 7);
                assert_eq!(out, Some(PathBuf::from("/tmp/x")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn interface_is_default() {
        let cli = Cli::parse_from(["photopoet", "--style", "haiku"]);
        assert!(cli.is_interactive());
        assert_eq!(cli.launch_options().style, Some(PoemStyle::Haiku));
    }

    #[test]
    fn list_row_shows_title_and_first_line() {
        let record = SavedPoemRecord {
            id: 42,
            title: None,
            poem: "\nfirst light\nsecond".to_string(),
            inspiration: None,
            image_preview: None,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        };
        let row = list_row(&record);
        assert!(row.starts_with("42  "));
        assert!(row.ends_with("Untitled  first light"));
    }
}

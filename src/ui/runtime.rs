use crate::config::Config;
use crate::muse;
use crate::session::{PoemStyle, SessionIntent, VisualTheme};
use crate::storage::{KvStore, Library, PlaybackSettings};
use crate::ui::app::{App, AppSettings};
use crate::ui::effects::spawn_command_worker;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, InputAction};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use tokio::runtime::Handle;

/// Command-line overrides applied once the interface is up.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub image: Option<PathBuf>,
    pub style: Option<PoemStyle>,
    pub theme: Option<VisualTheme>,
}

/// Run the interactive interface until the user quits.
///
/// Blocks the calling thread; remote generation runs on `handle`.
pub fn run(config: &Config, launch: LaunchOptions, handle: Handle) -> io::Result<()> {
    let store = KvStore::open(config.storage.resolved_data_dir())
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    let library = Library::new(store.clone());
    let playback = PlaybackSettings::load(&store);
    let model = muse::build_model(&config.gemini);

    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms.max(16));
    let mut app = App::new(AppSettings::from_config(config), library, playback);
    let events = EventHandler::new(tick_rate);
    app.set_command_sender(spawn_command_worker(&handle, model, events.sender()));

    if let Some(style) = launch.style {
        app.dispatch_session(SessionIntent::SelectStyle(style));
    }
    if let Some(theme) = launch.theme {
        app.dispatch_session(SessionIntent::SelectTheme(theme));
    }
    if let Some(path) = launch.image {
        app.load_image_from_path(&path.to_string_lossy());
    }

    let (mut terminal, guard) = setup_terminal()?;
    tracing::info!("Interface started");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => {
                if handle_key(&mut app, key) == InputAction::ImagePaste {
                    app.paste_image();
                }
            }
            Ok(AppEvent::Paste(text)) => app.on_paste(&text),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize(cols, rows)) => {
                tracing::debug!(cols, rows, "Terminal resized");
                terminal.autoresize()?;
            }
            Ok(AppEvent::InspirationReady { epoch, outcome }) => {
                app.on_inspiration_ready(epoch, outcome)
            }
            Ok(AppEvent::PoemReady { epoch, outcome }) => app.on_poem_ready(epoch, outcome),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    tracing::info!("Interface closed");
    Ok(())
}

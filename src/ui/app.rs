use crate::clipboard::{ClipboardError, ClipboardHandler};
use crate::config::Config;
use crate::export::{self, ShareOutcome, ShareTarget};
use crate::session::{
    ImageSelection, PoemStyle, RemoteOutcome, Screen, SessionIntent, SessionReducer, SessionState,
    View, PREVIEW_MAX_DIMENSION,
};
use crate::storage::{Library, PlaybackSettings, PoemDraft, SavedPoemRecord};
use crate::ui::editor::{EditorIntent, EditorReducer, EditorState};
use crate::ui::library::{LibraryIntent, LibraryReducer, LibraryViewState};
use crate::ui::mvi::Reducer;
use crate::ui::prompt::{PromptIntent, PromptPurpose, PromptReducer, PromptState};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long a status notice stays in the footer.
const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopupKind {
    Share,
    Help,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Main,
    Popup(PopupKind),
}

/// Work the UI hands to the effects worker.
#[derive(Debug)]
pub enum UiCommand {
    DescribeImage {
        epoch: u64,
        image: ImageSelection,
    },
    ComposePoem {
        epoch: u64,
        image: ImageSelection,
        style: PoemStyle,
    },
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient one-line status shown in the footer.
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    created: Instant,
}

/// Startup settings the App needs from configuration.
#[derive(Clone, Debug)]
pub struct AppSettings {
    pub export_dir: PathBuf,
    pub share_url: String,
    pub default_style: PoemStyle,
    pub default_theme: crate::session::VisualTheme,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            export_dir: config.storage.resolved_export_dir(),
            share_url: config.ui.share_url.clone(),
            default_style: config.ui.default_style,
            default_theme: config.ui.default_theme,
        }
    }
}

pub struct App {
    should_quit: bool,
    focus: Focus,
    /// Compose/library session (MVI pattern).
    session: SessionState,
    /// Library list and highlight (MVI pattern).
    library_view: LibraryViewState,
    editor: EditorState,
    prompt: PromptState,
    share_selection: usize,
    playback: PlaybackSettings,
    library: Library,
    command_sender: Option<UiCommandSender>,
    /// Opened on first use; some sessions have no clipboard at all.
    clipboard: Option<ClipboardHandler>,
    image_label: Option<String>,
    /// Decoded once on selection; drawing runs every tick.
    image_dimensions: Option<(u32, u32)>,
    notice: Option<Notice>,
    animation_tick: usize,
    settings: AppSettings,
}

impl App {
    pub fn new(settings: AppSettings, library: Library, playback: PlaybackSettings) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Main,
            session: SessionState::new(settings.default_style, settings.default_theme),
            library_view: LibraryViewState::default(),
            editor: EditorState::default(),
            prompt: PromptState::default(),
            share_selection: 0,
            playback,
            library,
            command_sender: None,
            clipboard: None,
            image_label: None,
            image_dimensions: None,
            notice: None,
            animation_tick: 0,
            settings,
        }
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.command_sender = Some(sender);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn library_view(&self) -> &LibraryViewState {
        &self.library_view
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn prompt(&self) -> &PromptState {
        &self.prompt
    }

    pub fn playback(&self) -> &PlaybackSettings {
        &self.playback
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn image_label(&self) -> Option<&str> {
        self.image_label.as_deref()
    }

    pub fn image_dimensions(&self) -> Option<(u32, u32)> {
        self.image_dimensions
    }

    pub fn animation_tick(&self) -> usize {
        self.animation_tick
    }

    pub fn share_selection(&self) -> usize {
        self.share_selection
    }

    pub fn popup_kind(&self) -> Option<PopupKind> {
        match self.focus {
            Focus::Popup(kind) => Some(kind),
            Focus::Main => None,
        }
    }

    /// Keys go to a text field rather than to shortcuts.
    pub fn in_text_input(&self) -> bool {
        self.prompt.is_active() || self.editor.is_open()
    }

    pub fn on_tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.created.elapsed() >= NOTICE_TTL)
        {
            self.notice = None;
        }
    }

    pub fn toggle_popup(&mut self, kind: PopupKind) -> bool {
        self.focus = match self.focus {
            Focus::Popup(active) if active == kind => Focus::Main,
            _ => {
                if kind == PopupKind::Share {
                    self.share_selection = 0;
                }
                Focus::Popup(kind)
            }
        };
        matches!(self.focus, Focus::Popup(_))
    }

    pub fn close_popup(&mut self) {
        self.focus = Focus::Main;
    }

    // ========================================================================
    // Session (MVI pattern)
    // ========================================================================

    /// Dispatch an intent to the session reducer and start any remote work
    /// the reducer accepted.
    pub fn dispatch_session(&mut self, intent: SessionIntent) {
        let was_loading = self.session.inspiration_loading;
        let was_pending = self.session.generation_pending;

        dispatch_mvi!(self, session, SessionReducer, intent);

        let epoch = self.session.epoch;
        if !was_loading && self.session.inspiration_loading {
            if let Some(image) = self.session.image.clone() {
                if !self.send_command(UiCommand::DescribeImage { epoch, image }) {
                    self.dispatch_session(SessionIntent::InspirationResolved {
                        epoch,
                        outcome: Err("Could not glean inspiration from this image.".to_string()),
                    });
                }
            }
        }
        if !was_pending && self.session.generation_pending {
            if let Some(image) = self.session.image.clone() {
                let style = self.session.selected_style;
                if !self.send_command(UiCommand::ComposePoem {
                    epoch,
                    image,
                    style,
                }) {
                    self.dispatch_session(SessionIntent::PoemResolved {
                        epoch,
                        outcome: Err("The muses are silent. Please try again.".to_string()),
                    });
                }
            }
        }
    }

    pub fn on_inspiration_ready(&mut self, epoch: u64, outcome: RemoteOutcome) {
        self.dispatch_session(SessionIntent::InspirationResolved { epoch, outcome });
    }

    pub fn on_poem_ready(&mut self, epoch: u64, outcome: RemoteOutcome) {
        self.dispatch_session(SessionIntent::PoemResolved { epoch, outcome });
    }

    /// "Try again": clear the error and, with an image present, regenerate.
    pub fn retry_after_error(&mut self) {
        self.dispatch_session(SessionIntent::DismissError);
        if self.session.has_image() {
            self.dispatch_session(SessionIntent::StartGeneration);
        }
    }

    pub fn select_image(&mut self, image: ImageSelection, label: impl Into<String>) {
        tracing::info!(mime_type = %image.mime_type, bytes = image.byte_len(), "Image selected");
        self.image_label = Some(label.into());
        self.image_dimensions = image.dimensions();
        self.editor = EditorState::Closed;
        self.dispatch_session(SessionIntent::SelectImage(image));
    }

    /// Load a photograph from a user-typed or dropped path.
    pub fn load_image_from_path(&mut self, raw: &str) {
        let Some(path) = normalize_path(raw) else {
            return;
        };
        match ImageSelection::from_path(&path) {
            Ok(image) => {
                let label = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.select_image(image, label);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to load image");
                self.set_error_notice(err.to_string());
            }
        }
    }

    pub fn paste_image(&mut self) {
        let result = self.clipboard().and_then(|c| c.get_image());
        match result {
            Ok(image) => self.select_image(image, "Pasted image"),
            Err(err) => {
                tracing::debug!(error = %err, "Clipboard image paste failed");
                self.set_error_notice(err.to_string());
            }
        }
    }

    pub fn reset(&mut self) {
        self.editor = EditorState::Closed;
        self.prompt = PromptState::Hidden;
        self.close_popup();
        self.image_label = None;
        self.image_dimensions = None;
        self.dispatch_session(SessionIntent::Reset);
    }

    // ========================================================================
    // Prompt (MVI pattern)
    // ========================================================================

    pub fn dispatch_prompt(&mut self, intent: PromptIntent) {
        dispatch_mvi!(self, prompt, PromptReducer, intent);
    }

    pub fn open_image_prompt(&mut self) {
        self.dispatch_prompt(PromptIntent::Open {
            purpose: PromptPurpose::ImagePath,
            initial: String::new(),
        });
    }

    pub fn open_title_prompt(&mut self) {
        if self.session.screen != Screen::Ready {
            return;
        }
        let initial = self.session.poem_title.clone().unwrap_or_default();
        self.dispatch_prompt(PromptIntent::Open {
            purpose: PromptPurpose::Title,
            initial,
        });
    }

    pub fn submit_prompt(&mut self) {
        let PromptState::Active { purpose, input, .. } = std::mem::take(&mut self.prompt) else {
            return;
        };
        match purpose {
            PromptPurpose::ImagePath => self.load_image_from_path(&input),
            PromptPurpose::Title => self.dispatch_session(SessionIntent::UpdateTitle(input)),
        }
    }

    // ========================================================================
    // Editor (MVI pattern)
    // ========================================================================

    pub fn dispatch_editor(&mut self, intent: EditorIntent) {
        dispatch_mvi!(self, editor, EditorReducer, intent);
    }

    pub fn open_editor(&mut self) {
        if self.session.screen != Screen::Ready {
            return;
        }
        let text = self.session.poem_text.clone().unwrap_or_default();
        self.dispatch_editor(EditorIntent::Open { text });
    }

    /// Keep the edited text as the poem.
    pub fn commit_editor(&mut self) {
        if let Some(text) = self.editor.text() {
            self.dispatch_session(SessionIntent::UpdatePoemText(text));
        }
        self.dispatch_editor(EditorIntent::Close);
    }

    pub fn cancel_editor(&mut self) {
        self.dispatch_editor(EditorIntent::Close);
    }

    // ========================================================================
    // Export
    // ========================================================================

    pub fn copy_poem(&mut self) {
        let Some(poem) = self.session.savable_poem().map(str::to_string) else {
            return;
        };
        let text = export::share_text(
            self.session.poem_title.as_deref(),
            self.session.inspiration_text.as_deref(),
            &poem,
        );
        match self.clipboard().and_then(|c| c.set_text(&text)) {
            Ok(()) => self.set_info_notice("Copied to clipboard"),
            Err(err) => self.set_error_notice(err.to_string()),
        }
    }

    /// Save the current poem to the library and export it as a document.
    pub fn save_poem(&mut self) -> Option<SavedPoemRecord> {
        if self.session.screen != Screen::Ready {
            return None;
        }
        let Some(poem) = self.session.savable_poem().map(str::to_string) else {
            self.set_error_notice("There is no poem to save yet.");
            return None;
        };
        let draft = PoemDraft {
            title: self.session.poem_title.clone(),
            poem,
            inspiration: self.session.inspiration_text.clone(),
            image_preview: self
                .session
                .image
                .as_ref()
                .map(|image| image.thumbnail_data_uri(PREVIEW_MAX_DIMENSION)),
        };

        let record = match self.library.save_poem(draft) {
            Ok(record) => record,
            Err(err) => {
                tracing::error!(error = %err, "Failed to save poem");
                self.set_error_notice(format!("Could not save: {}", err));
                return None;
            }
        };

        match export::export_document(
            &self.settings.export_dir,
            record.title.as_deref(),
            record.inspiration.as_deref(),
            &record.poem,
            Local::now(),
        ) {
            Ok(path) => self.set_info_notice(format!(
                "Saved to your library · exported {}",
                path.display()
            )),
            Err(err) => {
                tracing::warn!(error = %err, "Document export failed");
                self.set_error_notice(format!("Saved to your library, but export failed: {}", err));
            }
        }
        Some(record)
    }

    pub fn open_share_menu(&mut self) {
        if self.session.savable_poem().is_some() && self.popup_kind() != Some(PopupKind::Share) {
            self.toggle_popup(PopupKind::Share);
        }
    }

    pub fn move_share_selection(&mut self, direction: i32) {
        let len = ShareTarget::ALL.len();
        let current = self.share_selection.min(len - 1);
        self.share_selection = if direction.is_negative() {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        } else if current + 1 >= len {
            0
        } else {
            current + 1
        };
    }

    pub fn share_selected(&mut self) {
        if let Some(target) = ShareTarget::ALL.get(self.share_selection).copied() {
            self.share_to(target);
        }
    }

    pub fn share_to(&mut self, target: ShareTarget) {
        self.close_popup();
        let Some(poem) = self.session.savable_poem().map(str::to_string) else {
            return;
        };
        let title = self.session.poem_title.clone();
        let share_url = self.settings.share_url.clone();
        let result = export::share(
            target,
            title.as_deref(),
            &poem,
            &share_url,
            self.clipboard().ok(),
        );
        match result {
            Ok(ShareOutcome::Opened) => {
                self.set_info_notice(format!("Opened {}", target.label()))
            }
            Ok(ShareOutcome::CopiedLink(_)) => self.set_info_notice(format!(
                "Could not open a browser; {} link copied",
                target.label()
            )),
            Err(err) => self.set_error_notice(err.to_string()),
        }
    }

    // ========================================================================
    // Library (MVI pattern)
    // ========================================================================

    pub fn dispatch_library(&mut self, intent: LibraryIntent) {
        dispatch_mvi!(self, library_view, LibraryReducer, intent);
    }

    pub fn toggle_library(&mut self) {
        if self.session.screen == Screen::Library {
            self.close_library();
        } else {
            self.open_library();
        }
    }

    pub fn open_library(&mut self) {
        let records = self.library.list_saved_poems();
        self.dispatch_library(LibraryIntent::Load { records });
        self.close_popup();
        self.dispatch_session(SessionIntent::Navigate(View::Library));
    }

    pub fn close_library(&mut self) {
        self.dispatch_session(SessionIntent::Navigate(View::Compose));
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.library_view.selected_record().map(|r| r.id) else {
            return;
        };
        match self.library.delete_poem(id) {
            Ok(true) => {
                self.dispatch_library(LibraryIntent::Removed { id });
                self.set_info_notice("Poem deleted");
            }
            Ok(false) => {
                // Already gone (another instance); resync the list.
                let records = self.library.list_saved_poems();
                self.dispatch_library(LibraryIntent::Load { records });
            }
            Err(err) => {
                tracing::error!(id, error = %err, "Failed to delete poem");
                self.set_error_notice(format!("Could not delete: {}", err));
            }
        }
    }

    pub fn export_selected(&mut self) {
        let Some(record) = self.library_view.selected_record().cloned() else {
            return;
        };
        match export::export_document(
            &self.settings.export_dir,
            record.title.as_deref(),
            record.inspiration.as_deref(),
            &record.poem,
            record.created_at.with_timezone(&Local),
        ) {
            Ok(path) => self.set_info_notice(format!("Exported {}", path.display())),
            Err(err) => self.set_error_notice(err.to_string()),
        }
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn toggle_mute(&mut self) {
        if let Err(err) = self.playback.toggle_mute() {
            tracing::warn!(error = %err, "Failed to persist mute flag");
            self.set_error_notice(err.to_string());
        }
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        if let Err(err) = self.playback.adjust_volume(delta) {
            tracing::warn!(error = %err, "Failed to persist volume");
            self.set_error_notice(err.to_string());
        }
    }

    /// Bracketed paste: text fields take it verbatim, otherwise a dropped
    /// file path is opened as the photograph.
    pub fn on_paste(&mut self, text: &str) {
        if self.prompt.is_active() {
            self.dispatch_prompt(PromptIntent::InsertText(text.to_string()));
        } else if self.editor.is_open() {
            self.dispatch_editor(EditorIntent::InsertText(text.to_string()));
        } else if self.focus == Focus::Main && self.session.screen.is_compose() {
            self.load_image_from_path(text);
        }
    }

    fn set_info_notice(&mut self, text: impl Into<String>) {
        self.set_notice(text.into(), NoticeKind::Info);
    }

    fn set_error_notice(&mut self, text: impl Into<String>) {
        self.set_notice(text.into(), NoticeKind::Error);
    }

    fn set_notice(&mut self, text: String, kind: NoticeKind) {
        self.notice = Some(Notice {
            text,
            kind,
            created: Instant::now(),
        });
    }

    fn clipboard(&mut self) -> Result<&mut ClipboardHandler, ClipboardError> {
        let handler = match self.clipboard.take() {
            Some(handler) => handler,
            None => ClipboardHandler::new()?,
        };
        Ok(self.clipboard.insert(handler))
    }

    fn send_command(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.command_sender else {
            tracing::warn!("No command worker attached");
            return false;
        };

        match sender.try_send(command) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "Failed to queue command");
                false
            }
        }
    }
}

/// Trim, drop surrounding quotes (drag-and-drop) and expand `~/`.
fn normalize_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| {
            trimmed
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
        })
        .unwrap_or(trimmed);
    if unquoted.is_empty() {
        return None;
    }
    if let Some(rest) = unquoted.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Some(home.join(rest));
        }
    }
    Some(Path::new(unquoted).to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KvStore;
    use tempfile::TempDir;

    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
        0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xf8,
        0xcf, 0xc0, 0xf0, 0x1f, 0x00, 0x05, 0x00, 0x01, 0xff, 0x89, 0x99, 0x3d, 0x1d, 0x00, 0x00,
        0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    fn make_app(dir: &TempDir) -> App {
        let store = KvStore::open(dir.path().join("data")).unwrap();
        let settings = AppSettings {
            export_dir: dir.path().join("exports"),
            share_url: "https://example.invalid".to_string(),
            default_style: PoemStyle::default(),
            default_theme: Default::default(),
        };
        App::new(settings, Library::new(store), PlaybackSettings::in_memory())
    }

    fn image() -> ImageSelection {
        ImageSelection::from_bytes(PNG_1X1, None).unwrap()
    }

    #[test]
    fn generation_without_worker_fails_fast() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);
        app.select_image(image(), "test.png");
        app.dispatch_session(SessionIntent::StartGeneration);

        assert_eq!(app.session().screen, Screen::ImageSelected);
        assert!(!app.session().generation_pending);
        assert_eq!(
            app.session().error_message.as_deref(),
            Some("The muses are silent. Please try again.")
        );
    }

    #[test]
    fn accepted_requests_emit_commands_once() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);
        let (tx, mut rx) = mpsc::channel(8);
        app.set_command_sender(tx);

        app.select_image(image(), "test.png");
        app.dispatch_session(SessionIntent::RequestInspiration);
        app.dispatch_session(SessionIntent::RequestInspiration);
        app.dispatch_session(SessionIntent::StartGeneration);
        app.dispatch_session(SessionIntent::StartGeneration);

        let epoch = app.session().epoch;
        assert!(matches!(
            rx.try_recv(),
            Ok(UiCommand::DescribeImage { epoch: e, .. }) if e == epoch
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(UiCommand::ComposePoem { epoch: e, style: PoemStyle::FreeVerse, .. }) if e == epoch
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn editor_commit_updates_poem() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);
        let (tx, _rx) = mpsc::channel(8);
        app.set_command_sender(tx);
        app.select_image(image(), "test.png");
        app.dispatch_session(SessionIntent::StartGeneration);
        let epoch = app.session().epoch;
        app.on_poem_ready(epoch, Ok("old".into()));

        app.open_editor();
        app.dispatch_editor(EditorIntent::Insert('!'));
        app.commit_editor();

        assert!(!app.editor().is_open());
        assert_eq!(app.session().poem_text.as_deref(), Some("old!"));
    }

    #[test]
    fn title_prompt_only_in_ready() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);
        app.open_title_prompt();
        assert!(!app.prompt().is_active());
    }

    #[test]
    fn share_selection_wraps() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);
        app.move_share_selection(-1);
        assert_eq!(app.share_selection(), ShareTarget::ALL.len() - 1);
        app.move_share_selection(1);
        assert_eq!(app.share_selection(), 0);
    }

    #[test]
    fn bad_path_sets_error_notice() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);
        app.load_image_from_path(&dir.path().join("missing.png").display().to_string());
        assert!(matches!(
            app.notice(),
            Some(Notice {
                kind: NoticeKind::Error,
                ..
            })
        ));
        assert_eq!(app.session().screen, Screen::Idle);
    }

    #[test]
    fn normalize_path_strips_quotes() {
        assert_eq!(
            normalize_path("  '/tmp/a b.png' "),
            Some(PathBuf::from("/tmp/a b.png"))
        );
        assert_eq!(
            normalize_path("\"/tmp/x.jpg\""),
            Some(PathBuf::from("/tmp/x.jpg"))
        );
        assert_eq!(normalize_path("   "), None);
    }
}

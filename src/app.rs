//! App bootstrap and screen navigation.
//!
//! [`NotesApp::start`] loads the config, sets up logging and opens the
//! process-wide note store before any screen exists, so no screen can
//! issue a query against an uninitialized database. Screens are kept on a
//! stack; a list screen is reloaded whenever it comes back into view.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{NotesError, NotesResult};
use crate::logging;
use crate::screens::{Clock, EditorScreen, ListScreen, Navigation, SystemClock};
use crate::store::NoteStore;

/// A screen on the navigation stack
pub enum Screen {
    List(ListScreen),
    Editor(EditorScreen),
}

pub struct NotesApp {
    config: Config,
    store: NoteStore,
    clock: Arc<dyn Clock>,
    stack: Vec<Screen>,
}

impl NotesApp {
    /// Start the app: config, logging, the shared store, then the today list.
    pub async fn start(data_dir: PathBuf) -> NotesResult<Self> {
        let config = Config::new(Some(data_dir))?;
        logging::init_tracing(config.config_dir(), config.log_level())?;
        let store = NoteStore::init_global(config.database_file()).await?.clone();
        Self::with_store(config, store, Arc::new(SystemClock)).await
    }

    /// Start with a private store instead of the process-wide one.
    pub async fn open(data_dir: &Path, clock: Arc<dyn Clock>) -> NotesResult<Self> {
        let config = Config::new(Some(data_dir.to_path_buf()))?;
        let store = NoteStore::open(config.database_file()).await?;
        Self::with_store(config, store, clock).await
    }

    pub async fn with_store(
        config: Config,
        store: NoteStore,
        clock: Arc<dyn Clock>,
    ) -> NotesResult<Self> {
        let mut app = Self {
            config,
            store,
            clock,
            stack: Vec::new(),
        };
        let home = app.list_screen(ListScreen::today(Arc::clone(&app.clock)));
        app.push_list(home).await?;
        tracing::info!("Daynotes started");
        Ok(app)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn current(&self) -> Option<&Screen> {
        self.stack.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut Screen> {
        self.stack.last_mut()
    }

    /// Number of screens on the stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The top screen if it is a list
    pub fn list(&mut self) -> Option<&mut ListScreen> {
        match self.stack.last_mut() {
            Some(Screen::List(list)) => Some(list),
            _ => None,
        }
    }

    /// The top screen if it is the editor
    pub fn editor(&mut self) -> Option<&mut EditorScreen> {
        match self.stack.last_mut() {
            Some(Screen::Editor(editor)) => Some(editor),
            _ => None,
        }
    }

    /// Both the top editor and the store, for saving or deleting
    pub fn editor_with_store(&mut self) -> Option<(&mut EditorScreen, &NoteStore)> {
        match self.stack.last_mut() {
            Some(Screen::Editor(editor)) => Some((editor, &self.store)),
            _ => None,
        }
    }

    /// Follow a navigation request from a screen.
    pub async fn navigate(&mut self, navigation: Navigation) -> NotesResult<()> {
        tracing::debug!(?navigation, "Navigate");
        match navigation {
            Navigation::Editor { note_id } => {
                let editor = EditorScreen::open(&self.store, note_id.as_deref(), Arc::clone(&self.clock))
                    .await?
                    .with_scroll_settle(self.config.scroll_settle())
                    .with_default_color(self.config.default_color());
                self.stack.push(Screen::Editor(editor));
            }
            Navigation::AllNotes => {
                let all = self.list_screen(ListScreen::all(Arc::clone(&self.clock)));
                self.push_list(all).await?;
            }
            Navigation::Back => {
                if self.stack.len() <= 1 {
                    return Err(NotesError::Other("already at the first screen".to_string()));
                }
                self.stack.pop();
                if let Some(Screen::List(list)) = self.stack.last_mut() {
                    list.on_focus(&self.store).await?;
                }
            }
        }
        Ok(())
    }

    fn list_screen(&self, screen: ListScreen) -> ListScreen {
        screen.with_double_tap_window(self.config.double_tap_window())
    }

    async fn push_list(&mut self, mut list: ListScreen) -> NotesResult<()> {
        list.on_focus(&self.store).await?;
        self.stack.push(Screen::List(list));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteColor;
    use crate::screens::{EditorMode, FixedClock, ListKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()))
    }

    #[tokio::test]
    async fn test_open_starts_on_today_list() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = NotesApp::open(temp_dir.path(), clock()).await.unwrap();

        assert_eq!(app.depth(), 1);
        let list = app.list().unwrap();
        assert_eq!(list.kind(), ListKind::Today);
        assert!(list.notes().is_empty());
        assert!(temp_dir.path().join("notes.db").exists());
    }

    #[tokio::test]
    async fn test_new_note_uses_configured_color() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
            config.set_default_color(NoteColor::Amber).unwrap();
        }
        let mut app = NotesApp::open(temp_dir.path(), clock()).await.unwrap();

        app.navigate(Navigation::Editor { note_id: None }).await.unwrap();
        let editor = app.editor().unwrap();
        assert_eq!(editor.mode(), EditorMode::Editing);
        assert_eq!(editor.color(), NoteColor::Amber);
    }

    #[tokio::test]
    async fn test_back_refreshes_list() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = NotesApp::open(temp_dir.path(), clock()).await.unwrap();

        app.navigate(Navigation::Editor { note_id: None }).await.unwrap();
        {
            let (editor, store) = app.editor_with_store().unwrap();
            editor.set_title("Buy milk");
            editor.set_date("2024-05-01");
            editor.save(store).await.unwrap();
        }

        app.navigate(Navigation::Back).await.unwrap();
        assert_eq!(app.depth(), 1);
        assert_eq!(app.list().unwrap().notes().len(), 1);

        assert!(app.navigate(Navigation::Back).await.is_err());
    }
}

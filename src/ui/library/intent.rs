use crate::storage::SavedPoemRecord;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum LibraryIntent {
    /// Fresh listing from storage (newest first).
    Load { records: Vec<SavedPoemRecord> },
    MoveUp,
    MoveDown,
    /// A record was deleted from storage.
    Removed { id: u64 },
}

impl Intent for LibraryIntent {}

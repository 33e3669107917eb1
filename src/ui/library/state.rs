use crate::storage::SavedPoemRecord;
use crate::ui::mvi::UiState;

/// Library screen: the saved records and which one is highlighted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LibraryViewState {
    pub records: Vec<SavedPoemRecord>,
    pub selected: usize,
}

impl UiState for LibraryViewState {}

impl LibraryViewState {
    pub fn selected_record(&self) -> Option<&SavedPoemRecord> {
        self.records.get(self.selected)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

use crate::ui::mvi::Reducer;

use super::intent::LibraryIntent;
use super::state::LibraryViewState;

pub struct LibraryReducer;

impl Reducer for LibraryReducer {
    type State = LibraryViewState;
    type Intent = LibraryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LibraryIntent::Load { records } => {
                // Keep the highlight on the same record when it survives a reload.
                let selected = state
                    .selected_record()
                    .and_then(|current| records.iter().position(|r| r.id == current.id))
                    .unwrap_or(0);
                LibraryViewState { records, selected }
            }
            LibraryIntent::MoveUp => {
                let selected = if state.records.is_empty() {
                    0
                } else if state.selected == 0 {
                    state.records.len() - 1
                } else {
                    state.selected - 1
                };
                LibraryViewState { selected, ..state }
            }
            LibraryIntent::MoveDown => {
                let selected = if state.selected + 1 >= state.records.len() {
                    0
                } else {
                    state.selected + 1
                };
                LibraryViewState { selected, ..state }
            }
            LibraryIntent::Removed { id } => {
                let LibraryViewState {
                    mut records,
                    selected,
                } = state;
                records.retain(|r| r.id != id);
                let selected = selected.min(records.len().saturating_sub(1));
                LibraryViewState { records, selected }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SavedPoemRecord;
    use chrono::Utc;

    fn record(id: u64) -> SavedPoemRecord {
        SavedPoemRecord {
            id,
            title: None,
            poem: format!("poem {}", id),
            inspiration: None,
            image_preview: None,
            created_at: Utc::now(),
        }
    }

    fn loaded(ids: &[u64]) -> LibraryViewState {
        LibraryReducer::reduce(
            LibraryViewState::default(),
            LibraryIntent::Load {
                records: ids.iter().copied().map(record).collect(),
            },
        )
    }

    #[test]
    fn movement_wraps() {
        let state = loaded(&[3, 2, 1]);
        let state = LibraryReducer::reduce(state, LibraryIntent::MoveUp);
        assert_eq!(state.selected, 2);
        let state = LibraryReducer::reduce(state, LibraryIntent::MoveDown);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn movement_on_empty_list_stays_at_zero() {
        let state = LibraryReducer::reduce(LibraryViewState::default(), LibraryIntent::MoveUp);
        assert_eq!(state.selected, 0);
        let state = LibraryReducer::reduce(state, LibraryIntent::MoveDown);
        assert_eq!(state.selected, 0);
        assert!(state.selected_record().is_none());
    }

    #[test]
    fn reload_keeps_highlight_on_same_record() {
        let mut state = loaded(&[3, 2, 1]);
        state = LibraryReducer::reduce(state, LibraryIntent::MoveDown);
        assert_eq!(state.selected_record().map(|r| r.id), Some(2));

        state = LibraryReducer::reduce(
            state,
            LibraryIntent::Load {
                records: vec![record(4), record(3), record(2), record(1)],
            },
        );
        assert_eq!(state.selected_record().map(|r| r.id), Some(2));
    }

    #[test]
    fn removing_last_row_moves_highlight_up() {
        let mut state = loaded(&[3, 2, 1]);
        state.selected = 2;
        let state = LibraryReducer::reduce(state, LibraryIntent::Removed { id: 1 });
        assert_eq!(state.records.len(), 2);
        assert_eq!(state.selected, 1);

        let ids: Vec<u64> = state.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let state = loaded(&[2, 1]);
        let after = LibraryReducer::reduce(state.clone(), LibraryIntent::Removed { id: 99 });
        assert_eq!(after, state);
    }
}

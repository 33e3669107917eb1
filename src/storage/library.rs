use chrono::{DateTime, Utc};

use super::error::StorageError;
use super::kv::KvStore;
use super::record::{decode_library, LibraryDocument, PoemDraft, SavedPoemRecord, SCHEMA_VERSION};

pub const LIBRARY_KEY: &str = "lumina_verse_library";

/// The user's saved poems.
///
/// Reads never fail on bad data: a corrupt document lists as empty. Writes
/// hold the library lock for the whole read-modify-write.
#[derive(Debug, Clone)]
pub struct Library {
    store: KvStore,
}

impl Library {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    /// All saved poems, newest first (`created_at` desc, then `id` desc).
    pub fn list_saved_poems(&self) -> Vec<SavedPoemRecord> {
        let mut records = match self.store.get_raw(LIBRARY_KEY) {
            Ok(Some(raw)) => decode_library(&raw).records,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read library");
                Vec::new()
            }
        };
        sort_newest_first(&mut records);
        records
    }

    pub fn get(&self, id: u64) -> Option<SavedPoemRecord> {
        self.list_saved_poems().into_iter().find(|r| r.id == id)
    }

    pub fn save_poem(&self, draft: PoemDraft) -> Result<SavedPoemRecord, StorageError> {
        self.save_poem_at(draft, Utc::now())
    }

    /// Save with an explicit clock reading.
    ///
    /// The id is `max(now_ms, largest existing id + 1)`, so saves within the
    /// same millisecond still get distinct ids.
    pub fn save_poem_at(
        &self,
        draft: PoemDraft,
        now: DateTime<Utc>,
    ) -> Result<SavedPoemRecord, StorageError> {
        if draft.poem.trim().is_empty() {
            return Err(StorageError::EmptyPoem);
        }

        let _guard = self.store.lock(LIBRARY_KEY)?;
        let mut records = self.load_for_write()?;

        let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let next_after_existing = records
            .iter()
            .map(|r| r.id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let record = SavedPoemRecord {
            id: now_ms.max(next_after_existing),
            title: draft.title.filter(|t| !t.trim().is_empty()),
            poem: draft.poem,
            inspiration: draft.inspiration.filter(|t| !t.trim().is_empty()),
            image_preview: draft.image_preview,
            created_at: now,
        };

        records.insert(0, record.clone());
        self.write(&records)?;
        tracing::info!(id = record.id, total = records.len(), "Saved poem");
        Ok(record)
    }

    /// Remove the poem with `id`. Returns `false` if there was none.
    pub fn delete_poem(&self, id: u64) -> Result<bool, StorageError> {
        let _guard = self.store.lock(LIBRARY_KEY)?;
        let mut records = self.load_for_write()?;

        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            tracing::debug!(id, "Delete requested for unknown poem");
            return Ok(false);
        }

        self.write(&records)?;
        tracing::info!(id, remaining = records.len(), "Deleted poem");
        Ok(true)
    }

    /// Stored records in storage order. A corrupt document is moved aside
    /// first so writing the fresh list does not lose it.
    fn load_for_write(&self) -> Result<Vec<SavedPoemRecord>, StorageError> {
        let Some(raw) = self.store.get_raw(LIBRARY_KEY)? else {
            return Ok(Vec::new());
        };
        let decoded = decode_library(&raw);
        if decoded.corrupt {
            self.store.quarantine(LIBRARY_KEY)?;
        }
        Ok(decoded.records)
    }

    fn write(&self, records: &[SavedPoemRecord]) -> Result<(), StorageError> {
        self.store.set(
            LIBRARY_KEY,
            &LibraryDocument {
                schema_version: SCHEMA_VERSION,
                poems: records,
            },
        )
    }
}

fn sort_newest_first(records: &mut [SavedPoemRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

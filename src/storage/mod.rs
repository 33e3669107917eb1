//! Local persistence: a JSON-file key-value store, the poem library on top
//! of it, and playback settings.

mod error;
mod kv;
mod library;
mod playback;
mod record;

pub use error::StorageError;
pub use kv::{KeyLock, KvStore};
pub use library::{Library, LIBRARY_KEY};
pub use playback::{
    PlaybackSettings, VolumeLevel, DEFAULT_VOLUME, MUTED_KEY, VOLUME_KEY, VOLUME_STEP,
};
pub use record::{PoemDraft, SavedPoemRecord, SCHEMA_VERSION};

//! Ambient playback volume and mute flag.

use super::error::StorageError;
use super::kv::KvStore;

pub const VOLUME_KEY: &str = "lumina_volume";
pub const MUTED_KEY: &str = "lumina_muted";
pub const DEFAULT_VOLUME: f32 = 0.4;

/// Step used by the `+`/`-` keys.
pub const VOLUME_STEP: f32 = 0.1;

/// Coarse loudness bucket, used to pick the footer indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Silent,
    Low,
    High,
}

/// Volume and mute, read once at startup and written on every change.
///
/// In-memory values always reflect the latest request even if persisting
/// it failed; the error is returned for the caller to report.
#[derive(Debug, Clone)]
pub struct PlaybackSettings {
    volume: f32,
    muted: bool,
    store: Option<KvStore>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
            store: None,
        }
    }
}

impl PartialEq for PlaybackSettings {
    fn eq(&self, other: &Self) -> bool {
        self.volume == other.volume && self.muted == other.muted
    }
}

impl PlaybackSettings {
    pub fn load(store: &KvStore) -> Self {
        let volume = match store.get::<f32>(VOLUME_KEY) {
            Ok(Some(v)) if v.is_finite() => v.clamp(0.0, 1.0),
            Ok(_) => DEFAULT_VOLUME,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read volume");
                DEFAULT_VOLUME
            }
        };
        let muted = match store.get::<bool>(MUTED_KEY) {
            Ok(v) => v.unwrap_or(false),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read mute flag");
                false
            }
        };
        Self {
            volume,
            muted,
            store: Some(store.clone()),
        }
    }

    /// Settings that are never persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume actually applied to output: 0 while muted.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn level(&self) -> VolumeLevel {
        let v = self.effective_volume();
        if v <= 0.0 {
            VolumeLevel::Silent
        } else if v < 0.5 {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }

    /// Set the volume (clamped to 0..=1). Any level above zero unmutes.
    pub fn set_volume(&mut self, volume: f32) -> Result<(), StorageError> {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.volume > 0.0 {
            self.muted = false;
        }
        self.persist()
    }

    pub fn adjust_volume(&mut self, delta: f32) -> Result<(), StorageError> {
        // Round to the step so repeated nudges land on clean values.
        let target = ((self.volume + delta) / VOLUME_STEP).round() * VOLUME_STEP;
        self.set_volume(target)
    }

    pub fn toggle_mute(&mut self) -> Result<(), StorageError> {
        self.set_muted(!self.muted)
    }

    pub fn set_muted(&mut self, muted: bool) -> Result<(), StorageError> {
        self.muted = muted;
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        store.set(VOLUME_KEY, &self.volume)?;
        store.set(MUTED_KEY, &self.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_nothing_stored() {
        let dir = TempDir::new().unwrap();
        let store = KvStore::open(dir.path()).unwrap();
        let settings = PlaybackSettings::load(&store);
        assert_eq!(settings.volume(), DEFAULT_VOLUME);
        assert!(!settings.is_muted());
    }

    #[test]
    fn raising_volume_unmutes_but_zero_does_not() {
        let mut settings = PlaybackSettings::in_memory();
        settings.set_muted(true).unwrap();
        settings.set_volume(0.0).unwrap();
        assert!(settings.is_muted());

        settings.set_volume(0.3).unwrap();
        assert!(!settings.is_muted());
    }

    #[test]
    fn volume_is_clamped() {
        let mut settings = PlaybackSettings::in_memory();
        settings.set_volume(3.0).unwrap();
        assert_eq!(settings.volume(), 1.0);
        settings.set_volume(-1.0).unwrap();
        assert_eq!(settings.volume(), 0.0);
        settings.set_volume(f32::NAN).unwrap();
        assert_eq!(settings.volume(), 0.0);
    }

    #[test]
    fn adjust_steps_and_stops_at_bounds() {
        let mut settings = PlaybackSettings::in_memory();
        settings.adjust_volume(VOLUME_STEP).unwrap();
        assert!((settings.volume() - 0.5).abs() < 1e-6);
        for _ in 0..10 {
            settings.adjust_volume(VOLUME_STEP).unwrap();
        }
        assert_eq!(settings.volume(), 1.0);
        assert_eq!(settings.level(), VolumeLevel::High);
    }

    #[test]
    fn level_reflects_mute() {
        let mut settings = PlaybackSettings::in_memory();
        assert_eq!(settings.level(), VolumeLevel::Low);
        settings.toggle_mute().unwrap();
        assert_eq!(settings.level(), VolumeLevel::Silent);
    }
}

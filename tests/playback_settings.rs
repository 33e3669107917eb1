//! Volume and mute preferences persist between launches.

use photopoet::storage::{KvStore, PlaybackSettings, DEFAULT_VOLUME, MUTED_KEY, VOLUME_KEY};
use tempfile::TempDir;

#[test]
fn settings_round_trip_through_the_store() {
    let dir = TempDir::new().unwrap();
    let store = KvStore::open(dir.path()).unwrap();

    let mut settings = PlaybackSettings::load(&store);
    assert_eq!(settings.volume(), DEFAULT_VOLUME);
    assert!(!settings.is_muted());

    settings.set_volume(0.7).unwrap();
    settings.toggle_mute().unwrap();

    let reloaded = PlaybackSettings::load(&store);
    assert!((reloaded.volume() - 0.7).abs() < f32::EPSILON);
    assert!(reloaded.is_muted());
    assert_eq!(reloaded.effective_volume(), 0.0);
}

#[test]
fn stored_values_use_plain_json() {
    let dir = TempDir::new().unwrap();
    let store = KvStore::open(dir.path()).unwrap();

    let mut settings = PlaybackSettings::load(&store);
    settings.set_muted(true).unwrap();

    assert_eq!(store.get_raw(MUTED_KEY).unwrap().as_deref().map(str::trim), Some("true"));
    let volume: f32 = store.get(VOLUME_KEY).unwrap().unwrap();
    assert!((volume - DEFAULT_VOLUME).abs() < f32::EPSILON);
}

#[test]
fn unreadable_values_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{VOLUME_KEY}.json")), "loud").unwrap();
    std::fs::write(dir.path().join(format!("{MUTED_KEY}.json")), "[]").unwrap();
    let store = KvStore::open(dir.path()).unwrap();

    let settings = PlaybackSettings::load(&store);
    assert_eq!(settings.volume(), DEFAULT_VOLUME);
    assert!(!settings.is_muted());
}

#[test]
fn unmute_restores_the_previous_level() {
    let dir = TempDir::new().unwrap();
    let store = KvStore::open(dir.path()).unwrap();

    let mut settings = PlaybackSettings::load(&store);
    settings.set_volume(0.7).unwrap();
    settings.toggle_mute().unwrap();
    assert_eq!(settings.effective_volume(), 0.0);

    settings.toggle_mute().unwrap();
    assert!((settings.effective_volume() - 0.7).abs() < f32::EPSILON);

    let reloaded = PlaybackSettings::load(&store);
    assert!(!reloaded.is_muted());
    assert!((reloaded.effective_volume() - 0.7).abs() < f32::EPSILON);
}

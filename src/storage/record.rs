//! On-disk shape of the poem library.
//!
//! Current documents are a versioned envelope:
//!
//! ```json
//! { "schema_version": 2, "poems": [ { "id": 1, "poem": "...", "createdAt": "..." } ] }
//! ```
//!
//! Older installs wrote a bare array of `{id, title?, poem, inspiration, image?, date}`.
//! Both are accepted on read; only the envelope is written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SCHEMA_VERSION: u32 = 2;

/// A poem the user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPoemRecord {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub poem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspiration: Option<String>,
    /// Data URI of the thumbnail shown in the library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_preview: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SavedPoemRecord {
    /// First non-blank line of the poem, for list rows.
    pub fn first_line(&self) -> &str {
        self.poem
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// What the caller supplies when saving; the library assigns id and timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoemDraft {
    pub title: Option<String>,
    pub poem: String,
    pub inspiration: Option<String>,
    pub image_preview: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LibraryDocument<'a> {
    pub schema_version: u32,
    pub poems: &'a [SavedPoemRecord],
}

#[derive(Debug, Deserialize)]
struct LegacyRecord {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    poem: String,
    #[serde(default)]
    inspiration: Option<String>,
    #[serde(default)]
    image: Option<String>,
    date: String,
}

impl LegacyRecord {
    fn upgrade(self) -> Option<SavedPoemRecord> {
        let created_at = DateTime::parse_from_rfc3339(&self.date)
            .ok()?
            .with_timezone(&Utc);
        Some(SavedPoemRecord {
            id: self.id,
            title: self.title.filter(|t| !t.trim().is_empty()),
            poem: self.poem,
            inspiration: self.inspiration.filter(|t| !t.trim().is_empty()),
            image_preview: self.image,
            created_at,
        })
    }
}

/// Result of decoding a stored library document.
#[derive(Debug, Default)]
pub(crate) struct Decoded {
    pub records: Vec<SavedPoemRecord>,
    /// The document as a whole could not be understood.
    pub corrupt: bool,
}

/// Decode either document format, dropping records that fail validation.
pub(crate) fn decode_library(raw: &str) -> Decoded {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Library document is not valid JSON");
            return Decoded {
                corrupt: true,
                ..Decoded::default()
            };
        }
    };

    match value {
        Value::Array(items) => decode_items(items, decode_legacy),
        Value::Object(mut map) => {
            let version = map.get("schema_version").and_then(Value::as_u64);
            if version.is_some_and(|v| v > SCHEMA_VERSION as u64) {
                tracing::warn!(?version, "Library written by a newer version");
            }
            match map.remove("poems") {
                Some(Value::Array(items)) => decode_items(items, decode_current),
                _ => {
                    tracing::warn!("Library document has no poem list");
                    Decoded {
                        corrupt: true,
                        ..Decoded::default()
                    }
                }
            }
        }
        _ => {
            tracing::warn!("Library document has an unexpected shape");
            Decoded {
                corrupt: true,
                ..Decoded::default()
            }
        }
    }
}

fn decode_items(items: Vec<Value>, decode: fn(Value) -> Option<SavedPoemRecord>) -> Decoded {
    let total = items.len();
    let records: Vec<SavedPoemRecord> = items
        .into_iter()
        .filter_map(decode)
        .filter(|r| !r.poem.trim().is_empty())
        .collect();
    let dropped = total - records.len();
    if dropped > 0 {
        tracing::warn!(dropped, "Dropped invalid library records");
    }
    Decoded {
        records,
        corrupt: false,
    }
}

fn decode_current(value: Value) -> Option<SavedPoemRecord> {
    serde_json::from_value(value).ok()
}

fn decode_legacy(value: Value) -> Option<SavedPoemRecord> {
    serde_json::from_value::<LegacyRecord>(value)
        .ok()
        .and_then(LegacyRecord::upgrade)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_format_round_trips_through_envelope() {
        let record = SavedPoemRecord {
            id: 7,
            title: Some("Dawn".into()),
            poem: "Still water\nwaits".into(),
            inspiration: None,
            image_preview: None,
            created_at: "2024-05-01T08:00:00Z".parse().unwrap(),
        };
        let records = vec![record.clone()];
        let json = serde_json::to_string(&LibraryDocument {
            schema_version: SCHEMA_VERSION,
            poems: &records,
        })
        .unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("inspiration"));

        let decoded = decode_library(&json);
        assert!(!decoded.corrupt);
        assert_eq!(decoded.records, vec![record]);
    }

    #[test]
    fn legacy_array_is_upgraded() {
        let raw = r#"[
            {"id": 1700000000000, "title": "Old", "poem": "Line one\nLine two",
             "inspiration": "Mist", "image": "data:image/png;base64,AAAA",
             "date": "2023-11-14T22:13:20.000Z"}
        ]"#;
        let decoded = decode_library(raw);
        assert_eq!(decoded.records.len(), 1);
        let r = &decoded.records[0];
        assert_eq!(r.id, 1_700_000_000_000);
        assert_eq!(r.inspiration.as_deref(), Some("Mist"));
        assert_eq!(r.image_preview.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(r.created_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn invalid_records_are_dropped() {
        let raw = r#"{"schema_version": 2, "poems": [
            {"id": 1, "poem": "   ", "createdAt": "2024-01-01T00:00:00Z"},
            {"id": 2, "poem": "kept", "createdAt": "not a date"},
            {"id": 3, "poem": "kept", "createdAt": "2024-01-01T00:00:00Z"}
        ]}"#;
        let decoded = decode_library(raw);
        assert!(!decoded.corrupt);
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].id, 3);
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        assert!(decode_library("{not json").corrupt);
        assert!(decode_library("42").corrupt);
        assert!(decode_library(r#"{"schema_version": 2}"#).corrupt);
    }

    #[test]
    fn first_line_skips_blank_lines() {
        let record = SavedPoemRecord {
            id: 1,
            title: None,
            poem: "\n  \n  Autumn moon  \nsecond".into(),
            inspiration: None,
            image_preview: None,
            created_at: Utc::now(),
        };
        assert_eq!(record.first_line(), "Autumn moon");
        assert_eq!(record.display_title(), "Untitled");
    }
}

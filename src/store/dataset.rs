use super::MemoryStore;
use crate::error::{EcoError, Result};
use crate::types::telemetry::TelemetryEvent;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Reads a JSON dataset (`trips`, `telemetry`, `annotations`, `profiles`;
/// every key optional) into a [`MemoryStore`].
pub fn load(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        return Err(EcoError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let store: MemoryStore = serde_json::from_str(&content)?;
    debug!(
        path = %path.display(),
        trips = store.trips.len(),
        events = store.telemetry.len(),
        profiles = store.profiles.len(),
        "loaded dataset"
    );
    Ok(store)
}

pub fn save(path: &Path, store: &MemoryStore) -> Result<()> {
    let rendered = serde_json::to_string_pretty(store)?;
    std::fs::write(path, rendered)?;
    debug!(path = %path.display(), "saved dataset");
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventBatch {
    Wrapped { events: Vec<TelemetryEvent> },
    Bare(Vec<TelemetryEvent>),
}

/// Reads a telemetry batch file: either a bare JSON array of events or an
/// object holding them under `events`.
pub fn load_events(path: &Path) -> Result<Vec<TelemetryEvent>> {
    if !path.exists() {
        return Err(EcoError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let events = match serde_json::from_str(&content)? {
        EventBatch::Wrapped { events } | EventBatch::Bare(events) => events,
    };
    debug!(path = %path.display(), events = events.len(), "loaded telemetry batch");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TripStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = load(&dir.path().join("missing.json")).expect_err("load should fail");
        assert!(matches!(err, EcoError::PathNotFound(_)));
    }

    #[test]
    fn load_accepts_partial_documents() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"{ "trips": [{
                "id": "t1", "user_id": "u1", "vehicle": "bike",
                "distance_km": 4, "duration_min": 15,
                "created_at": "2025-03-01T08:00:00Z"
            }] }"#,
        )
        .expect("dataset should write");

        let store = load(&path).expect("load should succeed");
        assert_eq!(store.trips().expect("trips").len(), 1);
        assert!(store.telemetry.is_empty());
    }

    #[test]
    fn save_then_load_keeps_contents() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("data.json");
        let mut store = MemoryStore::default();
        store
            .insert_trip(serde_json::from_str(
                r#"{ "id": "t9", "user_id": "u2", "vehicle": "car",
                     "distance_km": 12, "duration_min": 25,
                     "created_at": "2025-04-01T08:00:00Z" }"#,
            )
            .expect("trip should parse"))
            .expect("insert should succeed");

        save(&path, &store).expect("save should succeed");
        assert_eq!(load(&path).expect("load should succeed"), store);
    }

    #[test]
    fn load_events_accepts_both_batch_shapes() {
        let dir = TempDir::new().expect("temp dir should be created");
        let event = r##"{ "actionType": "click", "target": "#goBtn",
                          "timestamp": "2025-03-01T08:00:00Z" }"##;
        let bare = dir.path().join("bare.json");
        let wrapped = dir.path().join("wrapped.json");
        fs::write(&bare, format!("[{event}, {event}]")).expect("batch should write");
        fs::write(&wrapped, format!("{{ \"events\": [{event}] }}")).expect("batch should write");

        assert_eq!(load_events(&bare).expect("bare batch should load").len(), 2);
        let events = load_events(&wrapped).expect("wrapped batch should load");
        assert_eq!(events.len(), 1);
        assert!(events[0].user_id.is_empty());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").expect("dataset should write");
        assert!(matches!(load(&path), Err(EcoError::Json(_))));
    }
}

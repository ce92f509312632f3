use super::{ProfileStore, TelemetryStore, TripStore};
use crate::error::{EcoError, Result};
use crate::types::telemetry::{BehavioralProfile, TelemetryEvent};
use crate::types::trip::{TripRecord, TripScore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-process store for all three collaborators. Its serialized form is the
/// dataset file the CLI reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub trips: Vec<TripRecord>,
    #[serde(default)]
    pub telemetry: Vec<TelemetryEvent>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, TripScore>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, BehavioralProfile>,
}

impl MemoryStore {
    pub fn annotation(&self, trip_id: &str) -> Option<TripScore> {
        self.annotations.get(trip_id).copied()
    }
}

impl TripStore for MemoryStore {
    fn trips(&self) -> Result<Vec<TripRecord>> {
        Ok(self.trips.clone())
    }

    fn insert_trip(&mut self, trip: TripRecord) -> Result<()> {
        if self.trips.iter().any(|existing| existing.id == trip.id) {
            return Err(EcoError::Store(format!("duplicate trip id: {}", trip.id)));
        }
        self.trips.push(trip);
        Ok(())
    }

    fn annotate(&mut self, trip_id: &str, score: TripScore) -> Result<()> {
        if !self.trips.iter().any(|trip| trip.id == trip_id) {
            return Err(EcoError::Store(format!("unknown trip id: {trip_id}")));
        }
        self.annotations.insert(trip_id.to_string(), score);
        Ok(())
    }
}

impl TelemetryStore for MemoryStore {
    fn events(&self, user_id: &str, since: Option<DateTime<Utc>>) -> Result<Vec<TelemetryEvent>> {
        Ok(self
            .telemetry
            .iter()
            .filter(|event| event.user_id == user_id)
            .filter(|event| since.map_or(true, |start| event.timestamp >= start))
            .cloned()
            .collect())
    }

    fn record_events(&mut self, events: Vec<TelemetryEvent>) -> Result<()> {
        self.telemetry.extend(events);
        Ok(())
    }
}

impl ProfileStore for MemoryStore {
    fn save_profile(&mut self, profile: BehavioralProfile) -> Result<()> {
        self.profiles.insert(profile.user_id.clone(), profile);
        Ok(())
    }

    fn profile(&self, user_id: &str) -> Result<Option<BehavioralProfile>> {
        Ok(self.profiles.get(user_id).cloned())
    }

    fn profiles(&self) -> Result<Vec<BehavioralProfile>> {
        Ok(self.profiles.values().cloned().collect())
    }
}

//! Collaborator interfaces the scoring and profiling services depend on.
//!
//! Services receive a store explicitly; nothing here is global.

pub mod dataset;
pub mod memory;

use crate::error::Result;
use crate::types::telemetry::{BehavioralProfile, TelemetryEvent};
use crate::types::trip::{TripRecord, TripScore};
use chrono::{DateTime, Utc};

pub use memory::MemoryStore;

pub trait TripStore {
    fn trips(&self) -> Result<Vec<TripRecord>>;

    fn trips_for_user(&self, user_id: &str) -> Result<Vec<TripRecord>> {
        Ok(self
            .trips()?
            .into_iter()
            .filter(|trip| trip.user_id == user_id)
            .collect())
    }

    fn insert_trip(&mut self, trip: TripRecord) -> Result<()>;

    /// Records the score computed for a stored trip.
    fn annotate(&mut self, trip_id: &str, score: TripScore) -> Result<()>;
}

pub trait TelemetryStore {
    /// Events for `user_id` at or after `since`. Order is not guaranteed.
    fn events(&self, user_id: &str, since: Option<DateTime<Utc>>) -> Result<Vec<TelemetryEvent>>;

    /// Appends a batch of events.
    fn record_events(&mut self, events: Vec<TelemetryEvent>) -> Result<()>;
}

pub trait ProfileStore {
    fn save_profile(&mut self, profile: BehavioralProfile) -> Result<()>;

    fn profile(&self, user_id: &str) -> Result<Option<BehavioralProfile>>;

    fn profiles(&self) -> Result<Vec<BehavioralProfile>>;
}

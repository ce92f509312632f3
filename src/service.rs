//! Orchestration around the pure engines: validate, score, persist.

use crate::behavior::TelemetryAnalyzer;
use crate::error::{EcoError, Result};
use crate::scoring::ScoreEngine;
use crate::store::{ProfileStore, TelemetryStore, TripStore};
use crate::types::telemetry::{BehavioralMetrics, BehavioralProfile, TelemetryEvent};
use crate::types::trip::{ScoredTrip, TripRecord, Vehicle};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub const ANALYSIS_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct TripService {
    engine: ScoreEngine,
}

impl TripService {
    pub fn new(engine: ScoreEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    /// Validates and scores a new trip, stores it and records its score.
    pub fn submit<S: TripStore>(&self, store: &mut S, record: TripRecord) -> Result<ScoredTrip> {
        validate_trip(&record)?;
        let score = self.engine.score(&record.trip());
        store.insert_trip(record.clone())?;
        store.annotate(&record.id, score)?;
        info!(
            trip = %record.id,
            user = %record.user_id,
            vehicle = %record.vehicle,
            score = score.efficiency_score,
            "scored submitted trip"
        );
        Ok(ScoredTrip { record, score })
    }

    /// Stored trips with scores recomputed by this engine, oldest first.
    pub fn scored_trips<S: TripStore>(&self, store: &S, user_id: Option<&str>) -> Result<Vec<ScoredTrip>> {
        let mut records = match user_id {
            Some(user) => store.trips_for_user(user)?,
            None => store.trips()?,
        };
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let scored: Vec<ScoredTrip> = records
            .into_iter()
            .map(|record| {
                let score = self.engine.score(&record.trip());
                ScoredTrip { record, score }
            })
            .collect();
        debug!(trips = scored.len(), "rescored stored trips");
        Ok(scored)
    }
}

/// Rejects trips the engine would otherwise have to guess about.
pub fn validate_trip(record: &TripRecord) -> Result<()> {
    if record.id.trim().is_empty() {
        return Err(EcoError::InvalidTrip("trip id must not be empty".to_string()));
    }
    if record.user_id.trim().is_empty() {
        return Err(EcoError::InvalidTrip("user id must not be empty".to_string()));
    }
    if record.vehicle == Vehicle::Unrecognized {
        return Err(EcoError::InvalidTrip("unrecognized vehicle".to_string()));
    }
    validate_measure("distance", record.distance_km)?;
    validate_measure("duration", record.duration_min)
}

pub fn validate_measure(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EcoError::InvalidTrip(format!(
            "{name} must be a finite, non-negative number (got {value})"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ProfileService {
    analyzer: TelemetryAnalyzer,
}

impl ProfileService {
    pub fn new(analyzer: TelemetryAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &TelemetryAnalyzer {
        &self.analyzer
    }

    /// Analyzes a user's events without touching any store.
    pub fn build_profile<S: TelemetryStore>(
        &self,
        store: &S,
        user_id: &str,
        since: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<BehavioralProfile> {
        let mut events = store.events(user_id, since)?;
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        let analysis = self.analyzer.analyze(&events);
        Ok(BehavioralProfile {
            user_id: user_id.to_string(),
            metrics: analysis.metrics,
            tags: analysis.tags,
            analyzed_at: now,
            data_points: analysis.data_points,
            analysis_version: ANALYSIS_VERSION,
        })
    }

    /// Rebuilds and stores the user's profile, replacing any earlier tags.
    /// Without events the neutral profile is returned but not stored, so it
    /// never enters the population averages.
    pub fn refresh<S: TelemetryStore + ProfileStore>(
        &self,
        store: &mut S,
        user_id: &str,
        since: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<BehavioralProfile> {
        let profile = self.build_profile(store, user_id, since, now)?;
        if profile.data_points == 0 {
            debug!(user = %user_id, "no telemetry to analyze; stored profile left unchanged");
            return Ok(profile);
        }
        store.save_profile(profile.clone())?;
        info!(
            user = %user_id,
            events = profile.data_points,
            tags = ?profile.tags,
            "refreshed behavioral profile"
        );
        Ok(profile)
    }
}

/// Stores a telemetry batch. `user_id`, when given, is assigned to every
/// event; otherwise each event must carry its own. Returns the stored count.
pub fn ingest_events<S: TelemetryStore>(
    store: &mut S,
    mut events: Vec<TelemetryEvent>,
    user_id: Option<&str>,
) -> Result<usize> {
    if events.is_empty() {
        return Err(EcoError::InvalidArgument(
            "telemetry batch must contain at least one event".to_string(),
        ));
    }
    for (index, event) in events.iter_mut().enumerate() {
        if let Some(user) = user_id {
            event.user_id = user.to_string();
        }
        if event.user_id.trim().is_empty() {
            return Err(EcoError::InvalidArgument(format!(
                "telemetry event {index} has no user id"
            )));
        }
        if event.target.trim().is_empty() {
            return Err(EcoError::InvalidArgument(format!(
                "telemetry event {index} has no target"
            )));
        }
    }

    let count = events.len();
    store.record_events(events)?;
    info!(events = count, "ingested telemetry batch");
    Ok(count)
}

/// First `t<n>` id, counting from the number of stored trips, that is not taken.
pub fn next_trip_id(existing: &[TripRecord]) -> String {
    let mut next = existing.len() + 1;
    loop {
        let candidate = format!("t{next}");
        if !existing.iter().any(|trip| trip.id == candidate) {
            return candidate;
        }
        next += 1;
    }
}

/// Population baseline used when no stored profile exists yet.
pub fn baseline_metrics() -> BehavioralMetrics {
    BehavioralMetrics {
        hesitation: 0.3,
        decision_efficiency: 0.6,
        movement_efficiency: 0.7,
        interaction_complexity: 0.4,
        cognitive_load: 0.5,
        ..BehavioralMetrics::default()
    }
}

/// Field-wise mean over stored profiles. `direction_changes` is rounded.
pub fn average_metrics(profiles: &[BehavioralProfile]) -> BehavioralMetrics {
    if profiles.is_empty() {
        return baseline_metrics();
    }
    let count = profiles.len() as f64;
    let mean = |field: fn(&BehavioralMetrics) -> f64| {
        profiles.iter().map(|profile| field(&profile.metrics)).sum::<f64>() / count
    };
    BehavioralMetrics {
        hesitation: mean(|m| m.hesitation),
        decision_efficiency: mean(|m| m.decision_efficiency),
        movement_efficiency: mean(|m| m.movement_efficiency),
        interaction_complexity: mean(|m| m.interaction_complexity),
        cognitive_load: mean(|m| m.cognitive_load),
        direction_changes: mean(|m| f64::from(m.direction_changes)).round() as u32,
        session_fragmentation: mean(|m| m.session_fragmentation),
        action_rhythm: mean(|m| m.action_rhythm),
    }
}

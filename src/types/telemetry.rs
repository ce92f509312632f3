use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Click,
    Hover,
    Move,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, alias = "userAgent", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl EventMetadata {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Pointer position, if both coordinates were recorded and are finite.
    ///
    /// Legacy telemetry exports write `0` for a missing coordinate, so an
    /// exact `(0, 0)` pair counts as unrecorded too.
    pub fn point(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x == 0.0 && y == 0.0 => None,
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

/// One recorded UI interaction. Events are immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Empty until assigned when a batch is ingested without per-event ids.
    #[serde(default, alias = "userId")]
    pub user_id: String,
    #[serde(alias = "actionType")]
    pub action_type: ActionType,
    pub target: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: EventMetadata,
}

impl TelemetryEvent {
    pub fn is_action(&self) -> bool {
        matches!(self.action_type, ActionType::Click | ActionType::Hover)
    }
}

/// Milliseconds from `earlier` to `later`, never negative.
pub fn gap_ms(earlier: &TelemetryEvent, later: &TelemetryEvent) -> i64 {
    (later.timestamp - earlier.timestamp)
        .num_milliseconds()
        .max(0)
}

/// Names of the derived behavioral signals, as used by tag rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Hesitation,
    DecisionEfficiency,
    MovementEfficiency,
    InteractionComplexity,
    CognitiveLoad,
    DirectionChanges,
    SessionFragmentation,
    ActionRhythm,
}

impl MetricKind {
    pub const ALL: [MetricKind; 8] = [
        MetricKind::Hesitation,
        MetricKind::DecisionEfficiency,
        MetricKind::MovementEfficiency,
        MetricKind::InteractionComplexity,
        MetricKind::CognitiveLoad,
        MetricKind::DirectionChanges,
        MetricKind::SessionFragmentation,
        MetricKind::ActionRhythm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Hesitation => "hesitation",
            MetricKind::DecisionEfficiency => "decision_efficiency",
            MetricKind::MovementEfficiency => "movement_efficiency",
            MetricKind::InteractionComplexity => "interaction_complexity",
            MetricKind::CognitiveLoad => "cognitive_load",
            MetricKind::DirectionChanges => "direction_changes",
            MetricKind::SessionFragmentation => "session_fragmentation",
            MetricKind::ActionRhythm => "action_rhythm",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signals derived from one telemetry sequence.
///
/// Hesitation is in seconds and direction changes is a count; every other
/// signal is a ratio in `[0, 1]`. `Default` yields the neutral values reported
/// for an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehavioralMetrics {
    pub hesitation: f64,
    pub decision_efficiency: f64,
    pub movement_efficiency: f64,
    pub interaction_complexity: f64,
    pub cognitive_load: f64,
    pub direction_changes: u32,
    pub session_fragmentation: f64,
    pub action_rhythm: f64,
}

impl Default for BehavioralMetrics {
    fn default() -> Self {
        Self {
            hesitation: 0.0,
            decision_efficiency: 0.5,
            movement_efficiency: 1.0,
            interaction_complexity: 0.0,
            cognitive_load: 0.0,
            direction_changes: 0,
            session_fragmentation: 0.0,
            action_rhythm: 0.5,
        }
    }
}

impl BehavioralMetrics {
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Hesitation => self.hesitation,
            MetricKind::DecisionEfficiency => self.decision_efficiency,
            MetricKind::MovementEfficiency => self.movement_efficiency,
            MetricKind::InteractionComplexity => self.interaction_complexity,
            MetricKind::CognitiveLoad => self.cognitive_load,
            MetricKind::DirectionChanges => f64::from(self.direction_changes),
            MetricKind::SessionFragmentation => self.session_fragmentation,
            MetricKind::ActionRhythm => self.action_rhythm,
        }
    }
}

/// The stored result of the latest analysis run for a user. A new run
/// replaces the previous profile wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralProfile {
    pub user_id: String,
    pub metrics: BehavioralMetrics,
    pub tags: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
    pub data_points: usize,
    pub analysis_version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_point_requires_both_finite_coordinates() {
        assert_eq!(EventMetadata::at(3.0, 4.0).point(), Some((3.0, 4.0)));
        assert_eq!(
            EventMetadata {
                x: Some(3.0),
                ..EventMetadata::default()
            }
            .point(),
            None
        );
        assert_eq!(EventMetadata::at(f64::NAN, 4.0).point(), None);
    }

    #[test]
    fn zero_filled_coordinates_count_as_missing() {
        let event: TelemetryEvent = serde_json::from_str(
            r##"{
                "userId": "u1",
                "actionType": "move",
                "target": "body",
                "timestamp": "2025-03-01T08:00:00Z",
                "metadata": { "x": 0, "y": 0, "page": "/trips" }
            }"##,
        )
        .expect("event should parse");
        assert_eq!(event.metadata.point(), None);
        assert_eq!(EventMetadata::at(0.0, 7.0).point(), Some((0.0, 7.0)));
    }

    #[test]
    fn event_accepts_camel_case_fields() {
        let event: TelemetryEvent = serde_json::from_str(
            r##"{
                "userId": "u1",
                "actionType": "hover",
                "target": "#loginBtn",
                "timestamp": "2025-03-01T08:00:00.250Z",
                "metadata": { "x": 10, "y": 20, "userAgent": "test" }
            }"##,
        )
        .expect("event should parse");

        assert_eq!(event.action_type, ActionType::Hover);
        assert_eq!(event.metadata.point(), Some((10.0, 20.0)));
        assert_eq!(event.metadata.user_agent.as_deref(), Some("test"));
    }

    #[test]
    fn metric_value_lookup_covers_every_kind() {
        let metrics = BehavioralMetrics {
            direction_changes: 12,
            ..BehavioralMetrics::default()
        };
        for kind in MetricKind::ALL {
            assert!(metrics.value(kind).is_finite(), "{kind} should be finite");
        }
        assert_eq!(metrics.value(MetricKind::DirectionChanges), 12.0);
    }
}

//! Behavioral profiling from raw UI telemetry.
//!
//! Each metric is an independent pure function over a time-sorted event
//! slice; [`rules`] then maps the resulting [`BehavioralMetrics`] to tags.
//! Sorting is the caller's job: the analyzer never reorders its input.

pub mod cognitive;
pub mod complexity;
pub mod decision;
pub mod hesitation;
pub mod interactive;
pub mod movement;
pub mod rules;
pub mod session;

use crate::types::telemetry::{BehavioralMetrics, TelemetryEvent};
use interactive::InteractivePattern;
use rules::RuleSet;
use serde::Serialize;
use tracing::{debug, warn};

/// Tunables for the metric functions.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    pub interactive: Vec<InteractivePattern>,
    pub fragmentation_gap_ms: i64,
    pub rapid_repeat_ms: i64,
    pub decision_window_ms: i64,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            interactive: interactive::default_patterns(),
            fragmentation_gap_ms: 30_000,
            rapid_repeat_ms: 1_000,
            decision_window_ms: 60_000,
        }
    }
}

impl AnalyzerSettings {
    pub fn is_interactive(&self, target: &str) -> bool {
        interactive::is_interactive(&self.interactive, target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryAnalysis {
    pub metrics: BehavioralMetrics,
    pub tags: Vec<String>,
    pub data_points: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TelemetryAnalyzer {
    settings: AnalyzerSettings,
    rules: RuleSet,
}

impl TelemetryAnalyzer {
    pub fn new(settings: AnalyzerSettings, rules: RuleSet) -> Self {
        Self { settings, rules }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn metrics(&self, events: &[TelemetryEvent]) -> BehavioralMetrics {
        if !is_time_sorted(events) {
            warn!(
                events = events.len(),
                "telemetry is not sorted by timestamp; negative gaps are treated as zero"
            );
        }

        let metrics = BehavioralMetrics {
            hesitation: hesitation::hesitation_seconds(events, &self.settings),
            decision_efficiency: decision::decision_efficiency(events, &self.settings),
            movement_efficiency: movement::movement_efficiency(events),
            interaction_complexity: complexity::interaction_complexity(events),
            cognitive_load: cognitive::cognitive_load(events, &self.settings),
            direction_changes: movement::direction_changes(events),
            session_fragmentation: session::session_fragmentation(events, &self.settings),
            action_rhythm: session::action_rhythm(events),
        };
        debug!(?metrics, events = events.len(), "derived behavioral metrics");
        metrics
    }

    pub fn analyze(&self, events: &[TelemetryEvent]) -> TelemetryAnalysis {
        let metrics = self.metrics(events);
        let tags = self.rules.evaluate(&metrics);
        debug!(?tags, "evaluated tag rules");
        TelemetryAnalysis {
            metrics,
            tags,
            data_points: events.len(),
        }
    }
}

/// Analyzes a time-sorted event sequence with the default settings and rule
/// table.
pub fn analyze_telemetry(events: &[TelemetryEvent]) -> TelemetryAnalysis {
    TelemetryAnalyzer::default().analyze(events)
}

fn is_time_sorted(events: &[TelemetryEvent]) -> bool {
    events
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp)
}

use super::AnalyzerSettings;
use crate::types::telemetry::{gap_ms, TelemetryEvent};

pub const NEUTRAL_ACTION_RHYTHM: f64 = 0.5;

/// Share of consecutive gaps longer than the fragmentation threshold.
pub fn session_fragmentation(events: &[TelemetryEvent], settings: &AnalyzerSettings) -> f64 {
    if events.len() < 2 {
        return 0.0;
    }
    let gaps = events.len() - 1;
    let long_gaps = events
        .windows(2)
        .filter(|pair| gap_ms(&pair[0], &pair[1]) > settings.fragmentation_gap_ms)
        .count();
    long_gaps as f64 / gaps as f64
}

/// Regularity of click/hover timing: `1 − variance / mean²` of the
/// intervals, clamped to `[0, 1]`. Neutral with fewer than three actions.
pub fn action_rhythm(events: &[TelemetryEvent]) -> f64 {
    let actions: Vec<&TelemetryEvent> = events.iter().filter(|event| event.is_action()).collect();
    if actions.len() < 3 {
        return NEUTRAL_ACTION_RHYTHM;
    }

    let intervals: Vec<f64> = actions
        .windows(2)
        .map(|pair| gap_ms(pair[0], pair[1]) as f64)
        .collect();
    let count = intervals.len() as f64;
    let mean = intervals.iter().sum::<f64>() / count;
    if mean <= 0.0 {
        // every action landed on the same instant
        return 1.0;
    }
    let variance = intervals
        .iter()
        .map(|interval| (interval - mean).powi(2))
        .sum::<f64>()
        / count;

    (1.0 - variance / (mean * mean)).clamp(0.0, 1.0)
}

use super::AnalyzerSettings;
use crate::types::telemetry::{gap_ms, ActionType, TelemetryEvent};

const HOVER_WEIGHT_MS: f64 = 5000.0;
const ERROR_WEIGHT: f64 = 0.2;
const REPEAT_WEIGHT: f64 = 0.1;

/// Weighted sum of average hover dwell, clicks on non-interactive targets
/// and rapid same-target repeat clicks, clamped to `[0, 1]`.
pub fn cognitive_load(events: &[TelemetryEvent], settings: &AnalyzerSettings) -> f64 {
    let load = average_hover_ms(events) / HOVER_WEIGHT_MS
        + f64::from(error_clicks(events, settings)) * ERROR_WEIGHT
        + f64::from(rapid_repeat_clicks(events, settings)) * REPEAT_WEIGHT;
    load.clamp(0.0, 1.0)
}

/// A hover lasts until the next recorded event of any kind.
pub(crate) fn average_hover_ms(events: &[TelemetryEvent]) -> f64 {
    let dwell: Vec<i64> = events
        .windows(2)
        .filter(|pair| pair[0].action_type == ActionType::Hover)
        .map(|pair| gap_ms(&pair[0], &pair[1]))
        .collect();
    if dwell.is_empty() {
        return 0.0;
    }
    dwell.iter().sum::<i64>() as f64 / dwell.len() as f64
}

pub(crate) fn error_clicks(events: &[TelemetryEvent], settings: &AnalyzerSettings) -> u32 {
    events
        .iter()
        .filter(|event| {
            event.action_type == ActionType::Click && !settings.is_interactive(&event.target)
        })
        .count() as u32
}

pub(crate) fn rapid_repeat_clicks(events: &[TelemetryEvent], settings: &AnalyzerSettings) -> u32 {
    let clicks: Vec<&TelemetryEvent> = events
        .iter()
        .filter(|event| event.action_type == ActionType::Click)
        .collect();
    clicks
        .windows(2)
        .filter(|pair| {
            pair[0].target == pair[1].target && gap_ms(pair[0], pair[1]) < settings.rapid_repeat_ms
        })
        .count() as u32
}

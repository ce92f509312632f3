use super::AnalyzerSettings;
use crate::types::telemetry::{gap_ms, ActionType, TelemetryEvent};

pub const NEUTRAL_DECISION_EFFICIENCY: f64 = 0.5;

/// `1 − average gap between interactive clicks / decision window`, clamped
/// to `[0, 1]`. Neutral with fewer than two interactive clicks.
pub fn decision_efficiency(events: &[TelemetryEvent], settings: &AnalyzerSettings) -> f64 {
    let decisions: Vec<&TelemetryEvent> = events
        .iter()
        .filter(|event| {
            event.action_type == ActionType::Click && settings.is_interactive(&event.target)
        })
        .collect();

    if decisions.len() < 2 || settings.decision_window_ms <= 0 {
        return NEUTRAL_DECISION_EFFICIENCY;
    }

    let total_ms: i64 = decisions
        .windows(2)
        .map(|pair| gap_ms(pair[0], pair[1]))
        .sum();
    let average_ms = total_ms as f64 / (decisions.len() - 1) as f64;

    (1.0 - average_ms / settings.decision_window_ms as f64).clamp(0.0, 1.0)
}

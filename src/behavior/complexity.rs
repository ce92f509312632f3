use crate::types::telemetry::TelemetryEvent;
use std::collections::HashMap;

/// Spread of clicks and hovers across targets: `(distinct / 10) ×
/// (1 − share of the busiest target)`, clamped to `[0, 1]`.
pub fn interaction_complexity(events: &[TelemetryEvent]) -> f64 {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for event in events.iter().filter(|event| event.is_action()) {
        *counts.entry(event.target.as_str()).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return 0.0;
    }
    let busiest = counts.values().copied().max().unwrap_or(0);
    let concentration = busiest as f64 / total as f64;

    ((counts.len() as f64 / 10.0) * (1.0 - concentration)).clamp(0.0, 1.0)
}

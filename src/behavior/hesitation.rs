use super::AnalyzerSettings;
use crate::types::telemetry::{ActionType, TelemetryEvent};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Average seconds between the first hover on an interactive target and the
/// click that follows it on the same target. 0 when no such pair exists.
pub fn hesitation_seconds(events: &[TelemetryEvent], settings: &AnalyzerSettings) -> f64 {
    let mut pending: HashMap<&str, DateTime<Utc>> = HashMap::new();
    let mut total_ms: i64 = 0;
    let mut pairs: u32 = 0;

    for event in events {
        if !settings.is_interactive(&event.target) {
            continue;
        }
        match event.action_type {
            ActionType::Hover => {
                pending.entry(event.target.as_str()).or_insert(event.timestamp);
            }
            ActionType::Click => {
                if let Some(hovered_at) = pending.remove(event.target.as_str()) {
                    total_ms += (event.timestamp - hovered_at).num_milliseconds().max(0);
                    pairs += 1;
                }
            }
            ActionType::Move => {}
        }
    }

    if pairs == 0 {
        return 0.0;
    }
    total_ms as f64 / f64::from(pairs) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::tests::{at, event};

    #[test]
    fn averages_hover_to_click_gaps() {
        let settings = AnalyzerSettings::default();
        let events = vec![
            event(ActionType::Hover, "#saveBtn", at(0)),
            event(ActionType::Click, "#saveBtn", at(2_000)),
            event(ActionType::Hover, "#sendBtn", at(3_000)),
            event(ActionType::Move, "body", at(4_000)),
            event(ActionType::Click, "#sendBtn", at(7_000)),
        ];
        assert!((hesitation_seconds(&events, &settings) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn ignores_clicks_without_hover_and_non_interactive_targets() {
        let settings = AnalyzerSettings::default();
        let events = vec![
            event(ActionType::Click, "#saveBtn", at(0)),
            event(ActionType::Hover, "div.card", at(1_000)),
            event(ActionType::Click, "div.card", at(9_000)),
            event(ActionType::Hover, "#saveBtn", at(10_000)),
            event(ActionType::Click, "#otherBtn", at(11_000)),
        ];
        assert_eq!(hesitation_seconds(&events, &settings), 0.0);
    }

    #[test]
    fn measures_from_first_hover_since_last_click() {
        let settings = AnalyzerSettings::default();
        let events = vec![
            event(ActionType::Hover, "#saveBtn", at(0)),
            event(ActionType::Hover, "#saveBtn", at(1_000)),
            event(ActionType::Click, "#saveBtn", at(4_000)),
        ];
        assert!((hesitation_seconds(&events, &settings) - 4.0).abs() < 1e-9);
    }
}

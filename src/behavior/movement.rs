use crate::types::telemetry::{ActionType, TelemetryEvent};

pub const NEUTRAL_MOVEMENT_EFFICIENCY: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Left,
    Right,
    Up,
    Down,
}

fn pointer_path(events: &[TelemetryEvent]) -> Vec<(f64, f64)> {
    events
        .iter()
        .filter(|event| event.action_type == ActionType::Move)
        .filter_map(|event| event.metadata.point())
        .collect()
}

fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
    (to.0 - from.0).hypot(to.1 - from.1)
}

/// Straight-line displacement over travelled path length for `move` events
/// with coordinates. Neutral when the path is degenerate.
pub fn movement_efficiency(events: &[TelemetryEvent]) -> f64 {
    let path = pointer_path(events);
    let (Some(&start), Some(&end)) = (path.first(), path.last()) else {
        return NEUTRAL_MOVEMENT_EFFICIENCY;
    };
    if path.len() < 2 {
        return NEUTRAL_MOVEMENT_EFFICIENCY;
    }

    let travelled: f64 = path
        .windows(2)
        .map(|step| distance(step[0], step[1]))
        .sum();
    if travelled <= f64::EPSILON {
        return NEUTRAL_MOVEMENT_EFFICIENCY;
    }

    (distance(start, end) / travelled).clamp(0.0, 1.0)
}

fn heading(dx: f64, dy: f64) -> Option<Heading> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Heading::Right
        } else {
            Heading::Left
        }
    } else if dy > 0.0 {
        Heading::Down
    } else {
        Heading::Up
    })
}

/// Number of times the dominant heading (left, right, up, down) changes
/// between consecutive pointer steps. Steps that do not move are skipped.
pub fn direction_changes(events: &[TelemetryEvent]) -> u32 {
    let path = pointer_path(events);
    let mut changes = 0;
    let mut last: Option<Heading> = None;

    for step in path.windows(2) {
        let Some(current) = heading(step[1].0 - step[0].0, step[1].1 - step[0].1) else {
            continue;
        };
        if last.is_some_and(|previous| previous != current) {
            changes += 1;
        }
        last = Some(current);
    }

    changes
}

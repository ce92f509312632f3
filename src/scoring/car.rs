use super::piecewise::{accumulate, Band};

const BASE_SCORE: f64 = 50.0;

const DISTANCE_PENALTY: [Band; 4] = [
    Band::new(5.0, 4.0),
    Band::new(15.0, 1.2),
    Band::new(35.0, 0.6),
    Band::new(f64::INFINITY, 0.3),
];

const TIME_PENALTY_PER_MIN: f64 = 0.6;

/// Short car trips are punished hardest; the time penalty is halved past
/// 15 km and halved again past 35 km.
pub fn car_score(distance_km: f64, duration_min: f64) -> f64 {
    let distance_penalty = accumulate(&DISTANCE_PENALTY, distance_km);

    let mut time_penalty = TIME_PENALTY_PER_MIN * duration_min;
    if distance_km > 15.0 {
        time_penalty *= 0.5;
    }
    if distance_km > 35.0 {
        time_penalty *= 0.5;
    }

    (BASE_SCORE - distance_penalty - time_penalty).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_trip_pays_full_rate() {
        assert!((car_score(3.0, 10.0) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn distance_penalty_is_continuous_at_breakpoints() {
        for breakpoint in [5.0, 15.0, 35.0] {
            let below = car_score(breakpoint - 1e-9, 0.0);
            let above = car_score(breakpoint + 1e-9, 0.0);
            assert!(
                (below - above).abs() < 1e-6,
                "jump at {breakpoint} km: {below} vs {above}"
            );
        }
        // 50 - 4*5 = 30 whichever formula is used at the 5 km boundary
        assert!((car_score(5.0, 0.0) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn score_never_increases_with_distance_inside_a_band() {
        for (start, end) in [(0.0, 5.0), (5.0, 15.0), (15.0, 35.0), (35.0, 200.0)] {
            let mut previous = car_score(start + 0.01, 30.0);
            let mut distance = start + 0.01;
            while distance <= end {
                let current = car_score(distance, 30.0);
                assert!(current <= previous + 1e-9);
                previous = current;
                distance += 0.25;
            }
        }
    }

    #[test]
    fn time_penalty_is_reduced_for_long_trips() {
        // 15..35 km: half of 0.6/min
        let base = car_score(20.0, 0.0);
        assert!((base - car_score(20.0, 10.0) - 3.0).abs() < 1e-9);
        // past 35 km: a quarter
        let base = car_score(40.0, 0.0);
        assert!((base - car_score(40.0, 10.0) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn score_floors_at_zero() {
        assert_eq!(car_score(500.0, 600.0), 0.0);
    }
}

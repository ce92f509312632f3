/// Public transport has a distance sweet spot; duration is ignored.
pub fn public_transport_score(distance_km: f64) -> f64 {
    match distance_km {
        d if d <= 3.0 => 55.0,
        d if d <= 12.0 => 70.0,
        d if d <= 35.0 => 85.0,
        _ => 75.0,
    }
}

/// One band of a distance rate schedule. The rate applies per kilometre for
/// the part of the distance that falls between the previous band's upper
/// bound and `upper_km`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub upper_km: f64,
    pub rate: f64,
}

impl Band {
    pub const fn new(upper_km: f64, rate: f64) -> Self {
        Self { upper_km, rate }
    }
}

/// Sums `rate × km` over every band the distance reaches. Because each band
/// only charges its own slice, the total is continuous at every breakpoint.
pub fn accumulate(bands: &[Band], distance_km: f64) -> f64 {
    let mut total = 0.0;
    let mut lower = 0.0;
    for band in bands {
        if distance_km <= lower {
            break;
        }
        total += (distance_km.min(band.upper_km) - lower) * band.rate;
        lower = band.upper_km;
    }
    total
}

/// Index of the band containing `distance_km`; breakpoints belong to the
/// lower band. Distances past the last bound map to the last band.
pub fn band_index(bands: &[Band], distance_km: f64) -> usize {
    bands
        .iter()
        .position(|band| distance_km <= band.upper_km)
        .unwrap_or_else(|| bands.len().saturating_sub(1))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Mode of transport for a trip.
///
/// Parsing accepts the English identifiers as well as the Dutch labels used by
/// older trip exports. Anything else becomes [`Vehicle::Unrecognized`], which
/// the score engine treats as the worst case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Vehicle {
    Car,
    Bike,
    PublicTransport,
    Walking,
    Other,
    Airplane,
    Unrecognized,
}

impl Vehicle {
    pub fn label(self) -> &'static str {
        match self {
            Vehicle::Car => "Car",
            Vehicle::Bike => "Bike",
            Vehicle::PublicTransport => "Public Transport",
            Vehicle::Walking => "Walking",
            Vehicle::Other => "Other",
            Vehicle::Airplane => "Airplane",
            Vehicle::Unrecognized => "Unrecognized",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Vehicle::Bike | Vehicle::Walking | Vehicle::Other)
    }
}

impl FromStr for Vehicle {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace([' ', '-'], "_");
        Ok(match normalized.as_str() {
            "car" | "auto" => Vehicle::Car,
            "bike" | "bicycle" | "fiets" => Vehicle::Bike,
            "public_transport" | "publictransport" | "transit" | "openbaar_vervoer" => {
                Vehicle::PublicTransport
            }
            "walking" | "walk" | "te_voet" => Vehicle::Walking,
            "other" | "anders" => Vehicle::Other,
            "airplane" | "plane" | "vliegtuig" => Vehicle::Airplane,
            _ => Vehicle::Unrecognized,
        })
    }
}

impl<'de> Deserialize<'de> for Vehicle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<Vehicle>().map_err(|never| match never {})
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The scoring input. Distance is in kilometres, duration in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trip {
    pub vehicle: Vehicle,
    pub distance_km: f64,
    pub duration_min: f64,
}

impl Trip {
    pub fn new(vehicle: Vehicle, distance_km: f64, duration_min: f64) -> Self {
        Self {
            vehicle,
            distance_km,
            duration_min,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Eco Warrior")]
    EcoWarrior,
    #[serde(rename = "Eco Neutral")]
    EcoNeutral,
    #[serde(rename = "Climate Criminal")]
    ClimateCriminal,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::EcoWarrior => "Eco Warrior",
            Tier::EcoNeutral => "Eco Neutral",
            Tier::ClimateCriminal => "Climate Criminal",
        }
    }

    pub fn color(self) -> TierColor {
        match self {
            Tier::EcoWarrior => TierColor::Green,
            Tier::EcoNeutral => TierColor::Orange,
            Tier::ClimateCriminal => TierColor::Red,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierColor {
    Green,
    Orange,
    Red,
}

impl fmt::Display for TierColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TierColor::Green => "green",
            TierColor::Orange => "orange",
            TierColor::Red => "red",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripScore {
    pub efficiency_score: u8,
    pub status: Tier,
    pub color: TierColor,
}

impl TripScore {
    pub fn new(efficiency_score: u8, status: Tier) -> Self {
        Self {
            efficiency_score,
            status,
            color: status.color(),
        }
    }
}

/// A trip as kept by a trip store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(default, alias = "location_a", skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, alias = "location_b", skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub vehicle: Vehicle,
    #[serde(alias = "distance")]
    pub distance_km: f64,
    #[serde(alias = "duration")]
    pub duration_min: f64,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl TripRecord {
    pub fn trip(&self) -> Trip {
        Trip::new(self.vehicle, self.distance_km, self.duration_min)
    }
}

/// A trip record together with its freshly computed score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTrip {
    #[serde(flatten)]
    pub record: TripRecord,
    #[serde(flatten)]
    pub score: TripScore,
}

use shared::models::{EstimateKey, WindEstimate};

use crate::regions::between;
use crate::wildlife;

pub const FALLBACK_SOURCE: &str = "Estimated";

/// Coarse, location-independent wind profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackProfile {
    HighWind,
    MediumWind,
    LowWind,
    Coastal,
}

impl FallbackProfile {
    pub const ALL: [FallbackProfile; 4] = [
        FallbackProfile::HighWind,
        FallbackProfile::MediumWind,
        FallbackProfile::LowWind,
        FallbackProfile::Coastal,
    ];

    pub fn key(self) -> EstimateKey {
        match self {
            FallbackProfile::HighWind => EstimateKey::HighWind,
            FallbackProfile::MediumWind => EstimateKey::MediumWind,
            FallbackProfile::LowWind => EstimateKey::LowWind,
            FallbackProfile::Coastal => EstimateKey::Coastal,
        }
    }

    pub fn capacity_factor(self) -> f64 {
        match self {
            FallbackProfile::HighWind => 0.45,
            FallbackProfile::MediumWind => 0.35,
            FallbackProfile::LowWind => 0.25,
            FallbackProfile::Coastal => 0.40,
        }
    }

    pub fn avg_wind_speed(self) -> f64 {
        match self {
            FallbackProfile::HighWind => 8.5,
            FallbackProfile::MediumWind => 7.0,
            FallbackProfile::LowWind => 5.5,
            FallbackProfile::Coastal => 8.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FallbackProfile::HighWind => "High Wind Region (Great Plains)",
            FallbackProfile::MediumWind => "Medium Wind Region (Midwest)",
            FallbackProfile::LowWind => "Low Wind Region (Southeast)",
            FallbackProfile::Coastal => "Coastal Region",
        }
    }

    /// A fresh estimate for this profile. `lat` only drives the wildlife label.
    pub fn estimate(self, lat: f64) -> WindEstimate {
        WindEstimate {
            key: self.key(),
            capacity_factor: self.capacity_factor(),
            avg_wind_speed: Some(self.avg_wind_speed()),
            description: self.description().to_string(),
            wildlife_risk: wildlife::fallback(self, lat).to_string(),
            source: FALLBACK_SOURCE.to_string(),
            distance_km: None,
        }
    }
}

/// Continental bands in evaluation order. `LowWind` has no band.
const BANDS: [(fn(f64, f64) -> bool, FallbackProfile); 3] = [
    (
        |lat, lon| between(lat, 35.0, 49.0) && between(lon, -110.0, -95.0),
        FallbackProfile::HighWind,
    ),
    (
        |lat, lon| between(lat, 38.0, 47.0) && between(lon, -95.0, -85.0),
        FallbackProfile::MediumWind,
    ),
    (
        |lat, lon| (lon <= -70.0 || between(lon, -125.0, -110.0)) && between(lat, 32.0, 50.0),
        FallbackProfile::Coastal,
    ),
];

pub fn continental_band(lat: f64, lon: f64) -> Option<FallbackProfile> {
    BANDS
        .iter()
        .find(|(contains, _)| contains(lat, lon))
        .map(|(_, profile)| *profile)
}

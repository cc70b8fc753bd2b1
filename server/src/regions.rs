//! Wind-resource resolution for a location.
//!
//! Sources are tried in order of confidence: the dense measured grid, the
//! Texas regional models, the continental fallback bands, and finally the
//! medium-wind default. [`resolve`] always returns an estimate.

use shared::models::{EstimateKey, GridPoint, WindDataset, WindEstimate};

use crate::fallback::{self, FallbackProfile};
use crate::wildlife;

/// A dense grid point is only trusted within this degree-space distance (~11 km).
pub const DENSE_MATCH_DEGREES: f64 = 0.1;
pub const KM_PER_DEGREE: f64 = 111.0;
/// Ceiling for any capacity factor handed to the impact calculator.
pub const MAX_CAPACITY_FACTOR: f64 = 0.55;

pub const DENSE_SOURCE: &str = "Texas Dense Wind Resource (NREL Interpolated)";
const REGIONAL_SOURCE: &str = "Estimated (based on regional patterns)";
const SOUTHERN_SOURCE: &str = "Estimated (NREL data not available for this region)";

/// Inclusive range check.
pub(crate) fn between(value: f64, min: f64, max: f64) -> bool {
    min <= value && value <= max
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        between(lat, self.min_lat, self.max_lat) && between(lon, self.min_lon, self.max_lon)
    }
}

pub const TEXAS_BOUNDS: Bounds = Bounds {
    min_lat: 25.84,
    max_lat: 36.50,
    min_lon: -106.65,
    max_lon: -93.51,
};

pub fn resolve(lat: f64, lon: f64, dataset: Option<&WindDataset>) -> WindEstimate {
    if let Some(estimate) = dataset.and_then(|d| dense_lookup(lat, lon, d)) {
        return estimate;
    }

    if let Some(estimate) = regional_estimate(lat, lon) {
        log::debug!("({}, {}) resolved by regional model {}", lat, lon, estimate.key);
        return estimate;
    }

    if let Some(profile) = fallback::continental_band(lat, lon) {
        log::debug!("({}, {}) resolved by fallback band {}", lat, lon, profile.key());
        return profile.estimate(lat);
    }

    log::debug!("({}, {}) matched no region, using default profile", lat, lon);
    FallbackProfile::MediumWind.estimate(lat)
}

/// Closest grid point and its degree-space distance. Ties keep the first point.
pub fn nearest(lat: f64, lon: f64, points: &[GridPoint]) -> Option<(&GridPoint, f64)> {
    let mut closest = None;
    let mut min_distance = f64::INFINITY;

    for point in points {
        let distance = ((point.lat - lat).powi(2) + (point.lon - lon).powi(2)).sqrt();
        if distance < min_distance {
            min_distance = distance;
            closest = Some(point);
        }
    }

    closest.map(|point| (point, min_distance))
}

pub fn dense_lookup(lat: f64, lon: f64, dataset: &WindDataset) -> Option<WindEstimate> {
    let (point, distance) = match nearest(lat, lon, &dataset.grid_points) {
        Some(found) => found,
        None => {
            log::debug!("No dense wind data for ({}, {}), using estimated values", lat, lon);
            return None;
        }
    };

    if distance >= DENSE_MATCH_DEGREES {
        log::debug!(
            "Nearest dense data point is too far: {:.1} km away, using estimated values",
            distance * KM_PER_DEGREE
        );
        return None;
    }

    let capacity_factor = (point.capacity_factor / 100.0).clamp(0.0, MAX_CAPACITY_FACTOR);
    let distance_km = (distance * KM_PER_DEGREE).round();
    log::debug!(
        "Using dense wind data {} km away: {} m/s, capacity factor {:.1}%",
        distance_km,
        point.wind_speed_mps,
        capacity_factor * 100.0
    );

    Some(WindEstimate {
        key: EstimateKey::TexasHighRes,
        capacity_factor,
        avg_wind_speed: Some(point.wind_speed_mps),
        description: format!(
            "Texas: {} m/s wind speed - Dense interpolated wind resource data",
            point.wind_speed_mps
        ),
        wildlife_risk: wildlife::dense(lat, lon).to_string(),
        source: DENSE_SOURCE.to_string(),
        distance_km: Some(distance_km),
    })
}

/// Piecewise-linear wind model with clamped outputs.
///
/// `speed = base + (lat - lat_origin) * lat_slope + (lon - lon_origin) * lon_slope`,
/// clamped to `[min_speed, max_speed]`; the capacity factor grows linearly from
/// `base_cf` at `min_speed` and is clamped to `[min_cf, max_cf]`.
#[derive(Clone, Copy, Debug)]
pub struct LinearModel {
    pub lat_origin: f64,
    pub lat_slope: f64,
    pub lon_origin: f64,
    pub lon_slope: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub base_cf: f64,
    pub cf_per_mps: f64,
    pub min_cf: f64,
    pub max_cf: f64,
}

impl LinearModel {
    pub fn wind_speed(&self, base: f64, lat: f64, lon: f64) -> f64 {
        let raw = base
            + (lat - self.lat_origin) * self.lat_slope
            + (lon - self.lon_origin) * self.lon_slope;
        raw.clamp(self.min_speed, self.max_speed)
    }

    pub fn capacity_factor(&self, wind_speed: f64) -> f64 {
        (self.base_cf + (wind_speed - self.min_speed) * self.cf_per_mps)
            .clamp(self.min_cf, self.max_cf)
    }
}

const WEST_MODEL: LinearModel = LinearModel {
    lat_origin: 32.0,
    lat_slope: 0.25,
    lon_origin: -102.0,
    lon_slope: 0.15,
    min_speed: 7.5,
    max_speed: 10.0,
    base_cf: 0.28,
    cf_per_mps: 0.04,
    min_cf: 0.25,
    max_cf: 0.45,
};

const CENTRAL_MODEL: LinearModel = LinearModel {
    lat_origin: 30.0,
    lat_slope: 0.12,
    lon_origin: -99.0,
    lon_slope: 0.08,
    min_speed: 6.5,
    max_speed: 8.5,
    base_cf: 0.30,
    cf_per_mps: 0.03,
    min_cf: 0.28,
    max_cf: 0.38,
};

const EASTERN_MODEL: LinearModel = LinearModel {
    lat_origin: 29.0,
    lat_slope: 0.15,
    lon_origin: -96.0,
    lon_slope: 0.05,
    min_speed: 6.5,
    max_speed: 8.0,
    base_cf: 0.28,
    cf_per_mps: 0.04,
    min_cf: 0.26,
    max_cf: 0.38,
};

const SOUTHERN_MODEL: LinearModel = LinearModel {
    lat_origin: 26.0,
    lat_slope: 0.06,
    lon_origin: -100.0,
    lon_slope: 0.03,
    min_speed: 6.0,
    max_speed: 7.5,
    base_cf: 0.26,
    cf_per_mps: 0.04,
    min_cf: 0.24,
    max_cf: 0.36,
};

/// One sub-region of the Texas box.
pub struct Region {
    pub key: EstimateKey,
    pub name: &'static str,
    pub source: &'static str,
    pub contains: fn(f64, f64) -> bool,
    pub model: LinearModel,
    pub base_speed: fn(f64, f64) -> f64,
    pub wildlife: fn(f64, f64) -> &'static str,
}

impl Region {
    pub fn estimate(&self, lat: f64, lon: f64) -> WindEstimate {
        let wind_speed = self.model.wind_speed((self.base_speed)(lat, lon), lat, lon);

        WindEstimate {
            key: self.key,
            capacity_factor: self.model.capacity_factor(wind_speed),
            avg_wind_speed: Some(wind_speed),
            description: format!("{} - Estimated ({:.1} m/s)", self.name, wind_speed),
            wildlife_risk: (self.wildlife)(lat, lon).to_string(),
            source: self.source.to_string(),
            distance_km: None,
        }
    }
}

/// Sub-regions in evaluation order. The raw longitude conditions overlap, so
/// the order is part of the contract: first match wins.
pub static REGIONS: [Region; 4] = [
    Region {
        key: EstimateKey::WestTexas,
        name: "West Texas",
        source: REGIONAL_SOURCE,
        contains: |lat, lon| lon <= -100.5 || (lat >= 33.5 && lon <= -101.5),
        model: WEST_MODEL,
        base_speed: |_, _| 8.0,
        wildlife: wildlife::west,
    },
    Region {
        key: EstimateKey::CentralTexas,
        name: "Central Texas",
        source: REGIONAL_SOURCE,
        contains: |_, lon| -100.5 < lon && lon <= -97.5,
        model: CENTRAL_MODEL,
        base_speed: |_, _| 7.0,
        wildlife: wildlife::central,
    },
    Region {
        key: EstimateKey::EasternTexas,
        name: "Eastern Texas",
        source: fallback::FALLBACK_SOURCE,
        contains: |_, lon| -97.5 < lon && lon <= -93.51,
        model: EASTERN_MODEL,
        base_speed: |_, _| 6.8,
        wildlife: wildlife::eastern,
    },
    Region {
        key: EstimateKey::SouthernTexas,
        name: "Southern Texas",
        source: SOUTHERN_SOURCE,
        contains: |lat, _| lat < 31.0,
        model: SOUTHERN_MODEL,
        // coastal sites get a stronger sea breeze
        base_speed: |_, lon| if lon > -97.0 { 6.8 } else { 6.2 },
        wildlife: wildlife::southern,
    },
];

/// Estimate from the Texas regional models, or `None` outside the box or when
/// no sub-region claims the point.
pub fn regional_estimate(lat: f64, lon: f64) -> Option<WindEstimate> {
    if !TEXAS_BOUNDS.contains(lat, lon) {
        return None;
    }

    REGIONS
        .iter()
        .find(|region| (region.contains)(lat, lon))
        .map(|region| region.estimate(lat, lon))
}

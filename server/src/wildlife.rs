//! Qualitative wildlife-risk labels.
//!
//! Risk geography (bat roosts, bird corridors) does not follow wind-resource
//! geography, so each resolver branch evaluates its own ordered rule table
//! against the queried location and falls back to a base label.

use crate::fallback::FallbackProfile;
use crate::regions::{between, KM_PER_DEGREE};

/// Bracken Cave bat colony.
pub const BAT_ROOST: (f64, f64) = (29.7, -98.3);
pub const BAT_ROOST_RADIUS_KM: f64 = 50.0;

pub const BAT_ROOST_RISK: &str = "High (major bat roosting area)";
pub const BIRD_CORRIDOR_RISK: &str = "Medium-High (migratory bird corridor)";
pub const COASTAL_BIRD_RISK: &str = "Medium-High (coastal bird habitat)";
pub const HIGH_PLAINS_PATHWAY_RISK: &str = "Medium-High (migratory pathway)";
pub const WEST_PATHWAY_RISK: &str = "Medium (migratory pathway)";
pub const MIGRATORY_PATHWAYS_RISK: &str = "Medium-High (migratory pathways)";
pub const SPARSE_WILDLIFE_RISK: &str = "Low-Medium (sparse wildlife)";
pub const LOW_MEDIUM_RISK: &str = "Low-Medium";
pub const MEDIUM_RISK: &str = "Medium";

/// A location predicate paired with the label it yields.
pub struct Rule {
    pub applies: fn(f64, f64) -> bool,
    pub label: &'static str,
}

/// First matching rule wins, otherwise `base`.
pub fn assess(lat: f64, lon: f64, rules: &[Rule], base: &'static str) -> &'static str {
    rules
        .iter()
        .find(|rule| (rule.applies)(lat, lon))
        .map_or(base, |rule| rule.label)
}

/// Planar approximation: degree-space distance scaled to km.
pub fn bat_roost_distance_km(lat: f64, lon: f64) -> f64 {
    ((lat - BAT_ROOST.0).powi(2) + (lon - BAT_ROOST.1).powi(2)).sqrt() * KM_PER_DEGREE
}

fn near_bat_roost(lat: f64, lon: f64) -> bool {
    bat_roost_distance_km(lat, lon) < BAT_ROOST_RADIUS_KM
}

const BAT_ROOST_RULE: Rule = Rule {
    applies: near_bat_roost,
    label: BAT_ROOST_RISK,
};

const DENSE_RULES: [Rule; 5] = [
    BAT_ROOST_RULE,
    Rule {
        applies: |lat, lon| between(lat, 30.0, 35.0) && between(lon, -100.0, -97.0),
        label: BIRD_CORRIDOR_RISK,
    },
    Rule {
        applies: |lat, lon| between(lat, 26.0, 30.0) && lon > -95.0,
        label: COASTAL_BIRD_RISK,
    },
    Rule {
        applies: |lat, lon| between(lat, 35.0, 36.5) && between(lon, -103.0, -100.0),
        label: HIGH_PLAINS_PATHWAY_RISK,
    },
    Rule {
        applies: |lat, lon| lon < -101.0 || (between(lat, 31.0, 35.0) && lon < -102.0),
        label: SPARSE_WILDLIFE_RISK,
    },
];

const WEST_RULES: [Rule; 1] = [Rule {
    applies: |lat, lon| between(lat, 33.5, 35.0) && between(lon, -103.0, -101.0),
    label: WEST_PATHWAY_RISK,
}];

const CENTRAL_RULES: [Rule; 2] = [
    BAT_ROOST_RULE,
    Rule {
        applies: |lat, lon| between(lat, 30.0, 34.0) && between(lon, -99.0, -97.0),
        label: BIRD_CORRIDOR_RISK,
    },
];

const EASTERN_RULES: [Rule; 1] = [Rule {
    applies: |lat, lon| between(lat, 26.0, 30.0) && lon > -95.0,
    label: COASTAL_BIRD_RISK,
}];

const SOUTHERN_RULES: [Rule; 1] = [Rule {
    applies: |_, lon| lon > -95.0,
    label: COASTAL_BIRD_RISK,
}];

pub fn dense(lat: f64, lon: f64) -> &'static str {
    assess(lat, lon, &DENSE_RULES, MEDIUM_RISK)
}

pub fn west(lat: f64, lon: f64) -> &'static str {
    assess(lat, lon, &WEST_RULES, SPARSE_WILDLIFE_RISK)
}

pub fn central(lat: f64, lon: f64) -> &'static str {
    assess(lat, lon, &CENTRAL_RULES, MEDIUM_RISK)
}

pub fn eastern(lat: f64, lon: f64) -> &'static str {
    assess(lat, lon, &EASTERN_RULES, MEDIUM_RISK)
}

pub fn southern(lat: f64, lon: f64) -> &'static str {
    assess(lat, lon, &SOUTHERN_RULES, MEDIUM_RISK)
}

/// Fallback profiles carry no location-specific rules of their own.
pub fn fallback(profile: FallbackProfile, lat: f64) -> &'static str {
    match profile {
        FallbackProfile::Coastal => MIGRATORY_PATHWAYS_RISK,
        _ if between(lat, 40.0, 50.0) => MIGRATORY_PATHWAYS_RISK,
        FallbackProfile::LowWind => LOW_MEDIUM_RISK,
        _ => MEDIUM_RISK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // bat roost
    // =========================================================================

    #[test]
    fn test_bat_roost_distance_at_roost() {
        assert_eq!(bat_roost_distance_km(29.7, -98.3), 0.0);
    }

    #[test]
    fn test_bat_roost_overrides_dense_and_central() {
        // ~0.3 degrees north, ~33 km
        assert_eq!(dense(30.0, -98.3), BAT_ROOST_RISK);
        assert_eq!(central(30.0, -98.3), BAT_ROOST_RISK);
    }

    #[test]
    fn test_bat_roost_radius_is_exclusive() {
        // 0.5 degrees away is 55.5 km
        assert_ne!(central(30.2, -98.3), BAT_ROOST_RISK);
        assert_eq!(central(30.2, -98.3), BIRD_CORRIDOR_RISK);
    }

    // =========================================================================
    // per-branch tables
    // =========================================================================

    #[test]
    fn test_dense_rule_order() {
        assert_eq!(dense(32.0, -99.5), BIRD_CORRIDOR_RISK);
        assert_eq!(dense(28.0, -94.0), COASTAL_BIRD_RISK);
        assert_eq!(dense(35.5, -101.5), HIGH_PLAINS_PATHWAY_RISK);
        assert_eq!(dense(33.0, -102.5), SPARSE_WILDLIFE_RISK);
        assert_eq!(dense(27.0, -97.0), MEDIUM_RISK);
    }

    #[test]
    fn test_dense_corridor_wins_over_sparse() {
        // lon < -101 is never reached here: corridor requires lon >= -100
        assert_eq!(dense(31.0, -100.0), BIRD_CORRIDOR_RISK);
    }

    #[test]
    fn test_west_labels() {
        assert_eq!(west(34.0, -102.0), WEST_PATHWAY_RISK);
        assert_eq!(west(31.0, -104.0), SPARSE_WILDLIFE_RISK);
    }

    #[test]
    fn test_central_labels() {
        assert_eq!(central(31.0, -98.0), BIRD_CORRIDOR_RISK);
        assert_eq!(central(28.0, -100.0), MEDIUM_RISK);
    }

    #[test]
    fn test_eastern_and_southern_coast() {
        assert_eq!(eastern(29.5, -94.5), COASTAL_BIRD_RISK);
        assert_eq!(eastern(31.0, -94.5), MEDIUM_RISK);
        assert_eq!(eastern(29.5, -96.0), MEDIUM_RISK);
        assert_eq!(southern(27.0, -94.0), COASTAL_BIRD_RISK);
        assert_eq!(southern(27.0, -98.0), MEDIUM_RISK);
    }

    #[test]
    fn test_fallback_labels() {
        assert_eq!(fallback(FallbackProfile::Coastal, 33.0), MIGRATORY_PATHWAYS_RISK);
        assert_eq!(fallback(FallbackProfile::HighWind, 45.0), MIGRATORY_PATHWAYS_RISK);
        assert_eq!(fallback(FallbackProfile::HighWind, 37.0), MEDIUM_RISK);
        assert_eq!(fallback(FallbackProfile::LowWind, 30.0), LOW_MEDIUM_RISK);
        assert_eq!(fallback(FallbackProfile::MediumWind, 0.0), MEDIUM_RISK);
    }
}

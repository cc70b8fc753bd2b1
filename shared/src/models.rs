use serde::{Deserialize, Serialize};
use std::fmt;

/// One sample of the dense wind-resource grid.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lon: f64,
    pub wind_speed_mps: f64,
    /// Percentage, 0-100.
    pub capacity_factor: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct DatasetMetadata {
    pub source: Option<String>,
    pub grid_resolution_degrees: Option<f64>,
    pub grid_resolution_km: Option<f64>,
    pub note: Option<String>,
}

/// Dense wind-resource dataset, loaded once and never mutated.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct WindDataset {
    #[serde(default)]
    pub metadata: Option<DatasetMetadata>,
    #[serde(default)]
    pub grid_points: Vec<GridPoint>,
}

impl WindDataset {
    pub fn source_name(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.source.as_deref())
    }
}

/// Which resolver branch produced an estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateKey {
    TexasHighRes,
    WestTexas,
    CentralTexas,
    EasternTexas,
    SouthernTexas,
    HighWind,
    MediumWind,
    LowWind,
    Coastal,
}

impl EstimateKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateKey::TexasHighRes => "texas_high_res",
            EstimateKey::WestTexas => "west_texas",
            EstimateKey::CentralTexas => "central_texas",
            EstimateKey::EasternTexas => "eastern_texas",
            EstimateKey::SouthernTexas => "southern_texas",
            EstimateKey::HighWind => "high_wind",
            EstimateKey::MediumWind => "medium_wind",
            EstimateKey::LowWind => "low_wind",
            EstimateKey::Coastal => "coastal",
        }
    }
}

impl fmt::Display for EstimateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wind-resource estimate for a location, with its provenance.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindEstimate {
    pub key: EstimateKey,
    /// Fraction, 0.0-1.0.
    pub capacity_factor: f64,
    pub avg_wind_speed: Option<f64>,
    pub description: String,
    pub wildlife_risk: String,
    pub source: String,
    #[serde(rename = "distance_km", skip_serializing_if = "Option::is_none", default)]
    pub distance_km: Option<f64>,
}

impl WindEstimate {
    /// True when the estimate comes from the dense measured grid rather than
    /// a regional formula or fallback profile.
    pub fn is_measured(&self) -> bool {
        self.key == EstimateKey::TexasHighRes
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyOutput {
    pub avg_power_mw: f64,
    pub annual_energy_mwh: f64,
    pub annual_energy_gwh: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Emissions {
    pub co2_avoided_tons: f64,
    pub cars_equivalent: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandUse {
    pub turbine_footprint_acres: f64,
    pub total_project_acres: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub installation: f64,
    pub transport: f64,
    pub cost_per_mw: f64,
    pub total_investment: f64,
    pub lcoe_per_mwh: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payback {
    pub annual_revenue: f64,
    pub annual_operating_cost: f64,
    pub annual_net_revenue: f64,
    /// `None` when operating costs exceed revenue.
    pub years: Option<f64>,
}

/// One bar of the levelized-cost comparison between energy sources.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparison {
    pub label: String,
    pub lcoe_per_mwh: f64,
    /// Relative advantage over the most expensive source, 0-100.
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    pub region: EstimateKey,
    pub data_source: String,
    pub effective_capacity_factor: f64,
    pub total_capacity_mw: f64,
    pub energy: EnergyOutput,
    pub emissions: Emissions,
    pub land: LandUse,
    pub wildlife_risk: String,
    pub noise_db: f64,
    pub cost: CostBreakdown,
    pub payback: Payback,
    pub comparison: Vec<CostComparison>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

//! Energy, emissions, land, noise, cost and payback figures for a wind farm
//! built at a resolved location.

use anyhow::{ensure, Result};
use shared::models::{
    CostBreakdown, CostComparison, Emissions, EnergyOutput, ImpactReport, LandUse, Payback,
    WindEstimate,
};

use crate::config::Assumptions;
use crate::regions::MAX_CAPACITY_FACTOR;

pub const DEFAULT_TURBINE_COUNT: u32 = 10;
pub const DEFAULT_TURBINE_SIZE_MW: f64 = 2.5;

const HOURS_PER_YEAR: f64 = 8760.0;

// Noise at the nearest residence, dB
const BASE_NOISE_AT_400M: f64 = 35.0;
const DISTANCE_REDUCTION: f64 = 12.0;
const HEMISPHERE_GROUND_EFFECT: f64 = 6.0;
const LARGE_TURBINE_NOISE: f64 = 5.0;
const LARGE_TURBINE_MW: f64 = 3.0;

/// User-chosen farm parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ImpactInputs {
    pub turbine_count: u32,
    pub turbine_size_mw: f64,
    /// Manually entered fraction, used unless the estimate is measured.
    pub capacity_factor: f64,
}

impl ImpactInputs {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.turbine_count > 0,
            "Turbine count must be a positive integer"
        );
        ensure!(
            self.turbine_size_mw.is_finite() && self.turbine_size_mw > 0.0,
            "Turbine size must be a positive number of MW, got {}",
            self.turbine_size_mw
        );
        ensure!(
            (0.0..=1.0).contains(&self.capacity_factor),
            "Capacity factor must be between 0 and 1, got {}",
            self.capacity_factor
        );
        Ok(())
    }
}

/// The manual capacity factor a user starts from: the estimate, rounded to a whole percent.
pub fn manual_capacity_factor(estimate: &WindEstimate) -> f64 {
    (estimate.capacity_factor * 100.0).round() / 100.0
}

/// Larger turbines reach higher winds and gain a little capacity factor.
pub fn size_adjustment(turbine_size_mw: f64) -> f64 {
    if turbine_size_mw <= 2.0 {
        0.0
    } else if turbine_size_mw <= 3.0 {
        (turbine_size_mw - 2.0) * 0.01
    } else if turbine_size_mw <= 5.0 {
        0.01 + (turbine_size_mw - 3.0) * 0.007
    } else {
        0.023 + (turbine_size_mw - 5.0) * 0.005
    }
}

pub fn calculate(
    estimate: &WindEstimate,
    inputs: &ImpactInputs,
    assumptions: &Assumptions,
) -> Result<ImpactReport> {
    inputs.validate()?;

    let base_capacity_factor = if estimate.is_measured() {
        estimate.capacity_factor
    } else {
        inputs.capacity_factor
    };
    let capacity_factor =
        (base_capacity_factor + size_adjustment(inputs.turbine_size_mw)).min(MAX_CAPACITY_FACTOR);

    let turbines = f64::from(inputs.turbine_count);
    let total_capacity_mw = turbines * inputs.turbine_size_mw;
    let avg_power_mw = total_capacity_mw * capacity_factor;
    let annual_energy_mwh = avg_power_mw * HOURS_PER_YEAR;
    let energy = EnergyOutput {
        avg_power_mw,
        annual_energy_mwh,
        annual_energy_gwh: annual_energy_mwh / 1000.0,
    };

    let co2_avoided_tons = annual_energy_mwh * assumptions.co2_tons_per_mwh;
    let emissions = Emissions {
        co2_avoided_tons,
        cars_equivalent: (co2_avoided_tons / assumptions.car_co2_tons_per_year).round() as u64,
    };

    let land = LandUse {
        turbine_footprint_acres: turbines * assumptions.turbine_footprint_acres,
        total_project_acres: total_capacity_mw * assumptions.acres_per_mw,
    };

    let mut noise_db = BASE_NOISE_AT_400M + DISTANCE_REDUCTION + HEMISPHERE_GROUND_EFFECT;
    if inputs.turbine_size_mw > LARGE_TURBINE_MW {
        noise_db += LARGE_TURBINE_NOISE;
    }

    let installation = total_capacity_mw * 1000.0 * assumptions.cost_per_kw;
    let transport = turbines * assumptions.transport_cost_per_turbine;
    let cost = CostBreakdown {
        installation,
        transport,
        cost_per_mw: installation / total_capacity_mw,
        total_investment: installation + transport,
        lcoe_per_mwh: assumptions.lcoe_wind,
    };

    let payback = payback(annual_energy_mwh, total_capacity_mw, cost.total_investment, assumptions);

    let mut report = ImpactReport {
        region: estimate.key,
        data_source: estimate.source.clone(),
        effective_capacity_factor: capacity_factor,
        total_capacity_mw,
        energy,
        emissions,
        land,
        wildlife_risk: estimate.wildlife_risk.clone(),
        noise_db,
        cost,
        payback,
        comparison: cost_comparison(assumptions),
        pros: Vec::new(),
        cons: Vec::new(),
    };
    report.pros = pros(&report);
    report.cons = cons(&report);

    Ok(report)
}

fn payback(
    annual_energy_mwh: f64,
    total_capacity_mw: f64,
    total_investment: f64,
    assumptions: &Assumptions,
) -> Payback {
    let annual_revenue = annual_energy_mwh * assumptions.electricity_price_per_mwh;
    let annual_operating_cost = total_capacity_mw * 1000.0 * assumptions.operating_cost_per_kw_year;
    let annual_net_revenue = annual_revenue - annual_operating_cost;
    let years = if annual_net_revenue > 0.0 {
        Some(total_investment / annual_net_revenue)
    } else {
        None
    };

    Payback {
        annual_revenue,
        annual_operating_cost,
        annual_net_revenue,
        years,
    }
}

/// Levelized cost per source, with each bar's advantage over the most expensive one.
pub fn cost_comparison(assumptions: &Assumptions) -> Vec<CostComparison> {
    let sources = [
        ("Wind Energy", assumptions.lcoe_wind),
        ("Solar Energy", assumptions.lcoe_solar),
        ("Hydroelectric", assumptions.lcoe_hydro),
    ];
    let max_cost = sources.iter().map(|(_, cost)| *cost).fold(0.0, f64::max);

    sources
        .iter()
        .map(|(label, cost)| CostComparison {
            label: label.to_string(),
            lcoe_per_mwh: *cost,
            percent: if max_cost > 0.0 {
                (max_cost - cost) / max_cost * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

fn pros(report: &ImpactReport) -> Vec<String> {
    vec![
        format!(
            "Produces {} GWh of clean energy annually",
            format_number(report.energy.annual_energy_gwh)
        ),
        format!(
            "Avoids {} tons of CO₂ emissions per year",
            format_number(report.emissions.co2_avoided_tons)
        ),
        "No fuel costs or direct emissions during operation".to_string(),
        "Wind is a renewable, inexhaustible resource".to_string(),
        "Creates local jobs in construction and maintenance".to_string(),
        "Can provide energy security and grid stability".to_string(),
        "Long operational lifespan (20-25 years)".to_string(),
        "Land between turbines can often be used for agriculture".to_string(),
    ]
}

fn cons(report: &ImpactReport) -> Vec<String> {
    vec![
        format!(
            "High upfront investment: ${}",
            format_number(report.cost.installation)
        ),
        format!(
            "Requires significant land area: {} acres",
            format_number(report.land.total_project_acres)
        ),
        format!("Wildlife impact risk: {}", report.wildlife_risk),
        "Intermittent power generation (depends on wind)".to_string(),
        "Visual and noise impacts on local communities".to_string(),
        "Birds and bats may be killed by turbine blades".to_string(),
        "Requires transmission infrastructure to connect to grid".to_string(),
        "Manufacturing and installation have environmental costs".to_string(),
    ]
}

/// Thousands separators and at most two decimals, e.g. `1,234,567.89`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackProfile;
    use crate::regions;
    use approx::assert_relative_eq;
    use shared::models::{DatasetMetadata, EstimateKey, GridPoint, WindDataset};

    fn measured_estimate() -> WindEstimate {
        let dataset = WindDataset {
            metadata: Some(DatasetMetadata::default()),
            grid_points: vec![GridPoint {
                lat: 31.0,
                lon: -99.0,
                wind_speed_mps: 7.2,
                capacity_factor: 35.0,
            }],
        };
        regions::resolve(31.0, -99.0, Some(&dataset))
    }

    fn inputs(turbine_count: u32, turbine_size_mw: f64, capacity_factor: f64) -> ImpactInputs {
        ImpactInputs {
            turbine_count,
            turbine_size_mw,
            capacity_factor,
        }
    }

    // =========================================================================
    // inputs
    // =========================================================================

    #[test]
    fn test_validate_inputs() {
        assert!(inputs(10, 2.5, 0.35).validate().is_ok());
        assert!(inputs(0, 2.5, 0.35).validate().is_err());
        assert!(inputs(10, 0.0, 0.35).validate().is_err());
        assert!(inputs(10, f64::NAN, 0.35).validate().is_err());
        assert!(inputs(10, 2.5, 1.2).validate().is_err());
        assert!(inputs(10, 2.5, -0.1).validate().is_err());
    }

    #[test]
    fn test_manual_capacity_factor_rounds_to_percent() {
        let estimate = regions::resolve(32.0, -103.0, None);
        assert_relative_eq!(manual_capacity_factor(&estimate), 0.29);
    }

    #[test]
    fn test_size_adjustment() {
        assert_eq!(size_adjustment(1.5), 0.0);
        assert_eq!(size_adjustment(2.0), 0.0);
        assert_relative_eq!(size_adjustment(2.5), 0.005, epsilon = 1e-12);
        assert_relative_eq!(size_adjustment(3.0), 0.01, epsilon = 1e-12);
        assert_relative_eq!(size_adjustment(4.0), 0.017, epsilon = 1e-12);
        assert_relative_eq!(size_adjustment(6.0), 0.028, epsilon = 1e-12);
    }

    // =========================================================================
    // calculate
    // =========================================================================

    #[test]
    fn test_measured_farm() {
        let report = calculate(
            &measured_estimate(),
            &inputs(10, 2.5, 0.20),
            &Assumptions::default(),
        )
        .unwrap();

        // measured capacity factor wins over the manual 0.20
        assert_relative_eq!(report.effective_capacity_factor, 0.355, epsilon = 1e-12);
        assert_eq!(report.total_capacity_mw, 25.0);
        assert_relative_eq!(report.energy.avg_power_mw, 8.875, epsilon = 1e-9);
        assert_relative_eq!(report.energy.annual_energy_mwh, 77_745.0, epsilon = 1e-6);
        assert_relative_eq!(report.energy.annual_energy_gwh, 77.745, epsilon = 1e-9);
        assert_relative_eq!(report.emissions.co2_avoided_tons, 31_098.0, epsilon = 1e-6);
        assert_eq!(report.emissions.cars_equivalent, 6760);
        assert_eq!(report.land.turbine_footprint_acres, 10.0);
        assert_eq!(report.land.total_project_acres, 1250.0);
        assert_eq!(report.noise_db, 53.0);
        assert_eq!(report.cost.installation, 43_750_000.0);
        assert_eq!(report.cost.transport, 500_000.0);
        assert_eq!(report.cost.total_investment, 44_250_000.0);
        assert_eq!(report.cost.cost_per_mw, 1_750_000.0);
        assert_eq!(report.cost.lcoe_per_mwh, 30.0);
        assert_relative_eq!(report.payback.annual_revenue, 9_329_400.0, epsilon = 1e-4);
        assert_eq!(report.payback.annual_operating_cost, 625_000.0);
        assert_relative_eq!(
            report.payback.years.unwrap(),
            44_250_000.0 / 8_704_400.0,
            epsilon = 1e-9
        );
        assert_eq!(report.region, EstimateKey::TexasHighRes);
    }

    #[test]
    fn test_estimated_location_uses_manual_factor() {
        let estimate = FallbackProfile::HighWind.estimate(40.0);
        let report = calculate(&estimate, &inputs(4, 2.0, 0.30), &Assumptions::default()).unwrap();

        assert_relative_eq!(report.effective_capacity_factor, 0.30);
        assert_eq!(report.wildlife_risk, "Medium-High (migratory pathways)");
        assert_eq!(report.data_source, "Estimated");
    }

    #[test]
    fn test_effective_capacity_factor_ceiling() {
        let estimate = FallbackProfile::MediumWind.estimate(0.0);
        let report = calculate(&estimate, &inputs(1, 10.0, 0.54), &Assumptions::default()).unwrap();

        assert_eq!(report.effective_capacity_factor, MAX_CAPACITY_FACTOR);
    }

    #[test]
    fn test_large_turbines_are_louder() {
        let estimate = FallbackProfile::MediumWind.estimate(0.0);
        let report = calculate(&estimate, &inputs(1, 3.5, 0.35), &Assumptions::default()).unwrap();

        assert_eq!(report.noise_db, 58.0);
    }

    #[test]
    fn test_unprofitable_farm_has_no_payback() {
        let estimate = FallbackProfile::MediumWind.estimate(0.0);
        let report = calculate(&estimate, &inputs(10, 1.5, 0.0), &Assumptions::default()).unwrap();

        assert_eq!(report.energy.annual_energy_mwh, 0.0);
        assert!(report.payback.annual_net_revenue < 0.0);
        assert!(report.payback.years.is_none());
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let estimate = FallbackProfile::MediumWind.estimate(0.0);
        let result = calculate(&estimate, &inputs(0, 2.5, 0.35), &Assumptions::default());

        assert!(result.is_err());
    }

    #[test]
    fn test_pros_and_cons_embed_figures() {
        let report = calculate(
            &measured_estimate(),
            &inputs(10, 2.5, 0.35),
            &Assumptions::default(),
        )
        .unwrap();

        assert_eq!(report.pros.len(), 8);
        assert_eq!(report.cons.len(), 8);
        assert!(report.pros[0].starts_with("Produces 77.7"));
        assert!(report.pros[0].ends_with(" GWh of clean energy annually"));
        assert_eq!(report.pros[1], "Avoids 31,098 tons of CO₂ emissions per year");
        assert_eq!(report.cons[0], "High upfront investment: $43,750,000");
        assert_eq!(report.cons[1], "Requires significant land area: 1,250 acres");
        assert_eq!(
            report.cons[2],
            format!("Wildlife impact risk: {}", report.wildlife_risk)
        );
    }

    // =========================================================================
    // comparison & formatting
    // =========================================================================

    #[test]
    fn test_cost_comparison() {
        let bars = cost_comparison(&Assumptions::default());
        let labels: Vec<_> = bars.iter().map(|b| b.label.as_str()).collect();

        assert_eq!(labels, vec!["Wind Energy", "Solar Energy", "Hydroelectric"]);
        assert_relative_eq!(bars[0].percent, 50.0);
        assert_relative_eq!(bars[1].percent, 100.0 / 3.0, epsilon = 1e-9);
        assert_eq!(bars[2].percent, 0.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(999.999), "1,000");
        assert_eq!(format_number(1750.0), "1,750");
        assert_eq!(format_number(1_234_567.891), "1,234,567.89");
        assert_eq!(format_number(-2500.25), "-2,500.25");
    }
}

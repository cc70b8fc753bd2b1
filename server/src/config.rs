use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const ENV_PREFIX: &str = "WINDSITE_";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Either an `http(s)://` URL or a local file path.
    pub dataset_url: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            dataset_url: "texas_dense_wind_data.json".to_string(),
        }
    }
}

/// Reference values used by the impact calculator.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub co2_tons_per_mwh: f64,
    pub car_co2_tons_per_year: f64,
    pub acres_per_mw: f64,
    pub turbine_footprint_acres: f64,
    pub cost_per_kw: f64,
    pub transport_cost_per_turbine: f64,
    pub electricity_price_per_mwh: f64,
    pub operating_cost_per_kw_year: f64,
    pub lcoe_wind: f64,
    pub lcoe_solar: f64,
    pub lcoe_hydro: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Assumptions {
            co2_tons_per_mwh: 0.4,
            car_co2_tons_per_year: 4.6,
            acres_per_mw: 50.0,
            turbine_footprint_acres: 1.0,
            cost_per_kw: 1750.0,
            transport_cost_per_turbine: 50_000.0,
            electricity_price_per_mwh: 120.0,
            operating_cost_per_kw_year: 25.0,
            lcoe_wind: 30.0,
            lcoe_solar: 40.0,
            lcoe_hydro: 60.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub assumptions: Assumptions,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build a config from `WINDSITE_*` variables. Unset fields keep their
    /// defaults, and a section with a malformed value falls back to its
    /// defaults without discarding the other section.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();

        Config {
            dataset: section(&vars, "dataset config"),
            assumptions: section(&vars, "impact assumptions"),
        }
    }
}

fn parse_section<T: DeserializeOwned>(vars: &[(String, String)], name: &str) -> Result<T> {
    envy::prefixed(ENV_PREFIX)
        .from_iter(vars.to_vec())
        .with_context(|| format!("Invalid {}", name))
}

fn section<T: DeserializeOwned + Default>(vars: &[(String, String)], name: &str) -> T {
    parse_section(vars, name).unwrap_or_else(|err| {
        log::warn!("{:#}, falling back to default {}", err, name);
        T::default()
    })
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

pub fn config() -> &'static Config {
    &CONFIG
}

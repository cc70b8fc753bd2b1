use clap::{Args, Parser, Subcommand};

use crate::impacts::{DEFAULT_TURBINE_COUNT, DEFAULT_TURBINE_SIZE_MW};

#[derive(Debug, Parser)]
#[command(about = "Wind farm site impact estimator.")]
pub struct Cli {
    /// Dense wind dataset, as an http(s) URL or a local path. Overrides
    /// `WINDSITE_DATASET_URL`.
    #[arg(short, long)]
    pub dataset_url: Option<String>,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON API.
    Http {
        #[arg(env = "WINDSITE_SERVER_ADDRESS")]
        address: std::net::SocketAddr,
    },
    /// Print the wind-resource estimate for a location.
    Estimate(LocationArgs),
    /// Print the farm impact report for a location.
    Impacts(ImpactArgs),
    /// Print the references behind the calculations.
    Sources,
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(Debug, Args)]
pub struct ImpactArgs {
    #[command(flatten)]
    pub location: LocationArgs,
    #[arg(long, default_value_t = DEFAULT_TURBINE_COUNT)]
    pub turbines: u32,
    /// Turbine nameplate capacity in MW.
    #[arg(long, default_value_t = DEFAULT_TURBINE_SIZE_MW)]
    pub turbine_size: f64,
    /// Manual capacity factor in percent. Defaults to the location's estimate.
    #[arg(long)]
    pub capacity_factor: Option<f64>,
}

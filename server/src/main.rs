use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use windsite::cli::{Cli, Command};
use windsite::config::config;
use windsite::impacts::{self, ImpactInputs};
use windsite::{dataset, regions, server, sources};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();
    let dataset_url = args
        .dataset_url
        .unwrap_or_else(|| config().dataset.dataset_url.clone());

    match args.cmd {
        Command::Http { address } => server::run(address, dataset_url).await,
        Command::Estimate(location) => {
            let dataset = dataset::load(&dataset_url).await;
            let estimate = regions::resolve(location.lat, location.lon, dataset.as_ref());
            print_json(&estimate)?;
        }
        Command::Impacts(impact_args) => {
            let dataset = dataset::load(&dataset_url).await;
            let location = &impact_args.location;
            let estimate = regions::resolve(location.lat, location.lon, dataset.as_ref());
            let inputs = ImpactInputs {
                turbine_count: impact_args.turbines,
                turbine_size_mw: impact_args.turbine_size,
                capacity_factor: impact_args
                    .capacity_factor
                    .map(|percent| percent / 100.0)
                    .unwrap_or_else(|| impacts::manual_capacity_factor(&estimate)),
            };
            let report = impacts::calculate(&estimate, &inputs, &config().assumptions)?;
            print_json(&report)?;
        }
        Command::Sources => print_json(&sources::all())?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

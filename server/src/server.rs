use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use shared::models::{WindDataset, WindEstimate};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::config::config;
use crate::impacts::{self, ImpactInputs, DEFAULT_TURBINE_COUNT, DEFAULT_TURBINE_SIZE_MW};
use crate::regions;
use crate::sources;

/// Written once by the background loader. Empty until the load finishes, and
/// `Some(None)` when the dataset turned out to be unavailable.
pub type SharedDataset = Arc<OnceCell<Option<WindDataset>>>;

pub async fn run(address: SocketAddr, dataset_url: String) {
    let dataset = SharedDataset::default();

    // Requests served before this completes get non-dense estimates.
    tokio::spawn(load_in_background(dataset.clone(), dataset_url));

    log::info!("Listening on http://{}", address);
    warp::serve(routes(dataset)).run(address).await
}

async fn load_in_background(dataset: SharedDataset, dataset_url: String) {
    let loaded = crate::dataset::load(&dataset_url).await;
    if dataset.set(loaded).is_err() {
        log::warn!("Wind dataset was already loaded, ignoring reload");
    }
}

pub fn routes(
    dataset: SharedDataset,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health_route = warp::path!("health")
        .and(warp::get())
        .map(|| StatusCode::OK);

    let estimate_route = warp::path!("estimate")
        .and(warp::get())
        .and(warp::query::<Location>())
        .and(with_dataset(dataset.clone()))
        .map(get_estimate);

    let impacts_route = warp::path!("impacts")
        .and(warp::get())
        .and(warp::query::<ImpactQuery>())
        .and(with_dataset(dataset))
        .and_then(get_impacts);

    let sources_route = warp::path!("sources")
        .and(warp::get())
        .map(|| warp::reply::json(&sources::all()));

    health_route
        .or(estimate_route)
        .or(impacts_route)
        .or(sources_route)
        .recover(rejection)
}

fn with_dataset(
    dataset: SharedDataset,
) -> impl Filter<Extract = (SharedDataset,), Error = Infallible> + Clone {
    warp::any().map(move || dataset.clone())
}

fn loaded(dataset: &SharedDataset) -> Option<&WindDataset> {
    dataset.get().and_then(Option::as_ref)
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Farm inputs stay raw strings so a bad value is reported as an input error
/// rather than as a missing location.
#[derive(Debug, Deserialize)]
pub struct ImpactQuery {
    pub lat: f64,
    pub lon: f64,
    pub turbines: Option<String>,
    pub turbine_size: Option<String>,
    /// Percent, like the capacity factor slider.
    pub capacity_factor: Option<String>,
}

impl ImpactQuery {
    fn inputs(&self, estimate: &WindEstimate) -> anyhow::Result<ImpactInputs> {
        let turbine_count: Option<u32> = parse_param(&self.turbines, "turbines")?;
        let turbine_size_mw: Option<f64> = parse_param(&self.turbine_size, "turbine_size")?;
        let percent: Option<f64> = parse_param(&self.capacity_factor, "capacity_factor")?;

        Ok(ImpactInputs {
            turbine_count: turbine_count.unwrap_or(DEFAULT_TURBINE_COUNT),
            turbine_size_mw: turbine_size_mw.unwrap_or(DEFAULT_TURBINE_SIZE_MW),
            capacity_factor: percent
                .map(|percent| percent / 100.0)
                .unwrap_or_else(|| impacts::manual_capacity_factor(estimate)),
        })
    }
}

fn parse_param<T>(value: &Option<String>, name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .as_deref()
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {} {:?}", name, raw))
        })
        .transpose()
}

fn get_estimate(location: Location, dataset: SharedDataset) -> impl Reply {
    let estimate = regions::resolve(location.lat, location.lon, loaded(&dataset));
    warp::reply::json(&estimate)
}

async fn get_impacts(query: ImpactQuery, dataset: SharedDataset) -> Result<impl Reply, Rejection> {
    let estimate = regions::resolve(query.lat, query.lon, loaded(&dataset));
    let report = query
        .inputs(&estimate)
        .and_then(|inputs| impacts::calculate(&estimate, &inputs, &config().assumptions))
        .map_err(|e| warp::reject::custom(InvalidInput(e)))?;
    Ok(warp::reply::json(&report))
}

#[derive(Debug)]
struct InvalidInput(anyhow::Error);
impl warp::reject::Reject for InvalidInput {}

#[derive(Serialize)]
struct ErrorMessage {
    code: u16,
    message: String,
}

pub async fn rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found.".to_string())
    } else if let Some(InvalidInput(e)) = err.find::<InvalidInput>() {
        (StatusCode::BAD_REQUEST, format!("{:#}", e))
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (
            StatusCode::BAD_REQUEST,
            "Please select a location first: lat and lon must be given as numbers.".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.".to_string())
    } else {
        log::error!("Error: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.".to_string(),
        )
    };

    let json = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        message,
    });

    Ok(warp::reply::with_status(json, code))
}

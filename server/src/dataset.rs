//! Loader for the dense wind-resource grid.
//!
//! The dataset is optional. Network errors, bad statuses and malformed JSON
//! are logged and reported as `None`, which the resolver treats as "no dense
//! data" and answers from its regional estimates instead.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use shared::models::WindDataset;

/// Load the dataset from an `http(s)://` URL or a local path.
pub async fn load(location: &str) -> Option<WindDataset> {
    match fetch(location).await {
        Ok(dataset) => {
            log_summary(&dataset);
            Some(dataset)
        }
        Err(err) => {
            log::warn!(
                "Could not load dense wind data from {}, using fallback estimates: {:#}",
                location,
                err
            );
            None
        }
    }
}

async fn fetch(location: &str) -> Result<WindDataset> {
    let bytes = if is_remote(location) {
        download(location).await?
    } else {
        tokio::fs::read(location)
            .await
            .with_context(|| format!("Failed to read {}", location))?
    };
    parse(&bytes)
}

pub fn parse(bytes: &[u8]) -> Result<WindDataset> {
    serde_json::from_slice(bytes).context("Malformed wind dataset")
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Append a `v=<version>` query parameter so intermediaries never serve a stale copy.
pub fn cache_busted_url(url: &str, version: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}v={}", url, separator, version)
}

async fn download(url: &str) -> Result<Vec<u8>> {
    let url = cache_busted_url(url, Utc::now().timestamp_millis());
    let response = reqwest::get(&url)
        .await
        .context("Failed to request wind dataset")?;

    match response.status() {
        reqwest::StatusCode::OK => {
            let bytes = response
                .bytes()
                .await
                .context("Error reading wind dataset body")?;
            Ok(bytes.to_vec())
        }
        reqwest::StatusCode::NOT_FOUND => Err(anyhow!("Dense wind data file not found")),
        status => Err(anyhow!("Wind dataset download failed with status: {}", status)),
    }
}

fn log_summary(dataset: &WindDataset) {
    log::info!("Loaded dense wind data");
    log::info!(
        "Data source: {}",
        dataset.source_name().unwrap_or("Texas Dense Wind Resource")
    );

    if let Some(metadata) = &dataset.metadata {
        if let Some(degrees) = metadata.grid_resolution_degrees {
            match metadata.grid_resolution_km {
                Some(km) => log::info!("Resolution: {} degrees (~{}km spacing)", degrees, km),
                None => log::info!("Resolution: {} degrees", degrees),
            }
        }
    }

    log::info!("Using dense data with {} grid points", dataset.grid_points.len());

    if let Some(note) = dataset.metadata.as_ref().and_then(|m| m.note.as_ref()) {
        log::info!("Note: {}", note);
    }
}

// src/fetch.rs

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::error::{EtlError, Result};

/// Blocking client with the request timeout switched off.
pub fn client() -> Result<Client> {
    Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| EtlError::network("<client>", e))
}

/// Single GET of `url`, returning the body as text.
///
/// No retry and no status check: whatever body comes back is handed to the
/// extractor, which fails on structure if it is not the expected page.
#[tracing::instrument(level = "info", skip(client))]
pub fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| EtlError::network(url, e))?;

    let resp = client
        .get(parsed)
        .send()
        .map_err(|e| EtlError::network(url, e))?;
    let status = resp.status();
    let html = resp.text().map_err(|e| EtlError::network(url, e))?;

    info!(%status, bytes = html.len(), "fetched page");
    Ok(html)
}

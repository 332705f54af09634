//! Shared HTTP plumbing for the agents
//!
//! Every agent talks to a keyless public API through a `reqwest` client
//! wrapped in retry middleware, so transient failures (timeouts, 5xx, 429)
//! are retried with exponential backoff before an agent gives up.

use std::time::{Duration, Instant};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{Result, TourAiError};

/// Build a retrying client for one upstream service
pub fn build_client(
    service: &str,
    user_agent: &str,
    timeout_seconds: u32,
    max_retries: u32,
) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(user_agent)
        .build()
        .map_err(|e| {
            TourAiError::config(format!("Failed to create HTTP client for {service}: {e}"))
        })?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// GET `url` and decode the JSON body, mapping every failure to an API error
#[instrument(skip(client), level = "debug")]
pub async fn get_json<T: DeserializeOwned>(
    client: &ClientWithMiddleware,
    service: &str,
    url: &str,
) -> Result<T> {
    let start = Instant::now();

    let response = client.get(url).send().await.map_err(|e| {
        warn!("{service} request failed: {e}");
        TourAiError::api(service, format!("request failed: {e}"))
    })?;

    let status = response.status();
    debug!(
        "{service} responded {status} in {:.3}s",
        start.elapsed().as_secs_f64()
    );
    if !status.is_success() {
        warn!("{service} returned HTTP {status}");
        return Err(TourAiError::api(service, format!("HTTP {status}")));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| TourAiError::api(service, format!("invalid response body: {e}")))
}

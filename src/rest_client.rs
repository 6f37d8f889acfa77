use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::log;

use crate::config_handler::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type Params<'p> = [(&'p str, String)];

/// Authenticated GET client for the sports API.
pub struct RestClient<'a> {
    config: &'a Config,
    client: reqwest::Client,
    auth: (HeaderName, HeaderValue),
}

impl<'a> RestClient<'a> {
    /// Fails before any network call when the base url or api key is missing.
    pub fn new(config: &'a Config) -> Result<RestClient<'a>> {
        if config.base_url.trim().is_empty() {
            bail!("[CONFIG] SPORTAPI_BASE_URL is not set");
        }
        if config.api_key.is_empty() {
            bail!("[CONFIG] SPORTAPI_KEY is not set");
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(RestClient { config, client, auth: auth_header(config)? })
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn get_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, params: &Params<'_>) -> Result<Value> {
        let url = self.get_url(path);
        let attempts = self.config.retry_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            let before = Instant::now();
            let rsp = self.client.get(&url)
                .header(self.auth.0.clone(), self.auth.1.clone())
                .query(params)
                .send()
                .await;

            match rsp {
                Ok(rsp) if rsp.status() == StatusCode::OK => {
                    let body = rsp.text().await
                        .with_context(|| format!("[REST] Could not read body from {url}"))?;
                    log::info!("[REST] Call {url} {:.2?}", before.elapsed());
                    return serde_json::from_str(&body)
                        .map_err(|_| anyhow!("[REST] non-JSON response from {url}"));
                },
                Ok(rsp) => {
                    log::warn!("[REST] Attempt {attempt}/{attempts} {url} returned {}", rsp.status());
                    last_error = Some(anyhow!("[REST] HTTP {} from {url}", rsp.status()));
                },
                Err(e) => {
                    log::warn!("[REST] Attempt {attempt}/{attempts} {url} failed: {e}");
                    last_error = Some(anyhow::Error::new(e).context(format!("[REST] Call to {url} failed")));
                },
            }
            tokio::time::sleep(self.backoff(attempt)).await;
        }

        Err(last_error.unwrap_or_else(|| anyhow!("[REST] No attempt made for {url}")))
    }

    /// Linear: one backoff step per attempt made so far.
    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.config.retry_backoff_ms * u64::from(attempt))
    }
}

fn auth_header(config: &Config) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(config.auth_header_name.as_bytes())
        .with_context(|| format!("[CONFIG] Invalid AUTH_HEADER_NAME {:?}", config.auth_header_name))?;
    let raw = if config.auth_header_name.eq_ignore_ascii_case("authorization") {
        format!("{} {}", config.auth_header_type, config.api_key)
    } else {
        config.api_key.clone()
    };
    let mut value = HeaderValue::from_str(&raw)
        .context("[CONFIG] SPORTAPI_KEY is not a valid header value")?;
    value.set_sensitive(true);
    Ok((name, value))
}

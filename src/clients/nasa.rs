use reqwest::Client;
use std::time::Instant;

use crate::core::ApodError;
use crate::domain::{ApodRecord, ApodSource};
use crate::infra::config::NasaConfig;
use crate::infra::http::headers::add_standard_headers;
use crate::infra::runtime::limits::{make_http_client, make_http_client_with};

const APOD_PATH: &str = "/planetary/apod";

#[derive(Clone)]
pub struct NasaRemote {
    base: String,
    api_key: String,
    http: Client,
}

impl NasaRemote {
    pub fn new(base: impl Into<String>, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base: base.into(),
            api_key: api_key.into(),
            http: make_http_client()?,
        })
    }

    pub fn from_config(cfg: &NasaConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            http: make_http_client_with(cfg)?,
        })
    }

    /// One GET against `planetary/apod`. No retries.
    pub async fn apod(&self, date: Option<&str>) -> Result<ApodRecord, ApodError> {
        let url = format!("{}{}", self.base.trim_end_matches('/'), APOD_PATH);
        let query = query_pairs(&self.api_key, date);
        let (builder, rid) = add_standard_headers(self.http.get(&url).query(&query), None);
        tracing::debug!(endpoint = %url, date = ?date, request_id = %rid, "nasa.apod request");

        let start = Instant::now();
        let res = send(builder).await;
        match &res {
            Ok(_) => {
                let elapsed_ms = start.elapsed().as_millis() as f64;
                crate::infra::logging::log_metric("apod", "remote_latency_ms", elapsed_ms);
            }
            Err(e) => {
                tracing::warn!(request_id = %rid, kind = e.kind(), error = %e, "nasa.apod failed");
                crate::infra::logging::log_metric("apod", "remote_error_total", 1.0);
            }
        }
        res
    }
}

async fn send(builder: reqwest::RequestBuilder) -> Result<ApodRecord, ApodError> {
    let resp = builder.send().await.map_err(ApodError::Transport)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ApodError::Status(status));
    }
    // Only a literally empty object means "no data"; unknown keys still render.
    let body = resp.json::<serde_json::Map<String, serde_json::Value>>().await.map_err(|e| {
        if e.is_decode() {
            ApodError::Decode(e.to_string())
        } else {
            ApodError::Transport(e)
        }
    })?;
    if body.is_empty() {
        return Err(ApodError::Empty);
    }
    serde_json::from_value(serde_json::Value::Object(body)).map_err(|e| ApodError::Decode(e.to_string()))
}

/// `api_key` always, `date` only when given and non-empty.
fn query_pairs<'a>(api_key: &'a str, date: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
    let mut q = vec![("api_key", api_key)];
    if let Some(d) = date.filter(|d| !d.is_empty()) {
        q.push(("date", d));
    }
    q
}

#[async_trait::async_trait]
impl ApodSource for NasaRemote {
    async fn fetch(&self, date: Option<&str>) -> Result<ApodRecord, ApodError> {
        self.apod(date).await
    }
}

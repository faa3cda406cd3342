// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use threadboard_app::{ThreadRecord, ThreadSource};
use url::Url;

/// Either a bare array of records or an envelope object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThreadPayload {
    List(Vec<ThreadRecord>),
    Envelope { threads: Vec<ThreadRecord> },
}

impl ThreadPayload {
    fn into_threads(self) -> Vec<ThreadRecord> {
        match self {
            Self::List(threads) | Self::Envelope { threads } => threads,
        }
    }
}

pub fn parse_threads(raw: &str) -> Result<Vec<ThreadRecord>> {
    let payload: ThreadPayload = serde_json::from_str(raw).context(
        "decode thread payload; expected a JSON array of threads or {\"threads\": [...]}",
    )?;
    Ok(payload.into_threads())
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThreadSource for FileSource {
    fn name(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch_threads(&self) -> Result<Vec<ThreadRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read thread file {}", self.path.display()))?;
        let threads =
            parse_threads(&raw).with_context(|| format!("parse {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), count = threads.len(), "loaded threads from file");
        Ok(threads)
    }
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    timeout: Duration,
    http: HttpClient,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = validate_feed_url(url)?;
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self { url, timeout, http })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ThreadSource for HttpSource {
    fn name(&self) -> String {
        format!("http {}", self.url)
    }

    fn fetch_threads(&self) -> Result<Vec<ThreadRecord>> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .map_err(|error| connection_error(&self.url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let body = response.text().context("read thread feed body")?;
        let threads = parse_threads(&body).with_context(|| format!("decode feed {}", self.url))?;
        tracing::debug!(url = %self.url, count = threads.len(), "loaded threads from feed");
        Ok(threads)
    }
}

pub fn validate_feed_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("source.url must not be empty");
    }
    let url = Url::parse(trimmed).with_context(|| format!("invalid feed url {trimmed:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("feed url {trimmed:?} uses unsupported scheme {other:?}; use http or https"),
    }
}

fn connection_error(url: &Url, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach thread feed {} -- check [source].url and that the server is running ({})",
        url,
        error
    )
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Message { message: String },
    Text(String),
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
    {
        let message = match error {
            ErrorBody::Message { message } => message,
            ErrorBody::Text(text) => text,
        };
        if !message.is_empty() {
            return anyhow!("feed error ({}): {}", status.as_u16(), message);
        }
    }

    if body.len() < 100 && !body.contains('{') && !body.trim().is_empty() {
        return anyhow!("feed error ({}): {}", status.as_u16(), body.trim());
    }

    anyhow!("feed returned {}", status.as_u16())
}

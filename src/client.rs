// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! HTTP client for the generation backend.
//!
//! One endpoint, no retries: `POST {base}/generate-bpmn` with `{"text": …}`. The underlying
//! `reqwest::Client` is cheap to clone and safe to share across in-flight requests.

use std::fmt;

use crate::config::BackendConfig;
use crate::model::{GenerationRequest, GenerationResult};

#[derive(Debug)]
pub enum GenerateError {
    /// The request never completed (connect failure, dropped connection, …).
    Http(reqwest::Error),
    /// The backend answered with a non-success status.
    Status { status: u16 },
    /// The backend answered 2xx but the payload did not match the contract.
    Decode(serde_json::Error),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Status { status } => write!(f, "backend returned HTTP {status}"),
            Self::Decode(err) => write!(f, "malformed backend payload: {err}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Status { .. } => None,
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self { http: reqwest::Client::new(), base_url: config.base_url().to_owned() }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/generate-bpmn", self.base_url)
    }

    /// Submits a process description and decodes the generation result.
    pub async fn generate(&self, text: &str) -> Result<GenerationResult, GenerateError> {
        let request = GenerationRequest { text: text.to_owned() };
        let response = self.http.post(self.endpoint()).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Status { status: status.as_u16() });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(GenerateError::Decode)
    }
}

// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Backend configuration.
//!
//! The generation backend address is explicit startup configuration: resolved once in `main`
//! (flag first, environment second, built-in default last) and injected into the
//! [`GenerationClient`](crate::client::GenerationClient).

use std::env;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const BACKEND_URL_ENV: &str = "UNDINE_BACKEND_URL";
pub const LOG_FILE_ENV: &str = "UNDINE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl BackendConfig {
    /// Creates a config for the given base URL. Trailing slashes are stripped so endpoint
    /// paths can always be appended with a single `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Resolves the backend address from `UNDINE_BACKEND_URL`, falling back to the default
    /// local development address.
    pub fn from_env() -> Self {
        env::var(BACKEND_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::{BackendConfig, DEFAULT_BACKEND_URL};

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(BackendConfig::default().base_url(), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn strips_trailing_slashes() {
        let config = BackendConfig::new("https://bpmn.example.com/");
        assert_eq!(config.base_url(), "https://bpmn.example.com");

        let config = BackendConfig::new("https://bpmn.example.com//");
        assert_eq!(config.base_url(), "https://bpmn.example.com");
    }

    #[test]
    fn keeps_path_segments() {
        let config = BackendConfig::new("https://api.example.com/bpmn/v1");
        assert_eq!(config.base_url(), "https://api.example.com/bpmn/v1");
    }
}

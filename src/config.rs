//! Client configuration.
//!
//! Configuration is built once and shared read-only between the client,
//! its endpoints and the search service.

use crate::error::{Result, UnderstatError};
use crate::{BASE_URL_ENV_VAR, CHROME_ENV_VAR, MODE_ENV_VAR};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Public understat host.
pub const DEFAULT_BASE_URL: &str = "https://understat.com";

/// How data is pulled out of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Scrape `JSON.parse('...')` blocks out of the resource's HTML page.
    #[default]
    Html,
    /// Read the `/action/get<Kind>Data/...` JSON endpoint.
    Json,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Html => f.write_str("html"),
            ExtractionMode::Json => f.write_str("json"),
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = UnderstatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ExtractionMode::Html),
            "json" | "ajax" => Ok(ExtractionMode::Json),
            _ => Err(UnderstatError::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Options for the headless browser used by search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOptions {
    pub headless: bool,
    /// Explicit Chrome/Chromium executable; autodetected when `None`.
    pub executable: Option<PathBuf>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host URL without a trailing slash.
    pub base_url: String,
    pub mode: ExtractionMode,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub browser: BrowserOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: ExtractionMode::default(),
            user_agent: concat!("understat-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(30),
            browser: BrowserOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `UNDERSTAT_BASE_URL`, `UNDERSTAT_MODE` and
    /// `UNDERSTAT_CHROME`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
            config = config.with_base_url(url);
        }
        if let Ok(mode) = std::env::var(MODE_ENV_VAR) {
            config.mode = mode.parse()?;
        }
        if let Ok(path) = std::env::var(CHROME_ENV_VAR) {
            config.browser.executable = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Per-call search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Upper bound on the number of ids yielded.
    pub max_results: usize,
    /// Bound on every wait-for-element step.
    pub page_load_timeout: Duration,
    /// Delay between two checks of a wait condition.
    pub poll_interval: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            page_load_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://understat.com");
        assert_eq!(config.mode, ExtractionMode::Html);
        assert!(config.browser.headless);
        assert!(config.user_agent.starts_with("understat-rs/"));
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080//");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("html".parse::<ExtractionMode>().unwrap(), ExtractionMode::Html);
        assert_eq!(" JSON ".parse::<ExtractionMode>().unwrap(), ExtractionMode::Json);
        assert_eq!("ajax".parse::<ExtractionMode>().unwrap(), ExtractionMode::Json);
        match "xml".parse::<ExtractionMode>() {
            Err(UnderstatError::InvalidMode { mode }) => assert_eq!(mode, "xml"),
            other => panic!("Expected InvalidMode, got {:?}", other),
        }
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(BASE_URL_ENV_VAR, "http://localhost:9000/");
        std::env::set_var(MODE_ENV_VAR, "json");
        std::env::set_var(CHROME_ENV_VAR, "/opt/chrome/chrome");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.mode, ExtractionMode::Json);
        assert_eq!(
            config.browser.executable,
            Some(PathBuf::from("/opt/chrome/chrome"))
        );

        std::env::set_var(MODE_ENV_VAR, "yaml");
        assert!(ClientConfig::from_env().is_err());

        std::env::remove_var(BASE_URL_ENV_VAR);
        std::env::remove_var(MODE_ENV_VAR);
        std::env::remove_var(CHROME_ENV_VAR);
    }

    #[test]
    fn test_search_options_default() {
        let options = SearchOptions::default();
        assert_eq!(options.max_results, 5);
        assert_eq!(options.page_load_timeout, Duration::from_secs(5));
    }
}

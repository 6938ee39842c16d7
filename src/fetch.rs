//! Blocking fetch-and-extract for job posting URLs.
//!
//! One GET per call with browser-like headers, then a single extraction
//! pass over the body. The extractor itself never touches the network;
//! fetch-level failures stay distinct from extraction-level
//! `success = false`.

use std::time::Duration;

use tracing::{info, warn};
use url::Url;

use crate::extractors::{extract_job_info, ExtractionResult};

// Several job boards serve stripped-down markup to unknown agents, so the
// request mimics a desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// User-facing placeholders for fields the extractor left empty.
const UNKNOWN_POSITION: &str = "Unknown Position";
const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Fetch-level failures. Extraction itself cannot fail; an extraction
/// that finds nothing is reported through `ExtractionResult::success`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("failed to fetch page: HTTP {0}")]
    Status(u16),
    #[error("failed to fetch page: {0}")]
    Transport(String),
}

/// Request knobs for [`scrape_url_with`].
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Fetch `url` and extract job fields from the response body, with the
/// default browser-like configuration.
pub fn scrape_url(url: &str) -> Result<ExtractionResult, FetchError> {
    scrape_url_with(&ScrapeConfig::default(), url)
}

/// Like [`scrape_url`], with explicit request configuration. Empty fields
/// in the returned result are replaced by the "Unknown …" placeholders.
pub fn scrape_url_with(config: &ScrapeConfig, url: &str) -> Result<ExtractionResult, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }
    let hostname = parsed.host_str().unwrap_or_default().to_string();

    info!("fetching job posting: {}", url);
    let agent = ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build(),
    );

    let html = match agent
        .get(url)
        .header("Accept", ACCEPT)
        .header("Accept-Language", ACCEPT_LANGUAGE)
        .call()
    {
        Ok(resp) if resp.status().is_success() => resp
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Transport(e.to_string()))?,
        Ok(resp) => return Err(FetchError::Status(resp.status().as_u16())),
        Err(ureq::Error::StatusCode(code)) => return Err(FetchError::Status(code)),
        Err(e) => return Err(FetchError::Transport(e.to_string())),
    };

    let mut result = extract_job_info(&html, &hostname, Some(url));
    if !result.success {
        warn!("no job fields extracted from {}", url);
    }
    apply_placeholders(&mut result);
    Ok(result)
}

fn apply_placeholders(result: &mut ExtractionResult) {
    if result.job_title.is_empty() {
        result.job_title = UNKNOWN_POSITION.to_string();
    }
    if result.company_name.is_empty() {
        result.company_name = UNKNOWN_COMPANY.to_string();
    }
}

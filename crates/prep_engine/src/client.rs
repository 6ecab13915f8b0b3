use std::time::Duration;

use futures_util::StreamExt;
use prep_core::{HealthStatus, InterviewRecord, ResearchTarget};
use prep_logging::{prep_debug, prep_warn};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::decode::{decode_health, decode_record};
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://interview-organizer-agent.vercel.app";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Read-only access to the interview research service.
#[async_trait::async_trait]
pub trait ResearchSource: Send + Sync {
    async fn fetch_research(&self, target: &ResearchTarget) -> Result<InterviewRecord, FetchError>;

    async fn health(&self) -> Result<HealthStatus, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestResearchClient {
    settings: ClientSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestResearchClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let base_url = Url::parse(settings.base_url.trim())
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    /// Joins path segments onto the base url; each segment is percent-escaped.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn research_url(&self, target: &ResearchTarget) -> Url {
        match target {
            ResearchTarget::Latest => self.endpoint(&["interview-research"]),
            ResearchTarget::Company(name) => {
                self.endpoint(&["interview-research", "company", name.as_str()])
            }
        }
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        prep_debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            prep_warn!("GET {} answered {}", url, status);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        prep_debug!("GET {} read {} bytes", url, bytes.len());
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ResearchSource for ReqwestResearchClient {
    async fn fetch_research(&self, target: &ResearchTarget) -> Result<InterviewRecord, FetchError> {
        let bytes = self.get_bytes(self.research_url(target)).await?;
        decode_record(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode(err.clone()), err.to_string()))
    }

    async fn health(&self) -> Result<HealthStatus, FetchError> {
        let bytes = self.get_bytes(self.endpoint(&["health"])).await?;
        decode_health(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode(err.clone()), err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

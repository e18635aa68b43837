use crate::config::Config;
use crate::constants::{
    BROWSER_USER_AGENT, FORWARDED_FOR_HEADER, SUBMIT_CONTENT_TYPE,
};
use crate::error::ServiceError;
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

/// Descriptor returned by a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    /// Where the optimized bytes can be fetched from.
    pub url: String,
    pub input_size: u64,
    pub output_size: u64,
    /// `output_size / input_size` as computed by the service.
    pub ratio: f64,
}

/// The two halves of a round-trip against a compression service.
#[async_trait]
pub trait CompressionService: Send + Sync {
    /// Uploads raw image bytes and returns the result descriptor.
    async fn submit(&self, image: Vec<u8>) -> Result<CompressionResult, ServiceError>;

    /// Downloads the optimized bytes behind `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct InputInfo {
    size: u64,
}

#[derive(Debug, Deserialize)]
struct OutputInfo {
    url: String,
    size: u64,
    ratio: f64,
}

/// Body of a submit response. Error replies are tried first since they carry
/// an `error` key that success replies never have.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ShrinkReply {
    Failure {
        error: serde_json::Value,
        #[serde(default)]
        message: Option<String>,
    },
    Success {
        input: InputInfo,
        output: OutputInfo,
    },
}

impl ShrinkReply {
    fn decode(body: &[u8]) -> Result<CompressionResult, ServiceError> {
        match serde_json::from_slice::<ShrinkReply>(body)? {
            ShrinkReply::Failure { error, message } => Err(ServiceError::Remote(
                message.unwrap_or_else(|| match error {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                }),
            )),
            ShrinkReply::Success { input, output } => Ok(CompressionResult {
                url: output.url,
                input_size: input.size,
                output_size: output.size,
                ratio: output.ratio,
            }),
        }
    }
}

/// Builds an `X-Forwarded-For` value from three random octets and the clock.
pub fn forwarded_for(octets: [u8; 3], unix_millis: i64) -> String {
    format!(
        "{}.{}.{}.{}",
        octets[0] % 255,
        octets[1] % 255,
        octets[2] % 255,
        unix_millis.rem_euclid(255)
    )
}

/// Three octets uniform over 0..255. Bytes equal to 255 are drawn again
/// rather than folded, and the fixed version/variant bytes of a v4 UUID are
/// never used.
fn random_octets() -> [u8; 3] {
    let mut octets = [0u8; 3];
    let mut filled = 0;

    while filled < octets.len() {
        let random = Uuid::new_v4();
        for (index, byte) in random.as_bytes().iter().enumerate() {
            if index == 6 || index == 8 || *byte == u8::MAX {
                continue;
            }
            octets[filled] = *byte;
            filled += 1;
            if filled == octets.len() {
                break;
            }
        }
    }

    octets
}

pub fn random_forwarded_for() -> String {
    forwarded_for(random_octets(), chrono::Utc::now().timestamp_millis())
}

/// Client for the TinyPNG web endpoint.
#[derive(Debug, Clone)]
pub struct TinifyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TinifyClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        Self::new(config.endpoint.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompressionService for TinifyClient {
    async fn submit(&self, image: Vec<u8>) -> Result<CompressionResult, ServiceError> {
        // Error replies come with 4xx statuses but still carry the JSON body.
        let response = self
            .http
            .post(&self.endpoint)
            .header(FORWARDED_FOR_HEADER, random_forwarded_for())
            .header(CACHE_CONTROL, "no-cache")
            .header(CONTENT_TYPE, SUBMIT_CONTENT_TYPE)
            .body(image)
            .send()
            .await?;

        let body = response.bytes().await?;
        ShrinkReply::decode(&body)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

use anyhow::{Result, anyhow};
use std::time::Duration;

/// Performs the network side of a probe
///
/// Implementations return the HTTP status code of the response, or an error
/// describing why no response was received. Timing is measured by the caller.
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    async fn check(&self, target: &str) -> Result<u16>;
}

/// HTTP checker issuing a single GET per call
pub struct HttpChecker {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("uppe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, target: &str) -> Result<u16> {
        let response = self.client.get(target).send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow!("Request timed out after {}s", self.timeout.as_secs_f64())
            } else if e.is_connect() {
                anyhow!("Connection failed: {}", error_chain(&e))
            } else {
                anyhow!("HTTP request failed: {}", error_chain(&e))
            }
        })?;

        // Any response counts, the expected status is compared by the stats layer
        Ok(response.status().as_u16())
    }
}

/// Flatten a request error and its sources into one line
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MonitorError;
use crate::monitoring::types::now_millis;
use crate::validation::{validate_endpoint_name, validate_endpoint_url, validate_expected_status};

/// Status code an endpoint is expected to answer with unless told otherwise
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// A registered monitoring target
///
/// Fields are fixed at registration, changing one means removing the
/// endpoint and registering it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub expected_status: u16,
    /// Registration time in milliseconds since the Unix epoch
    pub created_at: i64,
}

/// Registration request, as read from the API or the config seed list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEndpoint {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "expectedStatus", skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<u16>,
}

impl NewEndpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into(), expected_status: None }
    }

    pub fn with_expected_status(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// Validate the request and build the endpoint with a fresh identifier
    pub fn into_endpoint(self) -> Result<Endpoint, MonitorError> {
        let expected_status = self.expected_status.unwrap_or(DEFAULT_EXPECTED_STATUS);

        validate_endpoint_name(&self.name).into_result()?;
        validate_endpoint_url(&self.url).into_result()?;
        validate_expected_status(expected_status).into_result()?;

        Ok(Endpoint {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            expected_status,
            created_at: now_millis(),
        })
    }
}

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::pagination::PageMeta;
use crate::application::query::FirstValues;

/// Success envelope shared by every API endpoint.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
    pub message: String,
}

impl<T> ApiEnvelope<T> {
    pub fn data(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            message: message.into(),
        }
    }

    pub fn page(data: T, pagination: PageMeta, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: Some(pagination),
            message: message.into(),
        }
    }
}

impl ApiEnvelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            pagination: None,
            message: message.into(),
        }
    }
}

/// Projection selector accepted next to the listing and detail parameters.
#[derive(Debug, Default)]
pub struct ViewQuery {
    pub view: Option<String>,
    pub status: Option<String>,
}

impl<'de> Deserialize<'de> for ViewQuery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut pairs = deserializer.deserialize_map(FirstValues)?;
        Ok(Self {
            view: pairs.remove("view"),
            status: pairs.remove("status"),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusChangeRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub success: bool,
    pub message: String,
    pub version: &'static str,
    pub environment: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub database: String,
    pub timestamp: String,
}

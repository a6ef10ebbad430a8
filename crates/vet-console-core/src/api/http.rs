//! HTTP adapter over a blocking reqwest client.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::Value;

use super::{ApiError, ApiResult, Backend};
use crate::config::ConsoleConfig;
use crate::models::ResourceKind;

/// REST backend reached over HTTP.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ConsoleConfig) -> ApiResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{resource}` or `{base}/{resource}/{action}`.
    pub fn url(&self, resource: ResourceKind, action: Option<&str>) -> String {
        match action {
            Some(action) => format!("{}/{}/{}", self.base_url, resource.path(), action),
            None => format!("{}/{}", self.base_url, resource.path()),
        }
    }

    fn send(&self, request: RequestBuilder, what: &str) -> ApiResult<Response> {
        debug!("{}", what);
        let response = request.send().map_err(|e| {
            warn!("{} failed: {}", what, e);
            ApiError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!("{} returned {}", what, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl Backend for HttpBackend {
    fn fetch_all(&self, resource: ResourceKind) -> ApiResult<Vec<Value>> {
        let url = self.url(resource, None);
        let response = self.send(self.client.get(&url), &format!("GET {}", url))?;
        match response.json::<Value>()? {
            Value::Array(rows) => Ok(rows),
            other => Err(ApiError::InvalidResponse(format!(
                "expected a list of {}, got {}",
                resource.plural(),
                json_type(&other)
            ))),
        }
    }

    fn create(&self, resource: ResourceKind, body: &Value) -> ApiResult<()> {
        let url = self.url(resource, Some(resource.create_action()));
        self.send(self.client.post(&url).json(body), &format!("POST {}", url))?;
        Ok(())
    }

    fn update(&self, resource: ResourceKind, document_id: &str, body: &Value) -> ApiResult<()> {
        let url = self.url(resource, Some("update"));
        let request = self
            .client
            .put(&url)
            .query(&[("documentId", document_id)])
            .json(body);
        self.send(request, &format!("PUT {}?documentId={}", url, document_id))?;
        Ok(())
    }

    fn delete(&self, resource: ResourceKind, document_id: &str) -> ApiResult<()> {
        let url = self.url(resource, Some("delete"));
        let request = self.client.delete(&url).query(&[("documentId", document_id)]);
        self.send(request, &format!("DELETE {}?documentId={}", url, document_id))?;
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

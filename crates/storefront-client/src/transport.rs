//! Pluggable request transport.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part as ReqwestPart};
use storefront_core::CatalogError;
use tracing::debug;

use crate::request::{ApiRequest, MultipartForm, RequestBody};
use crate::response::ApiResponse;

/// Sends a built request and reads the whole response.
///
/// Any failure to obtain a response is a [`CatalogError::Transport`]; HTTP
/// error statuses are not failures at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, CatalogError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn into_reqwest_form(form: MultipartForm) -> Result<Form, CatalogError> {
    form.into_parts().into_iter().try_fold(Form::new(), |acc, part| {
        let mut rpart = ReqwestPart::bytes(part.data)
            .mime_str(&part.content_type)
            .map_err(|e| CatalogError::Encode(e.to_string()))?;
        if let Some(file_name) = part.file_name {
            rpart = rpart.file_name(file_name);
        }
        Ok(acc.part(part.name, rpart))
    })
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, CatalogError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.client.request(request.method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let RequestBody::Multipart(form) = request.body {
            builder = builder.multipart(into_reqwest_form(form)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CatalogError::Transport(Box::new(e)))?;

        let status = response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Transport(Box::new(e)))?
            .to_vec();

        let response = ApiResponse::new(status, headers, body);
        debug!(
            status = status.as_u16(),
            bytes = response.body.len(),
            content_type = response.content_type().unwrap_or("-"),
            "response received"
        );
        Ok(response)
    }
}

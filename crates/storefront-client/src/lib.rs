//! HTTP access layer for the storefront catalog backend.
//!
//! [`CatalogClient`] implements [`CatalogApi`] over a pluggable
//! [`Transport`]. The default transport is `reqwest`; tests swap in a
//! recording transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_client::{CatalogClient, ClientConfig};
//! use storefront_core::prelude::*;
//!
//! let client = CatalogClient::new(ClientConfig::from_env());
//!
//! let query = SearchQuery::new("설날에 드릴 과일").with_keywords(["제주"]);
//! let products = client.search_products(&query).await?;
//!
//! let product = client.get_product(&products[0].id).await?;
//! println!("{} {}", product.name, product.price);
//! ```

mod config;
mod envelope;
mod request;
mod response;
mod transport;

pub use config::{ClientConfig, BASE_URL_ENV_VARS, DEFAULT_BASE_URL};
pub use envelope::MessageField;
pub use request::{ApiRequest, Method, MultipartForm, Part, RequestBody};
pub use response::ApiResponse;
pub use transport::{ReqwestTransport, Transport};

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use storefront_core::catalog::{
    AnalyzeResult, ImageFile, Product, ProductDraft, ProductRegistration, ProductSummary,
    RegisterResult,
};
use storefront_core::search::SearchQuery;
use storefront_core::{CatalogApi, CatalogError, CatalogResult, ProductId};
use tracing::warn;

use envelope::{decode, http_error, require_data, success_body};

const NETWORK_FALLBACK: &str = "네트워크 응답에 문제가 있습니다.";
const ANALYZE_EMPTY: &str = "AI가 설명을 생성하지 못했습니다.";
const REGISTER_FALLBACK: &str = "상품 등록에 실패했습니다.";
const SEARCH_SHAPE: &str = "검색 결과 형식이 올바르지 않습니다.";
const PRODUCT_FALLBACK: &str = "상품 정보를 불러오는데 실패했습니다.";
const PRODUCT_EMPTY: &str = "상품 상세 정보를 가져오지 못했습니다.";

/// Client for the catalog backend.
pub struct CatalogClient<T: Transport = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl CatalogClient<ReqwestTransport> {
    /// Create a client using `reqwest`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> CatalogClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Join a path onto the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn parse_url(&self, path: &str) -> Result<Url, CatalogError> {
        let raw = self.endpoint(path);
        Url::parse(&raw).map_err(|e| CatalogError::Encode(format!("invalid URL {}: {}", raw, e)))
    }

    /// Build the search request without sending it.
    pub fn search_request(&self, query: &SearchQuery) -> Result<ApiRequest, CatalogError> {
        let mut url = self.parse_url("/products/search")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.query);
            if let Some(keywords) = query.keywords_param(&self.config.keyword_separator) {
                pairs.append_pair("keywords", &keywords);
            }
        }
        Ok(ApiRequest::get(url.as_str()).accept("application/json"))
    }

    /// Build the product lookup request without sending it.
    pub fn product_request(&self, id: &ProductId) -> Result<ApiRequest, CatalogError> {
        let mut url = self.parse_url("/products")?;
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments.push(id.as_str());
            }
            Err(()) => {
                return Err(CatalogError::Encode(format!(
                    "base URL cannot take a path: {}",
                    self.config.base_url
                )))
            }
        }
        Ok(ApiRequest::get(url.as_str()).accept("application/json"))
    }

    /// Build a `payload` + `images` multipart POST.
    fn multipart_request<P: serde::Serialize>(
        &self,
        path: &str,
        payload: &P,
        images: &[ImageFile],
    ) -> Result<ApiRequest, CatalogError> {
        let form = MultipartForm::new()
            .json_part("payload", payload)?
            .file_parts("images", images);
        let url = self.parse_url(path)?;
        Ok(ApiRequest::post(url.as_str())
            .accept("application/json")
            .multipart(form))
    }

    /// Send a request and return the parsed body of a 2xx response.
    async fn exchange(
        &self,
        request: ApiRequest,
        field: MessageField,
        fallback: &str,
    ) -> Result<Value, CatalogError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(http_error(&response, field, fallback));
        }
        success_body(&response)
    }
}

#[async_trait]
impl<T: Transport> CatalogApi for CatalogClient<T> {
    async fn analyze_product(
        &self,
        draft: &ProductDraft,
        images: &[ImageFile],
    ) -> CatalogResult<AnalyzeResult> {
        let result: CatalogResult<AnalyzeResult> = async {
            let request = self.multipart_request("/products/analyze", draft, images)?;
            let body = self
                .exchange(request, MessageField::Message, NETWORK_FALLBACK)
                .await?;
            let data = require_data(
                &body,
                |d| {
                    d.get("detailed_description")
                        .and_then(Value::as_str)
                        .map_or(false, |s| !s.is_empty())
                },
                MessageField::Message,
                ANALYZE_EMPTY,
            )?;
            decode(data)
        }
        .await;

        if let Err(e) = &result {
            warn!(error = %e, "AI 상세설명 요청 API 호출 중 오류 발생");
        }
        result
    }

    async fn register_product(
        &self,
        registration: &ProductRegistration,
        images: &[ImageFile],
    ) -> CatalogResult<RegisterResult> {
        let result: CatalogResult<RegisterResult> = async {
            let request = self.multipart_request("/products", registration, images)?;
            let body = self
                .exchange(request, MessageField::Message, REGISTER_FALLBACK)
                .await?;
            let data = require_data(
                &body,
                |d| d.get("product_id").map_or(false, |v| !v.is_null()),
                MessageField::Message,
                REGISTER_FALLBACK,
            )?;
            decode(data)
        }
        .await;

        if let Err(e) = &result {
            warn!(error = %e, "상품 등록 API 호출 중 오류 발생");
        }
        result
    }

    async fn search_products(&self, query: &SearchQuery) -> CatalogResult<Vec<ProductSummary>> {
        let result: CatalogResult<Vec<ProductSummary>> = async {
            let request = self.search_request(query)?;
            let body = self
                .exchange(request, MessageField::Message, NETWORK_FALLBACK)
                .await?;
            let data = require_data(
                &body,
                |d| d.get("products").map_or(false, Value::is_array),
                MessageField::Message,
                SEARCH_SHAPE,
            )?;
            decode(&data["products"])
        }
        .await;

        if let Err(e) = &result {
            warn!(query = %query.query, error = %e, "상품 검색 API 호출 중 오류 발생");
        }
        result
    }

    async fn get_product(&self, id: &ProductId) -> CatalogResult<Product> {
        let result: CatalogResult<Product> = async {
            let request = self.product_request(id)?;
            let body = self
                .exchange(request, MessageField::ErrorMessage, PRODUCT_FALLBACK)
                .await?;
            let data = require_data(
                &body,
                Value::is_object,
                MessageField::ErrorMessage,
                PRODUCT_EMPTY,
            )?;
            decode(data)
        }
        .await;

        if let Err(e) = &result {
            warn!(product_id = %id, error = %e, "상품 상세 정보 API 호출 중 오류 발생");
        }
        result
    }
}

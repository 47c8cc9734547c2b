//! CatalogClient behavior against a scripted transport.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use http::StatusCode;
use serde_json::{json, Value};
use storefront_client::{ApiRequest, ApiResponse, CatalogClient, ClientConfig, Method, Transport};
use storefront_core::catalog::{ImageFile, ProductDraft, ProductRegistration};
use storefront_core::search::SearchQuery;
use storefront_core::{AnalyzeId, CatalogApi, CatalogError, ProductId, Won};

/// Transport that records requests and replays scripted responses.
#[derive(Default)]
struct RecordingTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, CatalogError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    fn reply(self, status: u16, body: &str) -> Self {
        let response = ApiResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HashMap::new(),
            body.as_bytes().to_vec(),
        );
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    fn reply_json(self, status: u16, body: Value) -> Self {
        self.reply(status, &body.to_string())
    }

    fn fail(self, err: CatalogError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    fn last_request(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, CatalogError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left")
    }
}

fn client(transport: RecordingTransport) -> CatalogClient<RecordingTransport> {
    CatalogClient::with_transport(ClientConfig::new("http://backend.test/api"), transport)
}

fn images() -> Vec<ImageFile> {
    vec![
        ImageFile::new("front.png", "image/png", vec![1, 2, 3]),
        ImageFile::new("back.jpg", "image/jpeg", vec![4, 5]),
    ]
}

fn payload_of(request: &ApiRequest) -> Value {
    let form = request.form().expect("multipart body");
    let part = form.parts_named("payload").next().expect("payload part");
    assert_eq!(part.content_type, "application/json");
    serde_json::from_slice(&part.data).unwrap()
}

fn registration(analyze_id: Option<AnalyzeId>) -> ProductRegistration {
    ProductRegistration {
        name: "제주 한라봉".to_string(),
        simple_description: "새콤달콤".to_string(),
        keywords: vec!["제주".to_string()],
        detailed_description: "<p>맛있는 한라봉</p>".to_string(),
        category: "과일".to_string(),
        price: Won::new(25000),
        analyze_id,
    }
}

// === Search ===

#[tokio::test]
async fn test_search_builds_query_with_joined_keywords() {
    let transport = RecordingTransport::default()
        .reply_json(200, json!({"data": {"products": []}}));
    let client = client(transport);

    let query = SearchQuery::new("한라봉").with_keywords(["a", "b"]);
    let products = client.search_products(&query).await.unwrap();
    assert!(products.is_empty());

    let request = client.transport().last_request();
    assert_eq!(request.method, Method::GET);
    assert!(request.url.starts_with("http://backend.test/api/products/search?"));
    assert_eq!(
        request.query_string(),
        Some("query=%ED%95%9C%EB%9D%BC%EB%B4%89&keywords=ab")
    );
}

#[tokio::test]
async fn test_search_omits_empty_keywords() {
    let transport = RecordingTransport::default()
        .reply_json(200, json!({"data": {"products": []}}));
    let client = client(transport);

    client
        .search_products(&SearchQuery::new("apple"))
        .await
        .unwrap();
    assert_eq!(client.transport().last_request().query_string(), Some("query=apple"));
}

#[tokio::test]
async fn test_search_uses_configured_separator() {
    let transport = RecordingTransport::default()
        .reply_json(200, json!({"data": {"products": []}}));
    let client = CatalogClient::with_transport(
        ClientConfig::new("http://backend.test/api").with_keyword_separator(","),
        transport,
    );

    let query = SearchQuery::new("apple").with_keywords(["a", "b"]);
    client.search_products(&query).await.unwrap();
    assert_eq!(
        client.transport().last_request().query_string(),
        Some("query=apple&keywords=a%2Cb")
    );
}

#[tokio::test]
async fn test_search_decodes_products() {
    let transport = RecordingTransport::default().reply_json(
        200,
        json!({"data": {"products": [
            {"id": 7, "name": "한라봉", "description": "새콤", "price": 25000, "tag": "과일",
             "main_image_url": "http://img/7.jpg"},
            {"id": "abc", "name": "귤", "price": 9900}
        ]}}),
    );
    let client = client(transport);

    let products = client
        .search_products(&SearchQuery::new("과일"))
        .await
        .unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, ProductId::new("7"));
    assert_eq!(products[0].price, Won::new(25000));
    assert_eq!(products[0].tag.as_deref(), Some("과일"));
    assert_eq!(products[1].id.as_str(), "abc");
    assert!(products[1].main_image_url.is_none());
}

#[tokio::test]
async fn test_search_requires_products_array() {
    let transport = RecordingTransport::default()
        .reply_json(200, json!({"data": {}}))
        .reply_json(200, json!({"data": {"products": "none"}, "message": "검색 실패"}));
    let client = client(transport);

    let err = client
        .search_products(&SearchQuery::new("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::UnexpectedShape(_)));

    let err = client
        .search_products(&SearchQuery::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "검색 실패");
}

#[tokio::test]
async fn test_search_http_error_message() {
    let transport = RecordingTransport::default()
        .reply_json(400, json!({"message": "bad input"}))
        .reply(500, "<html>Internal Server Error</html>");
    let client = client(transport);

    let err = client
        .search_products(&SearchQuery::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "bad input");

    let err = client
        .search_products(&SearchQuery::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "네트워크 응답에 문제가 있습니다.");
}

#[tokio::test]
async fn test_transport_error_is_propagated() {
    let transport = RecordingTransport::default().fail(CatalogError::Transport(
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused").into(),
    ));
    let client = client(transport);

    let err = client
        .search_products(&SearchQuery::new("x"))
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

// === Product detail ===

#[tokio::test]
async fn test_get_product_encodes_id_segment() {
    let transport = RecordingTransport::default().reply_json(
        200,
        json!({"data": {
            "id": 42,
            "name": "제주 한라봉",
            "price": 25000,
            "options": [{"id": 1, "name": "2kg", "price": 25000}],
            "images": [{"url": "http://img/a.jpg", "is_main": true}]
        }}),
    );
    let client = client(transport);

    let product = client.get_product(&ProductId::new("a b/c")).await.unwrap();
    assert_eq!(product.name, "제주 한라봉");
    assert_eq!(product.options.len(), 1);
    assert_eq!(
        client.transport().last_request().url,
        "http://backend.test/api/products/a%20b%2Fc"
    );
}

#[tokio::test]
async fn test_get_product_reads_nested_error_message() {
    let transport = RecordingTransport::default()
        .reply_json(404, json!({"error": {"message": "존재하지 않는 상품입니다."}}))
        .reply_json(404, json!({"message": "top-level is ignored"}));
    let client = client(transport);

    let err = client.get_product(&ProductId::new("1")).await.unwrap_err();
    assert_eq!(err.to_string(), "존재하지 않는 상품입니다.");

    let err = client.get_product(&ProductId::new("1")).await.unwrap_err();
    assert_eq!(err.to_string(), "상품 정보를 불러오는데 실패했습니다.");
}

#[tokio::test]
async fn test_get_product_requires_data_object() {
    let transport = RecordingTransport::default()
        .reply_json(200, json!({"data": null}))
        .reply_json(200, json!({"data": [], "error": {"message": "no data"}}));
    let client = client(transport);

    let err = client.get_product(&ProductId::new("1")).await.unwrap_err();
    assert_eq!(err.to_string(), "상품 상세 정보를 가져오지 못했습니다.");

    let err = client.get_product(&ProductId::new("1")).await.unwrap_err();
    assert_eq!(err.to_string(), "no data");
}

// === Analyze ===

#[tokio::test]
async fn test_analyze_sends_payload_and_images() {
    let transport = RecordingTransport::default().reply_json(
        200,
        json!({"data": {
            "detailed_description": "<p>설명</p>",
            "analyze_id": 314,
            "main_image_url": "http://img/main.jpg"
        }}),
    );
    let client = client(transport);

    let draft = ProductDraft {
        name: "제주 한라봉".to_string(),
        simple_description: "새콤달콤".to_string(),
        keywords: vec!["제주".to_string(), "과일".to_string()],
        category: "과일".to_string(),
        price: None,
    };
    let result = client.analyze_product(&draft, &images()).await.unwrap();
    assert_eq!(result.detailed_description, "<p>설명</p>");
    assert_eq!(result.analyze_id, Some(AnalyzeId::from_number(314)));
    assert_eq!(result.main_image_url.as_deref(), Some("http://img/main.jpg"));

    let request = client.transport().last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, "http://backend.test/api/products/analyze");

    let payload = payload_of(&request);
    assert_eq!(payload["name"], "제주 한라봉");
    assert_eq!(payload["keywords"], json!(["제주", "과일"]));
    assert!(payload.get("price").is_none());

    let form = request.form().unwrap();
    let files: Vec<_> = form
        .parts_named("images")
        .map(|p| (p.file_name.clone().unwrap(), p.content_type.clone()))
        .collect();
    assert_eq!(
        files,
        vec![
            ("front.png".to_string(), "image/png".to_string()),
            ("back.jpg".to_string(), "image/jpeg".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_analyze_without_description_fails() {
    let transport = RecordingTransport::default()
        .reply_json(200, json!({"data": {"analyze_id": 1}}))
        .reply_json(500, json!({"message": "AI 서버 오류"}));
    let client = client(transport);

    let err = client
        .analyze_product(&ProductDraft::default(), &[])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "AI가 설명을 생성하지 못했습니다.");

    let err = client
        .analyze_product(&ProductDraft::default(), &[])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "AI 서버 오류");
}

#[tokio::test]
async fn test_analyze_rejects_empty_description() {
    let transport = RecordingTransport::default().reply_json(
        200,
        json!({"data": {"detailed_description": "", "analyze_id": 1}}),
    );
    let client = client(transport);

    let err = client
        .analyze_product(&ProductDraft::default(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::UnexpectedShape(_)));
    assert_eq!(err.to_string(), "AI가 설명을 생성하지 못했습니다.");
}

#[tokio::test]
async fn test_malformed_base_url_fails_before_sending() {
    let client = CatalogClient::with_transport(
        ClientConfig::new("backend without scheme"),
        RecordingTransport::default(),
    );

    let err = client
        .analyze_product(&ProductDraft::default(), &images())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Encode(_)));

    let err = client
        .register_product(&registration(None), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Encode(_)));

    let err = client
        .search_products(&SearchQuery::new("한라봉"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Encode(_)));

    assert!(client.transport().requests.lock().unwrap().is_empty());
}

// === Register ===

#[tokio::test]
async fn test_register_forwards_analyze_id() {
    let transport = RecordingTransport::default()
        .reply_json(201, json!({"data": {"product_id": 99}}));
    let client = client(transport);

    let result = client
        .register_product(&registration(Some(AnalyzeId::from_number(314))), &[])
        .await
        .unwrap();
    assert_eq!(result.product_path(), "/product/99");

    let request = client.transport().last_request();
    assert_eq!(request.url, "http://backend.test/api/products");
    let payload = payload_of(&request);
    assert_eq!(payload["analyze_id"], json!(314));
    assert_eq!(payload["price"], json!(25000));
    assert_eq!(request.form().unwrap().parts_named("images").count(), 0);
}

#[tokio::test]
async fn test_register_without_analysis_sends_null_id_and_images() {
    let transport = RecordingTransport::default()
        .reply_json(200, json!({"data": {"product_id": "p-1"}}));
    let client = client(transport);

    client
        .register_product(&registration(None), &images())
        .await
        .unwrap();

    let request = client.transport().last_request();
    assert_eq!(payload_of(&request)["analyze_id"], Value::Null);
    assert_eq!(request.form().unwrap().parts_named("images").count(), 2);
}

#[tokio::test]
async fn test_register_failure_messages() {
    let transport = RecordingTransport::default()
        .reply_json(409, json!({"message": "이미 등록된 상품입니다."}))
        .reply(503, "")
        .reply_json(200, json!({"data": {}}));
    let client = client(transport);

    let err = client
        .register_product(&registration(None), &[])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "이미 등록된 상품입니다.");

    let err = client
        .register_product(&registration(None), &[])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "상품 등록에 실패했습니다.");

    let err = client
        .register_product(&registration(None), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::UnexpectedShape(_)));
}

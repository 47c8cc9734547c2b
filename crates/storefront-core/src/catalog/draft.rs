//! Payloads for the analyze and register operations.

use crate::ids::{AnalyzeId, ProductId};
use crate::money::Won;
use serde::{Deserialize, Serialize};

/// Product draft sent for AI analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub simple_description: String,
    pub keywords: Vec<String>,
    pub category: String,
    /// Omitted from the payload when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Won>,
}

/// Complete product record sent for registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRegistration {
    pub name: String,
    pub simple_description: String,
    pub keywords: Vec<String>,
    pub detailed_description: String,
    pub category: String,
    pub price: Won,
    /// Forwarded verbatim from the analysis that produced the description.
    /// Serialized as `null` when no analysis ran.
    pub analyze_id: Option<AnalyzeId>,
}

/// Output of an AI analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResult {
    /// Generated description as an HTML fragment.
    pub detailed_description: String,
    #[serde(default)]
    pub analyze_id: Option<AnalyzeId>,
    #[serde(default)]
    pub main_image_url: Option<String>,
}

/// Output of a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterResult {
    pub product_id: ProductId,
}

impl RegisterResult {
    /// Route of the newly registered product's detail page.
    pub fn product_path(&self) -> String {
        format!("/product/{}", self.product_id)
    }
}

/// An image file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Create a file from its parts.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Check if the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Size of the file in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_omits_unknown_price() {
        let draft = ProductDraft {
            name: "한라봉".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("price").is_none());
        assert_eq!(value["keywords"], json!([]));
    }

    #[test]
    fn test_registration_sends_null_analyze_id() {
        let reg = ProductRegistration {
            name: "한라봉".to_string(),
            simple_description: String::new(),
            keywords: vec!["제주".to_string()],
            detailed_description: String::new(),
            category: "과일".to_string(),
            price: Won::new(25000),
            analyze_id: None,
        };
        let value = serde_json::to_value(&reg).unwrap();
        assert_eq!(value["analyze_id"], serde_json::Value::Null);
        assert_eq!(value["price"], json!(25000));
    }

    #[test]
    fn test_analyze_result_optional_fields() {
        let result: AnalyzeResult =
            serde_json::from_value(json!({"detailed_description": "<p>맛있다</p>"})).unwrap();
        assert!(result.analyze_id.is_none());
        assert!(result.main_image_url.is_none());
    }

    #[test]
    fn test_product_path() {
        let result = RegisterResult {
            product_id: ProductId::from_number(42),
        };
        assert_eq!(result.product_path(), "/product/42");
    }

    #[test]
    fn test_image_file_kind() {
        assert!(ImageFile::new("a.png", "image/png", vec![1]).is_image());
        assert!(!ImageFile::new("a.txt", "text/plain", vec![1]).is_image());
    }
}

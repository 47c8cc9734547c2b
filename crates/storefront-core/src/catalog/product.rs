//! Product records as served by the catalog backend.

use crate::ids::{OptionId, ProductId};
use crate::money::Won;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Backend-issued identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Product name.
    pub name: String,
    /// Category shown as the product tag.
    #[serde(default, alias = "tag")]
    pub category: Option<String>,
    /// One-line description for listings.
    #[serde(
        default,
        alias = "short_description",
        alias = "shortDescription"
    )]
    pub simple_description: Option<String>,
    /// Full description as an HTML fragment.
    #[serde(default)]
    pub detailed_description: Option<String>,
    /// Base price, used when the product has no options.
    #[serde(default)]
    pub price: Won,
    /// Search keywords in display order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Purchasable options.
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// Product images.
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Seller blurb.
    #[serde(default, alias = "sellerInfo")]
    pub seller_info: Option<String>,
    /// Delivery blurb.
    #[serde(default, alias = "deliveryInfo")]
    pub delivery_info: Option<String>,
}

impl Product {
    /// The image to show first: the one flagged `is_main`, else the first.
    pub fn main_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|img| img.is_main)
            .or_else(|| self.images.first())
    }

    /// Look up an option by id.
    pub fn option(&self, id: &OptionId) -> Option<&ProductOption> {
        self.options.iter().find(|opt| &opt.id == id)
    }

    /// Check if the product is sold through options.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// A purchasable option of a product (e.g., "2kg box").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductOption {
    pub id: OptionId,
    pub name: String,
    pub price: Won,
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub is_main: bool,
}

/// A product as listed in search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    #[serde(default, alias = "simple_description")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Won,
    #[serde(default, alias = "category")]
    pub tag: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub main_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, is_main: bool) -> ProductImage {
        ProductImage {
            url: url.to_string(),
            is_main,
        }
    }

    fn product_with_images(images: Vec<ProductImage>) -> Product {
        Product {
            id: Some(ProductId::new("1")),
            name: "제주 한라봉".to_string(),
            category: None,
            simple_description: None,
            detailed_description: None,
            price: Won::new(25000),
            keywords: Vec::new(),
            options: Vec::new(),
            images,
            seller_info: None,
            delivery_info: None,
        }
    }

    #[test]
    fn test_main_image_prefers_flagged() {
        let p = product_with_images(vec![image("a.jpg", false), image("b.jpg", true)]);
        assert_eq!(p.main_image().map(|i| i.url.as_str()), Some("b.jpg"));
    }

    #[test]
    fn test_main_image_falls_back_to_first() {
        let p = product_with_images(vec![image("a.jpg", false), image("b.jpg", false)]);
        assert_eq!(p.main_image().map(|i| i.url.as_str()), Some("a.jpg"));
        assert!(product_with_images(vec![]).main_image().is_none());
    }

    #[test]
    fn test_product_deserializes_sparse_record() {
        let json = r#"{
            "id": 12,
            "name": "고당도 샤인머스켓",
            "category": "과일",
            "shortDescription": "망고향",
            "price": 38000,
            "options": [{"id": 1, "name": "1kg", "price": 38000}],
            "images": [{"url": "https://cdn/x.jpg", "is_main": true}]
        }"#;

        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, Some(ProductId::new("12")));
        assert_eq!(p.simple_description.as_deref(), Some("망고향"));
        assert_eq!(p.options[0].price, Won::new(38000));
        assert!(p.keywords.is_empty());
        assert!(p.has_options());
        assert!(p.option(&OptionId::new("1")).is_some());
    }

    #[test]
    fn test_product_rejects_negative_price() {
        let json = r#"{"name": "x", "price": -5}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_summary_accepts_category_alias() {
        let json = r#"{"id": "3", "name": "딸기", "price": 18000, "category": "제철과일"}"#;
        let s: ProductSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.tag.as_deref(), Some("제철과일"));
        assert!(s.main_image_url.is_none());
    }
}

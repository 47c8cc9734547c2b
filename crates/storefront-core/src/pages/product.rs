//! Product detail page.

use tracing::warn;

use crate::api::CatalogApi;
use crate::catalog::{Product, ProductImage, ProductOption};
use crate::error::StorefrontError;
use crate::ids::{OptionId, ProductId};
use crate::money::Won;
use crate::state::FetchState;

/// Message shown when the product cannot be loaded, whatever the cause.
pub const LOAD_FAILED_MESSAGE: &str = "상품 정보를 가져오는데 실패했습니다.";

/// State of the product detail page.
#[derive(Debug)]
pub struct ProductPage {
    product: FetchState<Product>,
    selected_option: Option<OptionId>,
    selected_image: Option<usize>,
    quantity: u32,
}

impl Default for ProductPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductPage {
    pub fn new() -> Self {
        Self {
            product: FetchState::Idle,
            selected_option: None,
            selected_image: None,
            quantity: 1,
        }
    }

    /// Fetch the product and reset selections to their defaults.
    pub async fn load<A>(&mut self, api: &A, id: &ProductId) -> Result<(), StorefrontError>
    where
        A: CatalogApi + ?Sized,
    {
        self.product.start();
        self.selected_option = None;
        self.selected_image = None;
        self.quantity = 1;

        match api.get_product(id).await {
            Ok(product) => {
                self.selected_option = product.options.first().map(|opt| opt.id.clone());
                self.product = FetchState::Loaded(product);
                Ok(())
            }
            Err(e) => {
                warn!(product_id = %id, error = %e, "failed to load product");
                self.product = FetchState::Failed(LOAD_FAILED_MESSAGE.to_string());
                Err(e.into())
            }
        }
    }

    pub fn state(&self) -> &FetchState<Product> {
        &self.product
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.value()
    }

    /// The image in the main slot: the user's pick, else the product's main image.
    pub fn main_image(&self) -> Option<&ProductImage> {
        let product = self.product()?;
        self.selected_image
            .and_then(|i| product.images.get(i))
            .or_else(|| product.main_image())
    }

    /// Show a thumbnail in the main slot.
    pub fn select_image(&mut self, index: usize) -> Result<(), StorefrontError> {
        let len = self.product().map(|p| p.images.len()).unwrap_or(0);
        if index >= len {
            return Err(StorefrontError::ImageIndexOutOfRange { index, len });
        }
        self.selected_image = Some(index);
        Ok(())
    }

    pub fn selected_option(&self) -> Option<&ProductOption> {
        let id = self.selected_option.as_ref()?;
        self.product()?.option(id)
    }

    pub fn select_option(&mut self, id: &OptionId) -> Result<(), StorefrontError> {
        match self.product().and_then(|p| p.option(id)) {
            Some(_) => {
                self.selected_option = Some(id.clone());
                Ok(())
            }
            None => Err(StorefrontError::OptionNotFound(id.to_string())),
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set the quantity, never below one.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.set_quantity(self.quantity.saturating_sub(1));
    }

    /// Price of one unit: the selected option's price, or the product price
    /// when the product has no options.
    pub fn unit_price(&self) -> Won {
        match self.product() {
            Some(p) if p.has_options() => self
                .selected_option()
                .map(|opt| opt.price)
                .unwrap_or_default(),
            Some(p) => p.price,
            None => Won::zero(),
        }
    }

    pub fn total_price(&self) -> Won {
        self.unit_price().times(self.quantity)
    }

    /// One-line purchase summary for the buy action.
    pub fn purchase_summary(&self) -> Option<String> {
        let product = self.product()?;
        let option = self
            .selected_option()
            .map(|opt| opt.name.as_str())
            .unwrap_or("없음");
        Some(format!(
            "{} (옵션: {}, 수량: {}개) 총 {} 구매",
            product.name,
            option,
            self.quantity,
            self.total_price()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeCatalog;
    use crate::error::CatalogError;

    fn option(id: &str, name: &str, price: u64) -> ProductOption {
        ProductOption {
            id: OptionId::new(id),
            name: name.to_string(),
            price: Won::new(price),
        }
    }

    fn product(options: Vec<ProductOption>) -> Product {
        Product {
            id: Some(ProductId::new("7")),
            name: "제주 한라봉".to_string(),
            category: Some("과일".to_string()),
            simple_description: None,
            detailed_description: Some("<p>달콤</p>".to_string()),
            price: Won::new(25000),
            keywords: vec!["제주".to_string()],
            options,
            images: vec![
                ProductImage { url: "a.jpg".into(), is_main: false },
                ProductImage { url: "b.jpg".into(), is_main: true },
            ],
            seller_info: None,
            delivery_info: None,
        }
    }

    async fn loaded(p: Product) -> ProductPage {
        let api = FakeCatalog::new();
        api.get.lock().unwrap().push_back(Ok(p));
        let mut page = ProductPage::new();
        page.load(&api, &ProductId::new("7")).await.unwrap();
        page
    }

    #[tokio::test]
    async fn test_load_selects_first_option() {
        let page = loaded(product(vec![option("1", "2kg", 19000), option("2", "5kg", 42000)])).await;
        assert_eq!(page.selected_option().map(|o| o.name.as_str()), Some("2kg"));
        assert_eq!(page.unit_price(), Won::new(19000));
        assert_eq!(page.main_image().map(|i| i.url.as_str()), Some("b.jpg"));
    }

    #[tokio::test]
    async fn test_total_follows_option_and_quantity() {
        let mut page = loaded(product(vec![option("1", "2kg", 19000), option("2", "5kg", 42000)])).await;
        page.select_option(&OptionId::new("2")).unwrap();
        page.increment();
        page.increment();
        assert_eq!(page.total_price(), Won::new(126000));
        assert_eq!(
            page.purchase_summary().unwrap(),
            "제주 한라봉 (옵션: 5kg, 수량: 3개) 총 126,000원 구매"
        );
    }

    #[tokio::test]
    async fn test_product_without_options_uses_base_price() {
        let mut page = loaded(product(vec![])).await;
        assert!(page.selected_option().is_none());
        page.set_quantity(2);
        assert_eq!(page.total_price(), Won::new(50000));
    }

    #[tokio::test]
    async fn test_quantity_never_below_one() {
        let mut page = loaded(product(vec![])).await;
        page.decrement();
        assert_eq!(page.quantity(), 1);
        page.set_quantity(0);
        assert_eq!(page.quantity(), 1);
    }

    #[tokio::test]
    async fn test_unknown_option_rejected() {
        let mut page = loaded(product(vec![option("1", "2kg", 19000)])).await;
        let err = page.select_option(&OptionId::new("9")).unwrap_err();
        assert!(matches!(err, StorefrontError::OptionNotFound(_)));
    }

    #[tokio::test]
    async fn test_select_image_overrides_main() {
        let mut page = loaded(product(vec![])).await;
        page.select_image(0).unwrap();
        assert_eq!(page.main_image().map(|i| i.url.as_str()), Some("a.jpg"));
        assert!(page.select_image(5).is_err());
    }

    #[tokio::test]
    async fn test_load_failure_shows_fixed_message() {
        let api = FakeCatalog::new();
        api.get.lock().unwrap().push_back(Err(CatalogError::Http {
            status: 404,
            message: "not found".to_string(),
        }));

        let mut page = ProductPage::new();
        let err = page.load(&api, &ProductId::new("404")).await.unwrap_err();
        assert_eq!(err.to_string(), "not found");
        assert_eq!(page.state().error(), Some(LOAD_FAILED_MESSAGE));
        assert_eq!(page.total_price(), Won::zero());
    }
}

//! Show a product.

use anyhow::Result;
use serde_json::json;
use storefront_core::pages::ProductPage;
use storefront_core::{OptionId, ProductId};

use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client();
    let mut page = ProductPage::new();

    let spinner = ctx.output.spinner("상품 정보를 불러오는 중...");
    let result = page.load(&client, &ProductId::new(args.id.as_str())).await;
    spinner.finish_and_clear();
    if let Err(e) = result {
        ctx.output.debug(&e.to_string());
        let message = page.state().error().unwrap_or_default().to_string();
        anyhow::bail!(message);
    }

    if let Some(option) = &args.option {
        page.select_option(&OptionId::new(option.as_str()))?;
    }
    page.set_quantity(args.quantity);

    let Some(product) = page.product() else {
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "selected_option": page.selected_option(),
            "quantity": page.quantity(),
            "unit_price": page.unit_price(),
            "total_price": page.total_price(),
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    if let Some(category) = &product.category {
        ctx.output.kv("카테고리", category);
    }
    if let Some(description) = &product.simple_description {
        ctx.output.kv("설명", description);
    }
    if !product.keywords.is_empty() {
        ctx.output.kv("키워드", &product.keywords.join(", "));
    }
    if let Some(image) = page.main_image() {
        ctx.output.kv("대표 이미지", &image.url);
    }

    if product.has_options() {
        ctx.output.info("옵션");
        let selected = page.selected_option().map(|opt| &opt.id);
        for option in &product.options {
            let marker = if Some(&option.id) == selected { "*" } else { " " };
            ctx.output.list_item(&format!(
                "{} [{}] {} {}",
                marker, option.id, option.name, option.price
            ));
        }
    } else {
        ctx.output.kv("가격", &product.price.to_string());
    }

    if let Some(seller) = &product.seller_info {
        ctx.output.kv("판매자 정보", seller);
    }
    if let Some(delivery) = &product.delivery_info {
        ctx.output.kv("배송 정보", delivery);
    }

    ctx.output.kv("수량", &format!("{}개", page.quantity()));
    ctx.output.kv("총 상품 금액", &page.total_price().to_string());
    if let Some(summary) = page.purchase_summary() {
        ctx.output.success(&summary);
    }

    Ok(())
}

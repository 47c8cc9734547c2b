//! Search the catalog.

use anyhow::{Context as _, Result};
use storefront_core::pages::{HomePage, SearchPage};
use storefront_core::ProductId;

use super::SearchArgs;
use crate::context::Context;
use crate::output::like_badge;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let mut page = search_page(&args)?;

    let client = ctx.client();
    let spinner = ctx.output.spinner("상품을 검색하는 중...");
    let result = page.run(&client).await;
    spinner.finish_and_clear();
    let count = result.context("Search failed")?;

    for id in &args.like {
        page.toggle_like(&ProductId::new(id.as_str()))?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&page.state().value());
        return Ok(());
    }

    ctx.output.header(&format!("'{}' 검색 결과", page.query()));
    if !page.keywords().is_empty() {
        ctx.output.kv("키워드", &page.keywords().joined(", "));
    }

    if count == 0 {
        ctx.output.info("검색 결과가 없습니다.");
        return Ok(());
    }

    let hits = page.state().value().map(Vec::as_slice).unwrap_or_default();
    let widths = [8, 28, 12, 10, 2];
    ctx.output.table_row(&["ID", "상품명", "가격", "태그", ""], &widths);
    for hit in hits {
        let product = &hit.product;
        let price = product.price.to_string();
        let badge = like_badge(hit.liked);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                product.name.as_str(),
                price.as_str(),
                product.tag.as_deref().unwrap_or("-"),
                badge.as_str(),
            ],
            &widths,
        );
    }
    ctx.output.success(&format!("{}개 상품", count));

    Ok(())
}

/// The results page a home-page search with these arguments lands on.
fn search_page(args: &SearchArgs) -> Result<SearchPage> {
    let mut home = HomePage::new();
    home.query = args.query.clone();
    for keyword in &args.keywords {
        home.keyword_input = keyword.clone();
        home.commit_keyword();
    }
    Ok(home.submit()?)
}

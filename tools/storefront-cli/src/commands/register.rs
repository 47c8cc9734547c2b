//! Register a product.

use anyhow::Result;
use dialoguer::Confirm;
use storefront_core::pages::RegisterPage;

use super::{fail_with_page_message, RegisterArgs};
use crate::context::Context;

/// Run the register command.
pub async fn run(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let mut page = RegisterPage::new();
    page.form = args.draft.into_form(ctx)?;
    if let Some(description) = args.detailed_description {
        page.form.detailed_description = description;
    }

    let client = ctx.client();
    let total_steps = if args.analyze { 3 } else { 2 };
    let mut step = 0;

    if args.analyze {
        step += 1;
        ctx.output.step(step, total_steps, "Generating detailed description");
        let spinner = ctx.output.spinner("AI가 상세 설명을 생성하는 중...");
        let result = page.generate_description(&client).await;
        spinner.finish_and_clear();
        fail_with_page_message(result, page.analysis())?;
    }

    step += 1;
    ctx.output.step(step, total_steps, "Validating product");
    let registration = page.form.registration()?;

    if args.dry_run {
        ctx.output.json(&registration);
        ctx.output.kv("images", &page.form.registration_images().len().to_string());
        ctx.output.success("Dry run completed");
        return Ok(());
    }

    ctx.output.kv("상품명", &registration.name);
    ctx.output.kv("카테고리", &registration.category);
    ctx.output.kv("가격", &registration.price.to_string());
    if !registration.keywords.is_empty() {
        ctx.output.kv("키워드", &registration.keywords.join(", "));
    }
    if let Some(id) = &registration.analyze_id {
        ctx.output.kv("analyze_id", id.as_str());
    }
    ctx.output.kv("이미지", &page.form.registration_images().len().to_string());

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("상품을 등록하시겠습니까?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Registration cancelled");
            return Ok(());
        }
    }

    step += 1;
    ctx.output.step(step, total_steps, "Registering product");
    let spinner = ctx.output.spinner("상품을 등록하는 중...");
    let result = page.submit(&client).await;
    spinner.finish_and_clear();
    let registered = fail_with_page_message(result, page.submission())?;

    if ctx.output.is_json() {
        ctx.output.json(&registered);
        return Ok(());
    }

    ctx.output.success("상품이 성공적으로 등록되었습니다!");
    ctx.output.kv("product_id", registered.product_id.as_str());
    ctx.output.kv("path", &registered.product_path());

    Ok(())
}

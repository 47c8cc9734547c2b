//! Generate a detailed description with AI.

use anyhow::Result;
use storefront_core::pages::RegisterPage;

use super::{fail_with_page_message, AnalyzeArgs};
use crate::context::Context;

/// Run the analyze command.
pub async fn run(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let mut page = RegisterPage::new();
    page.form = args.draft.into_form(ctx)?;

    let client = ctx.client();
    let spinner = ctx.output.spinner("AI가 상세 설명을 생성하는 중...");
    let result = page.generate_description(&client).await;
    spinner.finish_and_clear();

    fail_with_page_message(result, page.analysis())?;

    let Some(analysis) = page.analysis().value() else {
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(analysis);
        return Ok(());
    }

    ctx.output.header("AI 상세 설명");
    if let Some(id) = &analysis.analyze_id {
        ctx.output.kv("analyze_id", id.as_str());
    }
    if let Some(url) = &analysis.main_image_url {
        ctx.output.kv("대표 이미지", url);
    }
    println!();
    println!("{}", analysis.detailed_description);
    ctx.output.success("상세 설명이 생성되었습니다.");

    Ok(())
}

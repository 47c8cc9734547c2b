//! Product registration page.
//!
//! The registration flow has two backend calls. An optional analysis turns
//! the draft and its images into a detailed description plus an
//! `analyze_id`; the registration then carries that id so the backend can
//! tie the stored product to the analysis (and to the images it received).
//! Images selected after the analysis still go with the registration.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::api::CatalogApi;
use crate::catalog::{AnalyzeResult, ImageFile, ProductDraft, ProductRegistration, RegisterResult};
use crate::error::StorefrontError;
use crate::ids::AnalyzeId;
use crate::money::Won;
use crate::state::{FetchState, KeywordList, PendingImages};

const ANALYZE_INPUT_REQUIRED: &str =
    "AI가 설명을 생성하려면 상품명, 간단한 설명 중 하나를 입력해주세요.";
const REGISTER_INPUT_REQUIRED: &str = "상품명, 카테고리, 가격은 필수 입력 항목입니다.";
const INVALID_PRICE: &str = "가격은 0 이상의 정수로 입력해주세요.";

/// Form fields of the registration page.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub short_description: String,
    pub keywords: KeywordList,
    /// Keyword being typed, committed with [`commit_keyword`](Self::commit_keyword).
    pub keyword_input: String,
    pub detailed_description: String,
    pub category: String,
    /// Price as typed.
    pub price_input: String,
    pub images: PendingImages,
    analyze_id: Option<AnalyzeId>,
    main_image_url: Option<String>,
    /// Preview ids of the images the backend received with the analysis.
    analyzed_images: HashSet<u64>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the typed keyword. The input is cleared only when it was added.
    pub fn commit_keyword(&mut self) -> bool {
        let added = self.keywords.add(&self.keyword_input);
        if added {
            self.keyword_input.clear();
        }
        added
    }

    /// Add selected files to the pending images.
    pub fn add_images(
        &mut self,
        files: impl IntoIterator<Item = ImageFile>,
    ) -> Result<usize, StorefrontError> {
        self.images.add_files(files)
    }

    pub fn analyze_id(&self) -> Option<&AnalyzeId> {
        self.analyze_id.as_ref()
    }

    pub fn main_image_url(&self) -> Option<&str> {
        self.main_image_url.as_deref()
    }

    /// Build the draft for an AI analysis.
    ///
    /// Needs a name, a short description, or at least one image. The price
    /// is sent only when it parses to a positive amount.
    pub fn analyze_draft(&self) -> Result<ProductDraft, StorefrontError> {
        if is_blank(&self.name) && is_blank(&self.short_description) && self.images.is_empty() {
            return Err(StorefrontError::Validation(ANALYZE_INPUT_REQUIRED.to_string()));
        }

        Ok(ProductDraft {
            name: self.name.trim().to_string(),
            simple_description: self.short_description.trim().to_string(),
            keywords: self.keywords.to_vec(),
            category: self.category.trim().to_string(),
            price: Won::parse(&self.price_input).filter(|p| !p.is_zero()),
        })
    }

    /// Store the outcome of an analysis.
    pub fn apply_analysis(&mut self, result: &AnalyzeResult) {
        self.detailed_description = result.detailed_description.clone();
        self.analyze_id = result.analyze_id.clone();
        self.main_image_url = result.main_image_url.clone();
    }

    /// Build the registration record.
    ///
    /// Name, category and price are required; the analysis id, if any, is
    /// carried over unchanged.
    pub fn registration(&self) -> Result<ProductRegistration, StorefrontError> {
        if is_blank(&self.name) || is_blank(&self.category) || is_blank(&self.price_input) {
            return Err(StorefrontError::Validation(REGISTER_INPUT_REQUIRED.to_string()));
        }
        let price = Won::parse(&self.price_input)
            .ok_or_else(|| StorefrontError::Validation(INVALID_PRICE.to_string()))?;

        Ok(ProductRegistration {
            name: self.name.trim().to_string(),
            simple_description: self.short_description.trim().to_string(),
            keywords: self.keywords.to_vec(),
            detailed_description: self.detailed_description.clone(),
            category: self.category.trim().to_string(),
            price,
            analyze_id: self.analyze_id.clone(),
        })
    }

    /// Images to attach to the registration.
    ///
    /// After an analysis the backend already holds the analyzed images under
    /// the analysis id; only images selected since then are sent.
    pub fn registration_images(&self) -> Vec<ImageFile> {
        if self.analyze_id.is_none() {
            return self.images.files();
        }
        self.images
            .iter()
            .filter(|pending| !self.analyzed_images.contains(&pending.preview.id()))
            .map(|pending| pending.file.clone())
            .collect()
    }

    fn pending_image_ids(&self) -> HashSet<u64> {
        self.images.iter().map(|pending| pending.preview.id()).collect()
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// State of the registration page.
#[derive(Debug, Default)]
pub struct RegisterPage {
    pub form: RegistrationForm,
    analysis: FetchState<AnalyzeResult>,
    submission: FetchState<RegisterResult>,
}

impl RegisterPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analysis(&self) -> &FetchState<AnalyzeResult> {
        &self.analysis
    }

    pub fn submission(&self) -> &FetchState<RegisterResult> {
        &self.submission
    }

    /// Ask the backend for a detailed description and fill it into the form.
    pub async fn generate_description<A>(&mut self, api: &A) -> Result<(), StorefrontError>
    where
        A: CatalogApi + ?Sized,
    {
        let draft = self.form.analyze_draft()?;
        let images = self.form.images.files();
        let sent = self.form.pending_image_ids();

        self.analysis.start();
        debug!(name = %draft.name, images = images.len(), "requesting AI description");
        match api.analyze_product(&draft, &images).await {
            Ok(result) => {
                self.form.apply_analysis(&result);
                self.form.analyzed_images = sent;
                self.analysis = FetchState::Loaded(result);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "AI description request failed");
                self.analysis = FetchState::Failed(format!("상세 설명 생성에 실패했습니다: {}", e));
                Err(e.into())
            }
        }
    }

    /// Register the product. On success the result names the new product.
    pub async fn submit<A>(&mut self, api: &A) -> Result<RegisterResult, StorefrontError>
    where
        A: CatalogApi + ?Sized,
    {
        let registration = self.form.registration()?;
        let images = self.form.registration_images();

        self.submission.start();
        match api.register_product(&registration, &images).await {
            Ok(result) => {
                debug!(product_id = %result.product_id, "product registered");
                self.submission = FetchState::Loaded(result.clone());
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "product registration failed");
                self.submission =
                    FetchState::Failed(format!("상품 등록 중 오류가 발생했습니다: {}", e));
                Err(e.into())
            }
        }
    }
}

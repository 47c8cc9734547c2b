//! Search results page.

use tracing::warn;

use crate::api::CatalogApi;
use crate::error::StorefrontError;
use crate::ids::ProductId;
use crate::search::{SearchHit, SearchQuery};
use crate::state::{FetchState, KeywordList};

/// State of the search results page.
#[derive(Debug, Default)]
pub struct SearchPage {
    query: String,
    keywords: KeywordList,
    results: FetchState<Vec<SearchHit>>,
}

impl SearchPage {
    /// Create a page for a search sentence.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Seed the keyword list.
    pub fn with_keywords(mut self, keywords: KeywordList) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the sentence. Previous results are kept until the next run.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn keywords(&self) -> &KeywordList {
        &self.keywords
    }

    pub fn keywords_mut(&mut self) -> &mut KeywordList {
        &mut self.keywords
    }

    pub fn state(&self) -> &FetchState<Vec<SearchHit>> {
        &self.results
    }

    /// The search this page would issue.
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery::new(self.query.trim()).with_keywords(self.keywords.iter())
    }

    /// Run the search and replace the results.
    pub async fn run<A>(&mut self, api: &A) -> Result<usize, StorefrontError>
    where
        A: CatalogApi + ?Sized,
    {
        if self.query.trim().is_empty() {
            return Err(StorefrontError::Validation("검색어를 입력해주세요.".to_string()));
        }

        let query = self.to_query();
        self.results.start();
        match api.search_products(&query).await {
            Ok(products) => {
                let hits: Vec<SearchHit> = products.into_iter().map(SearchHit::new).collect();
                let count = hits.len();
                self.results = FetchState::Loaded(hits);
                Ok(count)
            }
            Err(e) => {
                warn!(query = %query.query, error = %e, "product search failed");
                self.results = FetchState::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Flip the like flag on a hit. Returns the new value.
    pub fn toggle_like(&mut self, id: &ProductId) -> Result<bool, StorefrontError> {
        self.results
            .value_mut()
            .and_then(|hits| hits.iter_mut().find(|hit| &hit.product.id == id))
            .map(SearchHit::toggle_like)
            .ok_or_else(|| StorefrontError::ProductNotInResults(id.to_string()))
    }

    /// Hits the user has liked, in result order.
    pub fn liked(&self) -> Vec<&SearchHit> {
        self.results
            .value()
            .map(|hits| hits.iter().filter(|hit| hit.liked).collect())
            .unwrap_or_default()
    }
}

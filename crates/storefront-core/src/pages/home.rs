//! Home page search entry.

use crate::error::StorefrontError;
use crate::pages::SearchPage;
use crate::search::SearchQuery;
use crate::state::KeywordList;

/// Search sentence and keywords typed on the home page.
#[derive(Debug, Default)]
pub struct HomePage {
    pub query: String,
    pub keywords: KeywordList,
    pub keyword_input: String,
}

impl HomePage {
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

    /// The search the page would submit.
    pub fn to_query(&self) -> Result<SearchQuery, StorefrontError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(StorefrontError::Validation("검색어를 입력해주세요.".to_string()));
        }
        Ok(SearchQuery::new(query).with_keywords(self.keywords.iter()))
    }

    /// Hand the search over to a results page.
    pub fn submit(&self) -> Result<SearchPage, StorefrontError> {
        let query = self.to_query()?;
        Ok(SearchPage::new(query.query).with_keywords(self.keywords.clone()))
    }
}

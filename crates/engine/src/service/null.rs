use async_trait::async_trait;
use lookup_types::{SearchError, Searcher};

use super::SearchService;

/// Service that never finds anything. Useful for disabled fields and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSearchService;

#[async_trait]
impl SearchService for NullSearchService {
    async fn fetch_recent(&self, _searcher: &Searcher) -> Result<String, SearchError> {
        Ok("[]".into())
    }

    async fn fetch_by_query(&self, _searcher: &Searcher) -> Result<String, SearchError> {
        Ok("[]".into())
    }

    async fn fetch_by_id(&self, _searcher: &Searcher, _id: &str) -> Result<String, SearchError> {
        Ok("[]".into())
    }
}

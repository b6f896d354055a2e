//! Search service boundary consumed by the lookup controller.
//!
//! Modules:
//! - `fixture`: in-memory service backed by a fixed record list
//! - `null`: service that always returns an empty result set

mod fixture;
mod null;

use async_trait::async_trait;
use lookup_types::{SearchError, Searcher};

pub use fixture::StaticSearchService;
pub use null::NullSearchService;

/// Remote search/fetch service.
///
/// Every call returns the candidate set as serialized JSON text; decoding is
/// the controller's responsibility so that transports stay payload-agnostic.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Candidate set shown while the field is idle or the query is empty.
    async fn fetch_recent(&self, searcher: &Searcher) -> Result<String, SearchError>;

    /// Candidates matching `searcher.search_term` within `searcher.object_name`.
    async fn fetch_by_query(&self, searcher: &Searcher) -> Result<String, SearchError>;

    /// Singleton candidate set for a specific identifier.
    async fn fetch_by_id(&self, searcher: &Searcher, id: &str) -> Result<String, SearchError>;
}

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lookup_types::{CandidateRecord, SearchError, Searcher, decode_candidates};
use tracing::debug;

use super::SearchService;

/// Number of records returned by [`StaticSearchService::fetch_recent`].
const RECENT_LIMIT: usize = 5;

/// In-memory search service over a fixed list of records.
///
/// Queries match case-insensitively against the searcher's display fields.
/// Used for offline runs of the terminal front end and as a test double.
#[derive(Clone, Debug, Default)]
pub struct StaticSearchService {
    records: Vec<CandidateRecord>,
}

impl StaticSearchService {
    pub fn new(records: Vec<CandidateRecord>) -> Self {
        Self { records }
    }

    /// Load records from a JSON file holding an array of record objects.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("read fixture {}", path.display()))?;
        let records = decode_candidates(&content).with_context(|| format!("parse fixture {}", path.display()))?;
        debug!(path = %path.display(), record_count = records.len(), "loaded fixture records");
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    fn encode(records: Vec<&CandidateRecord>) -> Result<String, SearchError> {
        serde_json::to_string(&records).map_err(|error| SearchError::Unavailable { message: error.to_string() })
    }
}

#[async_trait]
impl SearchService for StaticSearchService {
    async fn fetch_recent(&self, _searcher: &Searcher) -> Result<String, SearchError> {
        Self::encode(self.records.iter().take(RECENT_LIMIT).collect())
    }

    async fn fetch_by_query(&self, searcher: &Searcher) -> Result<String, SearchError> {
        let needle = searcher.search_term.to_lowercase();
        let matches = self
            .records
            .iter()
            .filter(|record| {
                searcher
                    .fields
                    .iter()
                    .any(|field| record.field_text(field).to_lowercase().contains(&needle))
            })
            .collect();
        Self::encode(matches)
    }

    async fn fetch_by_id(&self, _searcher: &Searcher, id: &str) -> Result<String, SearchError> {
        Self::encode(self.records.iter().filter(|record| record.id() == id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn service() -> StaticSearchService {
        let records = decode_candidates(
            r#"[
                {"Id":"001A","Name":"Acme","Industry":"Energy"},
                {"Id":"001B","Name":"Globex","Industry":"Acme Supplies"},
                {"Id":"001C","Name":"Initech","Industry":"Software"}
            ]"#,
        )
        .expect("records");
        StaticSearchService::new(records)
    }

    #[tokio::test]
    async fn query_matches_any_display_field() {
        let searcher = Searcher::new("acme", "Account", "Name", "Industry");
        let payload = service().fetch_by_query(&searcher).await.expect("query");
        let ids: Vec<String> = decode_candidates(&payload).expect("decode").iter().map(CandidateRecord::id).collect();
        assert_eq!(ids, vec!["001A", "001B"]);
    }

    #[tokio::test]
    async fn by_id_returns_singleton() {
        let searcher = Searcher::new("", "Account", "Name", "Industry");
        let payload = service().fetch_by_id(&searcher, "001C").await.expect("by id");
        let records = decode_candidates(&payload).expect("decode");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field_text("Name"), "Initech");
    }

    #[test]
    fn loads_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"[{{"Id":"x","Name":"From file"}}]"#).expect("write fixture");
        let service = StaticSearchService::from_json_file(file.path()).expect("load");
        assert_eq!(service.records().len(), 1);
    }
}

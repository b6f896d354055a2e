use serde::{Deserialize, Serialize};

/// Query parameter bundle sent to the search service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Searcher {
    /// Text typed by the user; empty for recent and by-id lookups.
    pub search_term: String,
    /// Target object the service searches within.
    pub object_name: String,
    /// Display fields to return: `[title, subtitle]`.
    pub fields: [String; 2],
}

impl Searcher {
    pub fn new(search_term: impl Into<String>, object_name: impl Into<String>, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            object_name: object_name.into(),
            fields: [title.into(), subtitle.into()],
        }
    }
}

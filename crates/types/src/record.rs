//! Candidate records returned by the search service.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

use crate::SearchError;

/// Field holding the unique identifier of every candidate record.
pub const ID_FIELD: &str = "Id";

/// One selectable entity returned by search.
///
/// Records are opaque key/value maps; only the `Id` field and the configured
/// title/subtitle fields are interpreted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRecord(JsonMap<String, Value>);

impl CandidateRecord {
    /// Unique identifier, coerced to a string. Missing ids yield an empty string.
    pub fn id(&self) -> String {
        self.field_text(ID_FIELD)
    }

    /// Display text for a field. Strings are returned as-is, numbers and
    /// booleans are formatted, anything else is empty.
    pub fn field_text(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }
}

/// Decode the serialized payload returned by the search service.
///
/// Accepts either a flat array of records or an array of arrays (responses
/// grouped per object type), flattening one level in the latter case.
pub fn decode_candidates(payload: &str) -> Result<Vec<CandidateRecord>, SearchError> {
    let value: Value = serde_json::from_str(payload).map_err(|error| SearchError::Decode {
        message: error.to_string(),
    })?;
    let Value::Array(entries) = value else {
        return Err(SearchError::Decode {
            message: "expected a JSON array of records".into(),
        });
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::Object(fields) => records.push(CandidateRecord(fields)),
            Value::Array(group) => {
                for nested in group {
                    let Value::Object(fields) = nested else {
                        return Err(SearchError::Decode {
                            message: format!("expected a record object, found {nested}"),
                        });
                    };
                    records.push(CandidateRecord(fields));
                }
            }
            other => {
                return Err(SearchError::Decode {
                    message: format!("expected a record object, found {other}"),
                });
            }
        }
    }
    Ok(records)
}

/// Sort records ascending by the lowercase value of `title_field`.
///
/// The sort is stable so records with equal titles keep response order.
pub fn sort_by_title(records: &mut [CandidateRecord], title_field: &str) {
    records.sort_by(|left, right| compare_titles(left, right, title_field));
}

fn compare_titles(left: &CandidateRecord, right: &CandidateRecord, title_field: &str) -> Ordering {
    let left_title = left.field_text(title_field).to_lowercase();
    let right_title = right.field_text(title_field).to_lowercase();
    left_title.cmp(&right_title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CandidateRecord {
        serde_json::from_value(value).expect("record")
    }

    #[test]
    fn id_is_coerced_from_numbers_and_strings() {
        assert_eq!(record(json!({"Id": 2})).id(), "2");
        assert_eq!(record(json!({"Id": "001000000000001AAA"})).id(), "001000000000001AAA");
        assert_eq!(record(json!({"Name": "no id"})).id(), "");
    }

    #[test]
    fn decode_flattens_grouped_responses() {
        let records = decode_candidates(r#"[[{"Id":"a"}],[{"Id":"b"},{"Id":"c"}]]"#).expect("decode");
        let ids: Vec<String> = records.iter().map(CandidateRecord::id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn decode_rejects_non_array_payloads() {
        let error = decode_candidates(r#"{"Id":"a"}"#).expect_err("object payload");
        assert!(matches!(error, SearchError::Decode { .. }));
        assert!(decode_candidates("not json").is_err());
        assert!(decode_candidates("[1, 2]").is_err());
    }

    #[test]
    fn sort_is_case_insensitive_and_ascending() {
        let mut records = decode_candidates(r#"[{"Id":2,"Name":"b"},{"Id":1,"Name":"a"},{"Id":3,"Name":"C"}]"#).expect("decode");
        sort_by_title(&mut records, "Name");
        let ids: Vec<String> = records.iter().map(CandidateRecord::id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}

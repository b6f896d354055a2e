use lookup_types::CandidateRecord;

/// Display delegate for a single candidate record.
///
/// A row is a pure view: it derives its label, sublabel and active flag from
/// the record and the externally supplied active id, and reports a selection
/// when activated. It owns no state of its own.
#[derive(Clone, Copy, Debug)]
pub struct OptionRow<'a> {
    record: &'a CandidateRecord,
    title_field: &'a str,
    subtitle_field: &'a str,
    active_id: Option<&'a str>,
}

impl<'a> OptionRow<'a> {
    pub fn new(record: &'a CandidateRecord, title_field: &'a str, subtitle_field: &'a str, active_id: Option<&'a str>) -> Self {
        Self {
            record,
            title_field,
            subtitle_field,
            active_id,
        }
    }

    pub fn label(&self) -> String {
        self.record.field_text(self.title_field)
    }

    pub fn sub_label(&self) -> String {
        self.record.field_text(self.subtitle_field)
    }

    pub fn is_active(&self) -> bool {
        self.active_id.is_some_and(|active| active == self.record.id())
    }

    /// Emit this row's id when the row is active or `candidate_id` targets it.
    ///
    /// Callers either name a specific id (activate that row) or pass `None`
    /// and rely on the active flag (activate whichever row is highlighted).
    pub fn activate_if_match(&self, candidate_id: Option<&str>) -> Option<String> {
        let record_id = self.record.id();
        if self.is_active() || candidate_id.is_some_and(|candidate| candidate == record_id) {
            Some(record_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> CandidateRecord {
        serde_json::from_value(json!({"Id": "a1", "Name": "Acme", "Industry": "Energy"})).expect("record")
    }

    #[test]
    fn exposes_label_and_sub_label() {
        let record = record();
        let row = OptionRow::new(&record, "Name", "Industry", None);
        assert_eq!(row.label(), "Acme");
        assert_eq!(row.sub_label(), "Energy");
        assert!(!row.is_active());
    }

    #[test]
    fn active_row_emits_without_a_target() {
        let record = record();
        let row = OptionRow::new(&record, "Name", "Industry", Some("a1"));
        assert!(row.is_active());
        assert_eq!(row.activate_if_match(None), Some("a1".to_string()));
    }

    #[test]
    fn inactive_row_emits_only_when_targeted() {
        let record = record();
        let row = OptionRow::new(&record, "Name", "Industry", Some("other"));
        assert_eq!(row.activate_if_match(None), None);
        assert_eq!(row.activate_if_match(Some("zz")), None);
        assert_eq!(row.activate_if_match(Some("a1")), Some("a1".to_string()));
    }
}

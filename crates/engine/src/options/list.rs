use lookup_types::CandidateRecord;

use super::OptionRow;

/// Presentation surface over the controller's candidate set.
///
/// The list borrows both the records and the active id from the controller;
/// it never owns them. Row selections are returned to the caller, which
/// plays the role of the list's listener.
#[derive(Clone, Copy, Debug)]
pub struct OptionList<'a> {
    records: &'a [CandidateRecord],
    title_field: &'a str,
    subtitle_field: &'a str,
    active_id: Option<&'a str>,
}

impl<'a> OptionList<'a> {
    pub fn new(records: &'a [CandidateRecord], title_field: &'a str, subtitle_field: &'a str, active_id: Option<&'a str>) -> Self {
        Self {
            records,
            title_field,
            subtitle_field,
            active_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn active_id(&self) -> Option<&'a str> {
        self.active_id
    }

    /// Rows in candidate order.
    pub fn rows(self) -> impl Iterator<Item = OptionRow<'a>> + 'a {
        let title_field = self.title_field;
        let subtitle_field = self.subtitle_field;
        let active_id = self.active_id;
        self.records
            .iter()
            .map(move |record| OptionRow::new(record, title_field, subtitle_field, active_id))
    }

    /// Index of the active row, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.rows().position(|row| row.is_active())
    }

    /// Ask every row to activate itself, targeting `current_id` or the active id.
    ///
    /// When neither is set and the list holds exactly one record, that sole
    /// record is targeted. Selections are returned verbatim in row order; with
    /// a consistent active id at most one row emits.
    pub fn select_active(&self, current_id: Option<&str>) -> Vec<String> {
        let sole_id = match (current_id, self.active_id, self.records) {
            (None, None, [sole]) => Some(sole.id()),
            _ => None,
        };
        let target = current_id.or(self.active_id).or(sole_id.as_deref());
        self.rows().filter_map(|row| row.activate_if_match(target)).collect()
    }
}

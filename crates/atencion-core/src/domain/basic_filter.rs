//! Basic Filter
//!
//! Home screen filter record.

use serde::{Deserialize, Serialize};

use super::date_range::{parse_date, DateRangeError, MAX_RANGE_DAYS};
use super::lookup::LookupItem;
use super::multi_select::{LabelStyle, MultiSelect};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicFilter {
    pub call_code: String,
    id_type: String,
    code: String,
    pub districts: MultiSelect,
    pub branch: String,
    pub incident: String,
    pub user: String,
    date_from: String,
    date_to: String,
    #[serde(skip)]
    date_error: Option<DateRangeError>,
}

impl BasicFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_type(&self) -> &str {
        &self.id_type
    }

    /// Clearing the id type also clears the code it qualifies
    pub fn set_id_type(&mut self, value: &str) {
        self.id_type = value.to_string();
        if self.id_type.trim().is_empty() {
            self.code.clear();
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn code_disabled(&self) -> bool {
        self.id_type.trim().is_empty()
    }

    pub fn set_code(&mut self, value: &str) {
        if !self.code_disabled() {
            self.code = value.to_string();
        }
    }

    pub fn date_from(&self) -> &str {
        &self.date_from
    }

    pub fn date_to(&self) -> &str {
        &self.date_to
    }

    pub fn set_date_from(&mut self, value: &str) {
        self.date_from = value.to_string();
        self.validate_dates();
    }

    pub fn set_date_to(&mut self, value: &str) {
        self.date_to = value.to_string();
        self.validate_dates();
    }

    pub fn date_error(&self) -> Option<DateRangeError> {
        self.date_error
    }

    /// Reject inverted ranges and spans over the limit. Inputs carry a time
    /// part, so order is compared on the full timestamp and the span counts
    /// whole days only. An oversized span also drops the end date so the
    /// user has to pick it again.
    pub fn validate_dates(&mut self) {
        self.date_error = match (parse_date(&self.date_from), parse_date(&self.date_to)) {
            (Some(from), Some(to)) if from > to => Some(DateRangeError::EndBeforeStart),
            (Some(from), Some(to)) if (to - from).num_days() > MAX_RANGE_DAYS => {
                Some(DateRangeError::ExceedsMaxSpan)
            }
            _ => None,
        };
        if self.date_error == Some(DateRangeError::ExceedsMaxSpan) {
            self.date_to.clear();
        }
    }

    /// Button text for the district picker; several picks show as a count
    pub fn district_label(&self, items: &[LookupItem]) -> String {
        self.districts.display_label(items, LabelStyle::Count)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_follows_id_type() {
        let mut filter = BasicFilter::new();
        assert!(filter.code_disabled());
        filter.set_code("123");
        assert_eq!(filter.code(), "");

        filter.set_id_type("2");
        filter.set_code("123");
        assert_eq!(filter.code(), "123");

        filter.set_id_type("");
        assert_eq!(filter.code(), "");
        assert!(filter.code_disabled());
    }

    #[test]
    fn test_inverted_dates_keep_both_values() {
        let mut filter = BasicFilter::new();
        filter.set_date_from("2024-02-01");
        filter.set_date_to("2024-01-01");
        assert_eq!(filter.date_error(), Some(DateRangeError::EndBeforeStart));
        assert_eq!(filter.date_to(), "2024-01-01");
    }

    #[test]
    fn test_long_span_clears_end_date() {
        let mut filter = BasicFilter::new();
        filter.set_date_from("2024-01-01");
        filter.set_date_to("2024-02-05");
        assert_eq!(filter.date_error(), Some(DateRangeError::ExceedsMaxSpan));
        assert_eq!(filter.date_to(), "");

        filter.set_date_to("2024-01-20");
        assert_eq!(filter.date_error(), None);
    }

    #[test]
    fn test_inverted_times_on_same_day() {
        let mut filter = BasicFilter::new();
        filter.set_date_from("2024-01-10T10:00");
        filter.set_date_to("2024-01-10T08:00");
        assert_eq!(filter.date_error(), Some(DateRangeError::EndBeforeStart));

        filter.set_date_to("2024-01-09T20:00");
        assert_eq!(filter.date_error(), Some(DateRangeError::EndBeforeStart));
        assert_eq!(filter.date_to(), "2024-01-09T20:00");

        filter.set_date_to("2024-01-10T10:00");
        assert_eq!(filter.date_error(), None);
    }

    #[test]
    fn test_span_counts_whole_days() {
        let mut filter = BasicFilter::new();
        filter.set_date_from("2024-01-01T08:00");
        filter.set_date_to("2024-01-31T09:00");
        assert_eq!(filter.date_error(), None);
        assert_eq!(filter.date_to(), "2024-01-31T09:00");

        filter.set_date_to("2024-02-01T09:00");
        assert_eq!(filter.date_error(), Some(DateRangeError::ExceedsMaxSpan));
        assert_eq!(filter.date_to(), "");
    }

    #[test]
    fn test_district_label_counts_multiple() {
        let items = vec![
            LookupItem::new("1", "Comas"),
            LookupItem::new("2", "Callao"),
        ];
        let mut filter = BasicFilter::new();
        filter.districts.toggle("2");
        assert_eq!(filter.district_label(&items), "Callao");
        filter.districts.toggle("1");
        assert_eq!(filter.district_label(&items), "2 distritos seleccionados");
    }
}

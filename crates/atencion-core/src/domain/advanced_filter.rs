//! Advanced Filter
//!
//! State behind the advanced filter modal. The date mode decides which date
//! inputs are live; the two custom-filter toggles hand their single-select
//! fields over to the drill-down modals.

use serde::{Deserialize, Serialize};

use super::date_range::{validate_range, DateRangeError};
use super::lookup::LookupItem;
use super::multi_select::{LabelStyle, MultiSelect};
use super::selection_tree::{ClassificationSelection, FeederSelection};

/// "Fecha llamada" condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateMode {
    #[default]
    #[serde(rename = "ninguno")]
    None,
    #[serde(rename = "desde")]
    From,
    #[serde(rename = "entre")]
    Between,
    #[serde(rename = "igual")]
    Equal,
    #[serde(rename = "hasta")]
    Until,
}

impl DateMode {
    pub const ALL: [DateMode; 5] = [
        DateMode::None,
        DateMode::From,
        DateMode::Between,
        DateMode::Equal,
        DateMode::Until,
    ];

    /// Value used by the `<select>` options
    pub fn as_str(&self) -> &'static str {
        match self {
            DateMode::None => "ninguno",
            DateMode::From => "desde",
            DateMode::Between => "entre",
            DateMode::Equal => "igual",
            DateMode::Until => "hasta",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateMode::None => "Ninguno",
            DateMode::From => "Desde",
            DateMode::Between => "Entre",
            DateMode::Equal => "Igual",
            DateMode::Until => "Hasta",
        }
    }

    /// Unknown values (including the blank "-- Seleccionar --") map to `None`
    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == value)
            .unwrap_or_default()
    }

    pub fn uses_from(&self) -> bool {
        matches!(self, DateMode::From | DateMode::Between | DateMode::Equal)
    }

    pub fn uses_to(&self) -> bool {
        matches!(self, DateMode::Between | DateMode::Until)
    }
}

/// A date the current mode requires but is still blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDate {
    From,
    To,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedFilter {
    // Datos de llamada
    pub id_type: String,
    pub description: String,
    pub districts: MultiSelect,
    pub zone: String,
    pub origin_type: String,
    pub branch: String,
    pub service_center: String,
    date_mode: DateMode,
    date_from: String,
    date_to: String,
    // Datos del predio
    custom_property: bool,
    classification: String,
    order_type: String,
    order_subtype: String,
    pub status: String,
    property_selection: Option<ClassificationSelection>,
    // Datos eléctricos
    custom_electric: bool,
    set: String,
    feeder: String,
    electric_selection: Option<FeederSelection>,
    #[serde(skip)]
    date_error: Option<DateRangeError>,
}

impl AdvancedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button text for the district picker; up to three picks are listed by name
    pub fn district_label(&self, items: &[LookupItem]) -> String {
        self.districts.display_label(items, LabelStyle::ShortList)
    }

    // ========================
    // Date mode
    // ========================

    pub fn date_mode(&self) -> DateMode {
        self.date_mode
    }

    /// Switch mode and blank whichever date inputs the new mode hides
    pub fn set_date_mode(&mut self, mode: DateMode) {
        self.date_mode = mode;
        if !mode.uses_to() {
            self.date_to.clear();
        }
        if !mode.uses_from() {
            self.date_from.clear();
        }
        self.date_error = None;
    }

    pub fn date_from(&self) -> &str {
        &self.date_from
    }

    pub fn date_to(&self) -> &str {
        &self.date_to
    }

    pub fn set_date_from(&mut self, value: &str) {
        if self.date_mode.uses_from() {
            self.date_from = value.to_string();
        }
        self.validate_range();
    }

    pub fn set_date_to(&mut self, value: &str) {
        if self.date_mode.uses_to() {
            self.date_to = value.to_string();
        }
        self.validate_range();
    }

    /// Only "entre" carries a range to check
    pub fn validate_range(&mut self) {
        self.date_error = match self.date_mode {
            DateMode::Between => validate_range(&self.date_from, &self.date_to).err(),
            _ => None,
        };
    }

    pub fn date_error(&self) -> Option<DateRangeError> {
        self.date_error
    }

    pub fn shows_single_date(&self) -> bool {
        matches!(self.date_mode, DateMode::From | DateMode::Equal)
    }

    pub fn shows_between_dates(&self) -> bool {
        self.date_mode == DateMode::Between
    }

    pub fn shows_until_date(&self) -> bool {
        self.date_mode == DateMode::Until
    }

    pub fn missing_dates(&self) -> Vec<MissingDate> {
        let mut missing = Vec::new();
        if self.date_mode.uses_from() && self.date_from.trim().is_empty() {
            missing.push(MissingDate::From);
        }
        if self.date_mode.uses_to() && self.date_to.trim().is_empty() {
            missing.push(MissingDate::To);
        }
        missing
    }

    /// Ready to apply: no range error and every required date filled
    pub fn is_submittable(&self) -> bool {
        self.date_error.is_none() && self.missing_dates().is_empty()
    }

    // ========================
    // Datos del predio
    // ========================

    pub fn custom_property(&self) -> bool {
        self.custom_property
    }

    /// Enabling blanks the flat selects; disabling drops the drill-down result
    pub fn set_custom_property(&mut self, enabled: bool) {
        self.custom_property = enabled;
        if enabled {
            self.classification.clear();
            self.order_type.clear();
            self.order_subtype.clear();
        } else {
            self.property_selection = None;
        }
    }

    pub fn classification(&self) -> &str {
        &self.classification
    }

    pub fn order_type(&self) -> &str {
        &self.order_type
    }

    pub fn order_subtype(&self) -> &str {
        &self.order_subtype
    }

    pub fn set_classification(&mut self, code: &str) {
        if !self.custom_property {
            self.classification = code.to_string();
        }
    }

    pub fn set_order_type(&mut self, code: &str) {
        if !self.custom_property {
            self.order_type = code.to_string();
        }
    }

    pub fn set_order_subtype(&mut self, code: &str) {
        if !self.custom_property {
            self.order_subtype = code.to_string();
        }
    }

    pub fn property_selection(&self) -> Option<&ClassificationSelection> {
        self.property_selection.as_ref()
    }

    pub fn set_property_selection(&mut self, selection: ClassificationSelection) {
        self.property_selection = Some(selection);
    }

    // ========================
    // Datos eléctricos
    // ========================

    pub fn custom_electric(&self) -> bool {
        self.custom_electric
    }

    pub fn set_custom_electric(&mut self, enabled: bool) {
        self.custom_electric = enabled;
        if enabled {
            self.set.clear();
            self.feeder.clear();
        } else {
            self.electric_selection = None;
        }
    }

    pub fn set_code(&self) -> &str {
        &self.set
    }

    pub fn feeder(&self) -> &str {
        &self.feeder
    }

    pub fn set_set(&mut self, code: &str) {
        if !self.custom_electric {
            self.set = code.to_string();
        }
    }

    pub fn set_feeder(&mut self, code: &str) {
        if !self.custom_electric {
            self.feeder = code.to_string();
        }
    }

    pub fn electric_selection(&self) -> Option<&FeederSelection> {
        self.electric_selection.as_ref()
    }

    pub fn set_electric_selection(&mut self, selection: FeederSelection) {
        self.electric_selection = Some(selection);
    }
}

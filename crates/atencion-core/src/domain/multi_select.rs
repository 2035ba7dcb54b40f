//! Multi-select Dropdown State
//!
//! Backs the district picker: an ordered selection, a dropdown open flag and
//! a live text filter over the candidate labels.

use serde::{Deserialize, Serialize};

use super::lookup::{label_of, LookupItem};

/// Text shown when nothing is selected
pub const PLACEHOLDER: &str = "-- Seleccionar --";

/// How many selections still render as a joined list in `LabelStyle::ShortList`
const SHORT_LIST_MAX: usize = 3;

/// Summary style for the closed control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelStyle {
    /// 1 label, otherwise a count
    Count,
    /// Up to three labels comma-joined, otherwise a count
    ShortList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSelect {
    selected: Vec<String>,
    #[serde(skip)]
    open: bool,
    #[serde(skip)]
    query: String,
}

impl MultiSelect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `code`, keeping insertion order
    pub fn toggle(&mut self, code: &str) {
        if let Some(pos) = self.selected.iter().position(|c| c == code) {
            self.selected.remove(pos);
        } else {
            self.selected.push(code.to_string());
        }
    }

    /// Idempotent check/uncheck
    pub fn set_checked(&mut self, code: &str, checked: bool) {
        if checked != self.is_selected(code) {
            self.toggle(code);
        }
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.iter().any(|c| c == code)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opening always starts from the full candidate list
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
    }

    /// Closing drops the filter text, never the selection
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn toggle_open(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Candidates whose label contains the filter text (case-insensitive)
    pub fn candidates<'a>(&self, items: &'a [LookupItem]) -> Vec<&'a LookupItem> {
        let needle = self.query.trim().to_lowercase();
        items
            .iter()
            .filter(|item| needle.is_empty() || item.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Summary text for the closed control
    pub fn display_label(&self, items: &[LookupItem], style: LabelStyle) -> String {
        match self.selected.len() {
            0 => PLACEHOLDER.to_string(),
            1 => label_of(items, &self.selected[0]).unwrap_or_default().to_string(),
            n if style == LabelStyle::ShortList && n <= SHORT_LIST_MAX => self
                .selected
                .iter()
                .filter_map(|code| label_of(items, code))
                .collect::<Vec<_>>()
                .join(", "),
            n => format!("{} distritos seleccionados", n),
        }
    }
}

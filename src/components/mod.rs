//! UI Components
//!
//! Leptos components for the filter screens.

mod advanced_filter_modal;
mod district_select;
mod drill_down_modal;
mod home_filter;
mod lookup_select;

pub use advanced_filter_modal::AdvancedFilterModal;
pub use district_select::DistrictSelect;
pub use drill_down_modal::{ClassificationModal, FeederModal};
pub use home_filter::HomeFilter;
pub use lookup_select::LookupSelect;

//! Frontend Models
//!
//! View-side glue over the core filter types.

use atencion_core::{AdvancedFilter, BasicFilter, LookupItem, MultiSelect};

/// Filters that own a district multi-select
pub trait HasDistricts {
    fn districts(&self) -> &MultiSelect;
    fn districts_mut(&mut self) -> &mut MultiSelect;
    fn district_label(&self, items: &[LookupItem]) -> String;
}

impl HasDistricts for BasicFilter {
    fn districts(&self) -> &MultiSelect {
        &self.districts
    }

    fn districts_mut(&mut self) -> &mut MultiSelect {
        &mut self.districts
    }

    fn district_label(&self, items: &[LookupItem]) -> String {
        BasicFilter::district_label(self, items)
    }
}

impl HasDistricts for AdvancedFilter {
    fn districts(&self) -> &MultiSelect {
        &self.districts
    }

    fn districts_mut(&mut self) -> &mut MultiSelect {
        &mut self.districts
    }

    fn district_label(&self, items: &[LookupItem]) -> String {
        AdvancedFilter::district_label(self, items)
    }
}

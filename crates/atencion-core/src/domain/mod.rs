//! Domain Layer
//!
//! Filter view-state and lookup data. Nothing in here touches the network
//! or the browser, so every state transition is unit-testable.

mod error;
mod lookup;
mod date_range;
mod multi_select;
mod basic_filter;
mod advanced_filter;
mod selection_tree;
mod sample_data;

pub use error::{ApiError, ApiResult};
pub use lookup::{list, LookupBundle, LookupItem, LookupRequest};
pub use date_range::{day_span, parse_date, validate_range, DateRangeError, MAX_RANGE_DAYS};
pub use multi_select::{LabelStyle, MultiSelect, PLACEHOLDER};
pub use basic_filter::BasicFilter;
pub use advanced_filter::{AdvancedFilter, DateMode, MissingDate};
pub use selection_tree::{
    ChildFetch, ClassificationSelection, FallbackPolicy, FeederSelection, NodeId, SelectionTree,
    TreeKind, TreeNode,
};
pub use sample_data::sample_rows;

//! Filtering engine for the services directory.
//!
//! Everything here is synchronous and free of I/O: callers fetch services and
//! locations elsewhere and hand them over as plain data. The pipeline is
//! [`Catalog`] → [`cascade`] option lists → [`search::filter`] →
//! [`paginate::paginate`], with [`FilterState`] holding the user's current
//! selection between steps.

pub mod cascade;
pub mod category;
pub mod map;
pub mod paginate;
pub mod search;
pub mod state;
pub mod store;

pub use cascade::{cities_for, provinces_for};
pub use category::{category_heading, category_label, resolve_category, CategoryFilter, ALL_KEY};
pub use map::{fit_region, Region};
pub use paginate::{paginate, total_pages, Page};
pub use search::{filter, found_label, showing_label, Criteria};
pub use state::{FilterState, OptionsRequest};
pub use store::Catalog;

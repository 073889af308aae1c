//! Aggregation engines over the crop dataset
//!
//! Every function here is pure: it takes the shared read-only [`Dataset`]
//! and returns a freshly built result or an [`EngineError`].
//!
//! [`Dataset`]: crate::dataset::Dataset

pub mod catalog;
pub mod comparison;
pub mod error;
pub mod models;
pub mod ranking;
pub mod rollup;
pub mod summary;

pub use catalog::{crop_municipalities, dataset_statistics, list_crops};
pub use comparison::compare_crops;
pub use error::EngineError;
pub use models::*;
pub use ranking::{top_n_by_area, DEFAULT_TOP_N};
pub use rollup::rollup_by_state;
pub use summary::statistical_summary;

#[cfg(test)]
pub(crate) mod fixtures;

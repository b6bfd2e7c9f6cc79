//! Field cleanup, validation, and deduplication of scraped catalog records.

pub mod error;
pub mod fields;
pub mod rules;
mod transform;

pub use error::RejectReason;
pub use rules::TransformRules;
pub use transform::{clean_record, transform, transform_with_report, TransformReport};

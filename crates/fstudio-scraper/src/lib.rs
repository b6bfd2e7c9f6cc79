pub mod client;
pub mod error;
pub mod pagination;
pub mod parse;

pub use client::{CatalogClient, Extraction, StopReason};
pub use error::ScraperError;
pub use parse::{parse_page, ParsedPage};

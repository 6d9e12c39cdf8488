//! Metadata domains, tag parsing, and dataset access.
//!
//! - [`split_tag`] / [`TagEntry`] — parse serialized `KEY=VALUE` entries
//! - [`strip_pattern`] — remove a literal pattern from a key
//! - [`MetadataStore`] — the seam to a dataset's metadata domains, with an
//!   in-memory [`MemoryStore`] and, behind the `gdal` feature, an
//!   implementation for `gdal::Dataset` in [`dataset`]
//! - [`list_domains`] — snapshot every domain of a dataset for comparison

#[cfg(feature = "gdal")]
pub mod dataset;
mod listing;
mod store;
mod tag;

pub use listing::{DomainListing, format_listing, list_domains};
pub use store::{Domain, MemoryStore, MetadataStore};
pub use tag::{TagEntry, split_tag, strip_pattern};

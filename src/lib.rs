//! # gtiff-metadata
//!
//! Copy a GeoTIFF with GDAL's own create-copy routine and investigate how its
//! EXIF metadata survives: list the metadata domains of the source, copy it,
//! re-insert the source's EXIF tags into the copy (optionally stripping the
//! `EXIF_` prefix from the keys, optionally keeping them in the `EXIF` domain
//! instead of the default one), and list the domains of the result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gtiff_metadata::config::Config;
//! use gtiff_metadata::metadata::format_listing;
//! use gtiff_metadata::pipeline::{RemapOptions, copy_with_metadata};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!
//!     // strip "EXIF_" from keys, write into the default domain
//!     let options = RemapOptions::new(&config, true, false);
//!     let report = copy_with_metadata("in.tif".as_ref(), "out.tif".as_ref(), &options, &config)?;
//!
//!     print!("{}", format_listing("out.tif", &report.after));
//!     println!("{} written, {} failed", report.remap.written.len(), report.remap.failed.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Without GDAL
//!
//! The remapper works on anything implementing
//! [`MetadataStore`](metadata::MetadataStore):
//!
//! ```rust
//! use gtiff_metadata::config::Config;
//! use gtiff_metadata::metadata::{Domain, MemoryStore};
//! use gtiff_metadata::pipeline::{RemapOptions, remap_metadata};
//!
//! let source = MemoryStore::with_raw_tags(
//!     Domain::from("EXIF"),
//!     ["EXIF_Make=Acme", "EXIF_Model=X100", "Malformed"],
//! );
//! let mut copy = MemoryStore::new();
//!
//! let report = remap_metadata(&source, &mut copy, &RemapOptions::new(&Config::default(), false, true));
//! assert_eq!(copy.get(&Domain::from("EXIF"), "EXIF_Model"), Some("X100"));
//! assert_eq!(report.skipped, vec!["Malformed"]);
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration types and loading/saving
//! - [`error`] — Error type and process exit codes
//! - [`flag`] — Yes/no command-line flag parsing
//! - [`metadata`] — Tag parsing, key stripping, metadata domains and stores
//! - [`pipeline`] — The remapper and the end-to-end copy run

pub mod config;
pub mod error;
pub mod flag;
pub mod metadata;
pub mod pipeline;

use std::fmt;

use crate::error::Error;

/// A metadata domain on a dataset: the unnamed default one, or a named one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    Default,
    Named(String),
}

impl Domain {
    /// The domain name as the raster library expects it (`""` for the default).
    pub fn as_str(&self) -> &str {
        match self {
            Domain::Default => "",
            Domain::Named(name) => name,
        }
    }

    /// The domain name, or `None` for the default domain.
    pub fn name(&self) -> Option<&str> {
        match self {
            Domain::Default => None,
            Domain::Named(name) => Some(name),
        }
    }
}

impl From<&str> for Domain {
    fn from(name: &str) -> Self {
        if name.is_empty() {
            Domain::Default
        } else {
            Domain::Named(name.to_string())
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Default => f.pad("(default)"),
            Domain::Named(name) => f.pad(name),
        }
    }
}

/// Read and write access to the metadata domains of a dataset.
///
/// The GDAL implementation lives behind the `gdal` feature; [`MemoryStore`]
/// keeps everything in memory.
pub trait MetadataStore {
    /// All domains that currently exist on the dataset, in library order.
    fn domains(&self) -> Vec<Domain>;

    /// Serialized `KEY=VALUE` entries of one domain, in insertion order.
    ///
    /// A missing domain yields an empty list.
    fn tags(&self, domain: &Domain) -> Vec<String>;

    /// Set `key` to `value` in `domain`, replacing any previous value.
    fn set_tag(&mut self, domain: &Domain, key: &str, value: &str) -> Result<(), Error>;
}

/// In-memory [`MetadataStore`] preserving domain and entry insertion order.
///
/// # Example
///
/// ```rust
/// use gtiff_metadata::metadata::{Domain, MemoryStore, MetadataStore};
///
/// let mut store = MemoryStore::new();
/// store.set_tag(&Domain::from("EXIF"), "EXIF_Make", "Acme").unwrap();
/// assert_eq!(store.tags(&Domain::from("EXIF")), vec!["EXIF_Make=Acme"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    domains: Vec<(Domain, Vec<String>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding one domain of serialized entries.
    ///
    /// Entries are kept verbatim, so malformed ones survive for the remapper
    /// to skip.
    pub fn with_raw_tags<I, S>(domain: Domain, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries.into_iter().map(Into::into).collect();
        Self {
            domains: vec![(domain, entries)],
        }
    }

    /// Look up a single value.
    pub fn get(&self, domain: &Domain, key: &str) -> Option<&str> {
        self.entries(domain)?
            .iter()
            .find_map(|entry| entry_value(entry, key))
    }

    fn entries(&self, domain: &Domain) -> Option<&Vec<String>> {
        self.domains
            .iter()
            .find(|(d, _)| d == domain)
            .map(|(_, entries)| entries)
    }
}

/// The value of `entry` if its key is exactly `key`.
fn entry_value<'a>(entry: &'a str, key: &str) -> Option<&'a str> {
    entry.strip_prefix(key)?.strip_prefix('=')
}

impl MetadataStore for MemoryStore {
    fn domains(&self) -> Vec<Domain> {
        self.domains.iter().map(|(d, _)| d.clone()).collect()
    }

    fn tags(&self, domain: &Domain) -> Vec<String> {
        self.entries(domain).cloned().unwrap_or_default()
    }

    fn set_tag(&mut self, domain: &Domain, key: &str, value: &str) -> Result<(), Error> {
        let idx = match self.domains.iter().position(|(d, _)| d == domain) {
            Some(idx) => idx,
            None => {
                self.domains.push((domain.clone(), Vec::new()));
                self.domains.len() - 1
            }
        };
        let entries = &mut self.domains[idx].1;
        let serialized = format!("{key}={value}");
        match entries
            .iter_mut()
            .find(|entry| entry_value(entry, key).is_some())
        {
            Some(entry) => *entry = serialized,
            None => entries.push(serialized),
        }
        Ok(())
    }
}

use gdal::cpl::CslStringList;
use gdal::{Dataset, Driver, DriverManager, Metadata};
use std::path::Path;

use super::store::{Domain, MetadataStore};
use crate::error::Error;

// Driver capability flag for "can create new datasets".
const DCAP_CREATE: &str = "DCAP_CREATE";

impl MetadataStore for Dataset {
    fn domains(&self) -> Vec<Domain> {
        self.metadata_domains()
            .iter()
            .map(|name| Domain::from(name.as_str()))
            .collect()
    }

    fn tags(&self, domain: &Domain) -> Vec<String> {
        self.metadata_domain(domain.as_str()).unwrap_or_default()
    }

    fn set_tag(&mut self, domain: &Domain, key: &str, value: &str) -> Result<(), Error> {
        self.set_metadata_item(key, value, domain.as_str())
            .map_err(|e| Error::Write {
                domain: domain.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })
    }
}

/// GDAL release name and date, e.g. `"3.8.4 20240208"`.
pub fn gdal_version() -> String {
    format!(
        "{} {}",
        gdal::version::version_info("RELEASE_NAME"),
        gdal::version::version_info("RELEASE_DATE")
    )
}

/// Look up a driver by short name and make sure it can create datasets.
pub fn writable_driver(name: &str) -> Result<Driver, Error> {
    let driver =
        DriverManager::get_driver_by_name(name).map_err(|_| Error::DriverNotFound(name.into()))?;

    let can_create = driver
        .metadata_item(DCAP_CREATE, "")
        .is_some_and(|v| is_gdal_true(&v));
    if !can_create {
        return Err(Error::DriverNotWritable(name.into()));
    }
    Ok(driver)
}

/// Open a dataset read-only.
pub fn open_source(path: &Path) -> Result<Dataset, Error> {
    log::debug!("Opening dataset: {}", path.display());
    Dataset::open(path).map_err(|e| Error::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Create `path` as a copy of `source` with the driver's own copy routine.
pub fn create_copy(driver: &Driver, source: &Dataset, path: &Path) -> Result<Dataset, Error> {
    source
        .create_copy(driver, path, &CslStringList::new())
        .map_err(|e| Error::Copy {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Flush pending writes of `dataset` to disk.
pub fn flush(dataset: &mut Dataset, path: &Path) -> Result<(), Error> {
    dataset.flush_cache().map_err(|e| Error::Flush {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// GDAL boolean convention: anything but NO/FALSE/OFF/0 is true.
fn is_gdal_true(value: &str) -> bool {
    !["NO", "FALSE", "OFF", "0"]
        .iter()
        .any(|f| value.eq_ignore_ascii_case(f))
}

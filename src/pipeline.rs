use crate::config::Config;
use crate::metadata::{Domain, MetadataStore, TagEntry};

#[cfg(feature = "gdal")]
use crate::error::Error;
#[cfg(feature = "gdal")]
use crate::metadata::{DomainListing, dataset, list_domains};
#[cfg(feature = "gdal")]
use std::path::{Path, PathBuf};

/// How tags move from the source domain to the destination.
///
/// # Example
///
/// ```rust
/// use gtiff_metadata::config::Config;
/// use gtiff_metadata::metadata::Domain;
/// use gtiff_metadata::pipeline::RemapOptions;
///
/// let options = RemapOptions::new(&Config::default(), true, false);
/// assert_eq!(options.strip_pattern.as_deref(), Some("EXIF_"));
/// assert_eq!(options.target_domain(), Domain::Default);
/// ```
#[derive(Debug, Clone)]
pub struct RemapOptions {
    /// Domain read from the source dataset.
    pub source_domain: Domain,
    /// Pattern removed from every key, if stripping is enabled.
    pub strip_pattern: Option<String>,
    /// Write into the source domain's name on the destination instead of
    /// the default domain.
    pub retag: bool,
}

impl RemapOptions {
    /// Options for the configured domain and pattern with the two CLI switches.
    pub fn new(config: &Config, strip: bool, retag: bool) -> Self {
        Self {
            source_domain: Domain::from(config.source_domain.as_str()),
            strip_pattern: strip.then(|| config.strip_pattern.clone()),
            retag,
        }
    }

    /// The destination domain tags are written into.
    pub fn target_domain(&self) -> Domain {
        if self.retag {
            self.source_domain.clone()
        } else {
            Domain::Default
        }
    }
}

/// A metadata write the destination refused.
#[derive(Debug, Clone)]
pub struct WriteFailure {
    pub tag: TagEntry,
    pub reason: String,
}

/// Outcome of one remap pass.
#[derive(Debug, Clone, Default)]
pub struct RemapReport {
    /// Tags written, in source order, with keys as written.
    pub written: Vec<TagEntry>,
    /// Source entries that did not parse into a usable key/value pair.
    pub skipped: Vec<String>,
    /// Tags the destination failed to store.
    pub failed: Vec<WriteFailure>,
}

/// Copy every tag of the source domain into the destination.
///
/// Each entry is split at its first `=`, optionally has the strip pattern
/// removed from its key, and is written to [`RemapOptions::target_domain`].
/// Malformed entries are skipped and a failed write does not stop the
/// loop; both are recorded in the returned report. The source is never
/// modified. A missing or empty source domain performs no writes.
///
/// ```rust
/// use gtiff_metadata::config::Config;
/// use gtiff_metadata::metadata::{Domain, MemoryStore};
/// use gtiff_metadata::pipeline::{RemapOptions, remap_metadata};
///
/// let source = MemoryStore::with_raw_tags(Domain::from("EXIF"), ["EXIF_Make=Acme"]);
/// let mut destination = MemoryStore::new();
/// let options = RemapOptions::new(&Config::default(), true, false);
///
/// let report = remap_metadata(&source, &mut destination, &options);
/// assert_eq!(report.written.len(), 1);
/// assert_eq!(destination.get(&Domain::Default, "Make"), Some("Acme"));
/// ```
pub fn remap_metadata<S, D>(source: &S, destination: &mut D, options: &RemapOptions) -> RemapReport
where
    S: MetadataStore + ?Sized,
    D: MetadataStore + ?Sized,
{
    let mut report = RemapReport::default();
    let target = options.target_domain();

    for raw in source.tags(&options.source_domain) {
        let Some(mut tag) = TagEntry::parse(&raw) else {
            log::debug!("  Skipping malformed entry: {raw}");
            report.skipped.push(raw);
            continue;
        };

        if let Some(pattern) = options.strip_pattern.as_deref() {
            tag.strip_key(pattern);
            if tag.key.is_empty() {
                log::warn!("  Skipping {raw}: key is empty after removing {pattern}");
                report.skipped.push(raw);
                continue;
            }
        }

        match destination.set_tag(&target, &tag.key, &tag.value) {
            Ok(()) => {
                log::debug!("  {}={} -> {target}", tag.key, tag.value);
                report.written.push(tag);
            }
            Err(e) => {
                log::warn!("  {e}");
                report.failed.push(WriteFailure {
                    tag,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

/// Everything observed during one copy run.
#[cfg(feature = "gdal")]
#[derive(Debug)]
pub struct CopyReport {
    /// GDAL release name and date.
    pub gdal_version: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Domains of the source before the copy.
    pub before: Vec<DomainListing>,
    /// Domains of the copy after the remap.
    pub after: Vec<DomainListing>,
    /// Domain the tags were written into.
    pub target_domain: Domain,
    pub remap: RemapReport,
}

/// Copy `input` to `output` with the configured driver and re-insert the
/// source domain's tags into the copy.
///
/// Both datasets are owned by this function: the copy is flushed, and both
/// are closed before it returns, on success and on every error path.
///
/// # Example
///
/// ```rust,no_run
/// use gtiff_metadata::config::Config;
/// use gtiff_metadata::pipeline::{RemapOptions, copy_with_metadata};
///
/// let config = Config::default();
/// let options = RemapOptions::new(&config, true, false);
/// let report = copy_with_metadata("in.tif".as_ref(), "out.tif".as_ref(), &options, &config)?;
/// println!("{} tag(s) written", report.remap.written.len());
/// # Ok::<(), gtiff_metadata::error::Error>(())
/// ```
#[cfg(feature = "gdal")]
pub fn copy_with_metadata(
    input: &Path,
    output: &Path,
    options: &RemapOptions,
    config: &Config,
) -> Result<CopyReport, Error> {
    let gdal_version = dataset::gdal_version();
    log::debug!("GDAL version {gdal_version}");

    let driver = dataset::writable_driver(&config.driver)?;

    log::info!("Opening {} file {}", config.driver, input.display());
    let source = dataset::open_source(input)?;
    let before = list_domains(&source);

    log::info!(
        "Copying {} file {} to {}",
        config.driver,
        input.display(),
        output.display()
    );
    let mut destination = dataset::create_copy(&driver, &source, output)?;

    let target_domain = options.target_domain();
    log::info!(
        "Copying {} tags from {} to {} ({} domain{})",
        options.source_domain,
        input.display(),
        output.display(),
        target_domain,
        if options.strip_pattern.is_some() {
            ", prefix stripped"
        } else {
            ""
        }
    );
    let remap = remap_metadata(&source, &mut destination, options);
    let after = list_domains(&destination);

    dataset::flush(&mut destination, output)?;
    log::debug!("Closing destination {}", output.display());
    drop(destination);
    log::debug!("Closing source {}", input.display());
    drop(source);

    Ok(CopyReport {
        gdal_version,
        source: input.to_path_buf(),
        destination: output.to_path_buf(),
        before,
        after,
        target_domain,
        remap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::metadata::MemoryStore;

    fn exif_source() -> MemoryStore {
        MemoryStore::with_raw_tags(
            Domain::from("EXIF"),
            ["EXIF_Make=Acme", "EXIF_Model=X100", "Malformed"],
        )
    }

    /// A destination that rejects one key.
    struct RejectingStore {
        inner: MemoryStore,
        reject: &'static str,
    }

    impl MetadataStore for RejectingStore {
        fn domains(&self) -> Vec<Domain> {
            self.inner.domains()
        }

        fn tags(&self, domain: &Domain) -> Vec<String> {
            self.inner.tags(domain)
        }

        fn set_tag(&mut self, domain: &Domain, key: &str, value: &str) -> Result<(), Error> {
            if key == self.reject {
                return Err(Error::Write {
                    domain: domain.to_string(),
                    key: key.to_string(),
                    reason: "read-only".to_string(),
                });
            }
            self.inner.set_tag(domain, key, value)
        }
    }

    // ── RemapOptions ─────────────────────────────────────────────────

    #[test]
    fn options_from_config() {
        let config = Config::default();

        let options = RemapOptions::new(&config, false, true);
        assert_eq!(options.source_domain, Domain::from("EXIF"));
        assert!(options.strip_pattern.is_none());
        assert_eq!(options.target_domain(), Domain::from("EXIF"));

        let options = RemapOptions::new(&config, true, false);
        assert_eq!(options.strip_pattern.as_deref(), Some("EXIF_"));
        assert_eq!(options.target_domain(), Domain::Default);
    }

    // ── remap_metadata ───────────────────────────────────────────────

    #[test]
    fn strip_into_default_domain() {
        let source = exif_source();
        let mut dest = MemoryStore::new();
        let options = RemapOptions::new(&Config::default(), true, false);

        let report = remap_metadata(&source, &mut dest, &options);

        assert_eq!(dest.tags(&Domain::Default), vec!["Make=Acme", "Model=X100"]);
        assert!(dest.tags(&Domain::from("EXIF")).is_empty());
        assert_eq!(report.written.len(), 2);
        assert_eq!(report.skipped, vec!["Malformed"]);
        assert!(report.failed.is_empty());
    }

    #[test]
    fn retag_keeps_keys_in_exif_domain() {
        let source = exif_source();
        let mut dest = MemoryStore::new();
        let options = RemapOptions::new(&Config::default(), false, true);

        let report = remap_metadata(&source, &mut dest, &options);

        assert_eq!(
            dest.tags(&Domain::from("EXIF")),
            vec!["EXIF_Make=Acme", "EXIF_Model=X100"]
        );
        assert!(dest.tags(&Domain::Default).is_empty());
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn strip_and_retag() {
        let source = exif_source();
        let mut dest = MemoryStore::new();
        let options = RemapOptions::new(&Config::default(), true, true);

        remap_metadata(&source, &mut dest, &options);
        assert_eq!(
            dest.tags(&Domain::from("EXIF")),
            vec!["Make=Acme", "Model=X100"]
        );
    }

    #[test]
    fn source_is_not_modified() {
        let source = exif_source();
        let before = source.tags(&Domain::from("EXIF"));
        let mut dest = MemoryStore::new();
        remap_metadata(&source, &mut dest, &RemapOptions::new(&Config::default(), true, true));
        assert_eq!(source.tags(&Domain::from("EXIF")), before);
    }

    #[test]
    fn missing_source_domain_is_noop() {
        let source = MemoryStore::new();
        let mut dest = MemoryStore::new();
        let report = remap_metadata(&source, &mut dest, &RemapOptions::new(&Config::default(), true, false));
        assert!(report.written.is_empty());
        assert!(report.skipped.is_empty());
        assert!(report.failed.is_empty());
        assert!(dest.domains().is_empty());
    }

    #[test]
    fn empty_source_domain_is_noop() {
        let source = MemoryStore::with_raw_tags(Domain::from("EXIF"), Vec::<String>::new());
        let mut dest = MemoryStore::new();
        let report = remap_metadata(&source, &mut dest, &RemapOptions::new(&Config::default(), false, false));
        assert!(report.written.is_empty());
        assert!(dest.domains().is_empty());
    }

    #[test]
    fn values_keep_further_delimiters() {
        let source = MemoryStore::with_raw_tags(
            Domain::from("EXIF"),
            ["EXIF_UserComment=a=b", "EXIF_Empty=", "=orphan"],
        );
        let mut dest = MemoryStore::new();
        let report = remap_metadata(&source, &mut dest, &RemapOptions::new(&Config::default(), true, false));

        assert_eq!(dest.get(&Domain::Default, "UserComment"), Some("a=b"));
        assert_eq!(dest.get(&Domain::Default, "Empty"), Some(""));
        assert_eq!(report.skipped, vec!["=orphan"]);
    }

    #[test]
    fn key_emptied_by_strip_is_skipped() {
        let source = MemoryStore::with_raw_tags(Domain::from("EXIF"), ["EXIF_=value"]);
        let mut dest = MemoryStore::new();
        let report = remap_metadata(&source, &mut dest, &RemapOptions::new(&Config::default(), true, false));
        assert!(report.written.is_empty());
        assert_eq!(report.skipped, vec!["EXIF_=value"]);
    }

    #[test]
    fn failed_write_does_not_stop_the_loop() {
        let source = exif_source();
        let mut dest = RejectingStore {
            inner: MemoryStore::new(),
            reject: "Make",
        };
        let report = remap_metadata(&source, &mut dest, &RemapOptions::new(&Config::default(), true, false));

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].tag.key, "Make");
        assert!(report.failed[0].reason.contains("read-only"));
        assert_eq!(report.written.len(), 1);
        assert_eq!(dest.tags(&Domain::Default), vec!["Model=X100"]);
    }

    #[test]
    fn custom_domain_and_pattern() {
        let mut config = Config::default();
        config.source_domain = "GPS".into();
        config.strip_pattern = "GPS".into();
        let source = MemoryStore::with_raw_tags(Domain::from("GPS"), ["GPSLatitude=52.1"]);
        let mut dest = MemoryStore::new();

        remap_metadata(&source, &mut dest, &RemapOptions::new(&config, true, true));
        assert_eq!(dest.get(&Domain::from("GPS"), "Latitude"), Some("52.1"));
    }

    // ── copy_with_metadata ───────────────────────────────────────────

    #[cfg(feature = "gdal")]
    #[test]
    fn copy_missing_input_fails_with_open_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::default();
        let options = RemapOptions::new(&config, true, false);
        let err = copy_with_metadata(
            &dir.path().join("absent.tif"),
            &dir.path().join("out.tif"),
            &options,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
        assert!(!dir.path().join("out.tif").exists());
    }

    #[cfg(feature = "gdal")]
    #[test]
    fn copy_unknown_driver_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.driver = "NoSuchDriver".into();
        let options = RemapOptions::new(&config, false, false);
        let err = copy_with_metadata(
            &dir.path().join("in.tif"),
            &dir.path().join("out.tif"),
            &options,
            &config,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[cfg(feature = "gdal")]
    #[test]
    fn copy_without_exif_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.tif");
        let output = dir.path().join("out.tif");
        {
            let driver = dataset::writable_driver("GTiff").unwrap();
            let mut src = driver.create(&input, 4, 4, 1).unwrap();
            dataset::flush(&mut src, &input).unwrap();
        }

        let config = Config::default();
        let options = RemapOptions::new(&config, true, false);
        let report = copy_with_metadata(&input, &output, &options, &config).unwrap();

        assert!(output.exists());
        assert_eq!(report.source, input);
        assert_eq!(report.destination, output);
        assert_eq!(report.target_domain, Domain::Default);
        assert!(report.remap.written.is_empty());
        assert!(report.remap.failed.is_empty());
        assert!(!report.gdal_version.is_empty());
    }
}

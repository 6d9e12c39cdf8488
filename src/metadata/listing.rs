use super::store::{Domain, MetadataStore};

/// Snapshot of one metadata domain and its serialized entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainListing {
    pub domain: Domain,
    pub tags: Vec<String>,
}

/// Snapshot every domain of a dataset with its entries.
///
/// Read-only; the order is the order the store reports domains in.
pub fn list_domains<S: MetadataStore + ?Sized>(store: &S) -> Vec<DomainListing> {
    store
        .domains()
        .into_iter()
        .map(|domain| {
            let tags = store.tags(&domain);
            DomainListing { domain, tags }
        })
        .collect()
}

/// Render a listing the way the transcript prints it.
///
/// `DOMAIN.nn: name` per domain, followed by `  TAG.nn: entry` lines, a
/// blank line, or `No tags!` for an empty domain.
pub fn format_listing(title: &str, listing: &[DomainListing]) -> String {
    let mut out = format!("list metadata domains of {title}\n");
    if listing.is_empty() {
        out.push_str("No domains!\n\n");
        return out;
    }
    for (dix, entry) in listing.iter().enumerate() {
        out.push_str(&format!("DOMAIN.{:02}: {:>8}\n", dix + 1, entry.domain));
        if entry.tags.is_empty() {
            out.push_str("No tags!\n\n");
            continue;
        }
        for (tix, tag) in entry.tags.iter().enumerate() {
            out.push_str(&format!("  TAG.{:02}: {:>8}\n", tix + 1, tag));
        }
        out.push('\n');
    }
    out
}

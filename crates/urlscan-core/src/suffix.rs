//! Public-suffix (TLD) resolution.
//!
//! Backed by the `psl` crate's compile-time embedded Public Suffix List, so
//! lookups are pure in-memory table walks with no runtime data file and no
//! network dependency.

use crate::urlparts::UrlParts;

/// Resolve the public suffix of a host, e.g. `"com"` for `www.google.com`
/// and `"co.uk"` for `www.bbc.co.uk`.
///
/// Returns `None` when the suffix cannot be determined: the host is an IP
/// literal, its suffix is not on the list, or there is no label in front of
/// the suffix (a registrable domain is required, matching the behavior of
/// the model's training-time extractor).
pub fn public_suffix(host: &str) -> Option<String> {
    let host = host.to_ascii_lowercase();
    let host = host.trim_end_matches('.');
    if host.is_empty() {
        return None;
    }

    let domain = psl::domain(host.as_bytes())?;
    let suffix = domain.suffix();
    if !suffix.is_known() {
        return None;
    }
    std::str::from_utf8(suffix.as_bytes())
        .ok()
        .map(str::to_owned)
}

/// Resolve the public suffix of a full URL string, going through the
/// authority component. Schemeless and authority-less inputs resolve to
/// `None`.
pub fn url_suffix(url: &str) -> Option<String> {
    public_suffix(UrlParts::split(url).host()?)
}

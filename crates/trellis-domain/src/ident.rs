//! Deterministic identifier derivation
//!
//! Every identifier in Trellis is derived from the content it names: page ids
//! from the normalized URL, concept ids from the normalized label, edge ids
//! from the ordered endpoint pair. Derivation must be stable across process
//! restarts, which is why ids are content digests rather than random values.

use sha2::{Digest, Sha256};

/// Derive a compact stable identifier from arbitrary input.
///
/// The first 8 bytes of the SHA-256 digest, rendered as 16 lowercase hex
/// characters. Collisions over a single-user archive of a few thousand
/// entities are not a practical concern at 64 bits.
///
/// # Examples
///
/// ```
/// use trellis_domain::ident::digest_id;
///
/// let a = digest_id("https://example.com/post");
/// let b = digest_id("https://example.com/post");
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 16);
/// ```
pub fn digest_id(input: &str) -> String {
    let hash = Sha256::digest(input.as_bytes());
    hash[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Normalize a URL before id derivation.
///
/// Trims whitespace, drops any fragment, drops a trailing slash on the path,
/// and lower-cases the scheme and host. Query strings are kept: two URLs
/// differing only in query parameters are distinct pages.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    let without_fragment = match trimmed.split_once('#') {
        Some((head, _)) => head,
        None => trimmed,
    };
    let without_slash = without_fragment
        .strip_suffix('/')
        .unwrap_or(without_fragment);

    // Lower-case only up to the end of the authority; paths are case-sensitive.
    match without_slash.find("://") {
        Some(scheme_end) => {
            let authority_start = scheme_end + 3;
            let rest = &without_slash[authority_start..];
            let authority_end = rest.find('/').map(|i| authority_start + i);
            match authority_end {
                Some(end) => format!(
                    "{}{}",
                    without_slash[..end].to_lowercase(),
                    &without_slash[end..]
                ),
                None => without_slash.to_lowercase(),
            }
        }
        None => without_slash.to_string(),
    }
}

/// Normalize a concept label before id derivation.
///
/// Lower-cases, trims, and collapses internal whitespace so that
/// "Neural  Networks" and "neural networks" converge on one concept.
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

//! URL eligibility gate

use crate::config::CaptureConfig;
use crate::error::CaptureRejection;
use url::Url;

/// Check whether a URL is worth capturing at all.
///
/// Rejects non-web schemes, hosts on the skip list (including their
/// subdomains), and paths that end in a clearly non-text extension.
pub fn check_url(raw: &str, config: &CaptureConfig) -> Result<Url, CaptureRejection> {
    let parsed = Url::parse(raw).map_err(|e| CaptureRejection::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(CaptureRejection::UnsupportedScheme(other.to_string())),
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| CaptureRejection::InvalidUrl("missing host".to_string()))?;

    for skipped in &config.skip_domains {
        if host == skipped || host.ends_with(&format!(".{}", skipped)) {
            return Err(CaptureRejection::SkippedDomain(host.to_string()));
        }
    }

    let path = parsed.path().to_lowercase();
    for ext in &config.blocked_extensions {
        if path.ends_with(ext.as_str()) {
            return Err(CaptureRejection::NonTextResource(ext.clone()));
        }
    }

    Ok(parsed)
}

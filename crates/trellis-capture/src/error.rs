//! Rejection reasons for page capture

use thiserror::Error;

/// Why a page was not captured.
///
/// Rejections are expected outcomes, not failures: the pipeline treats every
/// variant as "silently skip this page."
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureRejection {
    /// URL could not be parsed at all
    #[error("URL not parseable: {0}")]
    InvalidUrl(String),

    /// Scheme is not http or https (browser-internal pages and the like)
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// Host is on the configured skip list
    #[error("domain is on the skip list: {0}")]
    SkippedDomain(String),

    /// Path points at a clearly non-text resource
    #[error("non-text resource: {0}")]
    NonTextResource(String),

    /// No selector, scoring, or fallback produced any body text
    #[error("no usable body text")]
    EmptyBody,

    /// Body text is below the hard word floor
    #[error("too short: {words} words (minimum {min})")]
    TooShort {
        /// Words found
        words: usize,
        /// Floor that was not met
        min: usize,
    },

    /// Extracted text carries no natural-language signal (likely UI chrome)
    #[error("no natural-language signal in extracted text")]
    NotNaturalLanguage,
}

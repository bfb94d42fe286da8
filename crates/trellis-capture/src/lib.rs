//! Trellis Capture
//!
//! Turns a page's raw HTML into [`CapturedContent`]: cleaned plain text plus
//! metadata, or an explicit rejection when the page is not worth keeping.
//!
//! # Overview
//!
//! Capture is a pure function over the page source. It never mutates its
//! input and has no side effects; everything downstream (analysis, graph
//! updates) happens in the pipeline.
//!
//! The stages, in order:
//!
//! 1. **Eligibility**: URL scheme, skip-domain list, non-text extensions
//! 2. **Title resolution**: social-card metadata, then first heading, then `<title>`
//! 3. **Body resolution**: semantic containers, then top-scored paragraphs,
//!    then the whole body with aggressive junk removal
//! 4. **Validity**: hard word floor, natural-language signal
//! 5. **Classification**: heuristic content type
//!
//! # Example
//!
//! ```
//! use trellis_capture::{capture_page, CaptureConfig};
//!
//! let html = r#"<html><head><title>Post</title></head><body><article>
//!   <p>The quick brown fox jumped over the lazy dog. It was a fine day,
//!   and the dog did not mind. The fox kept running through the field
//!   toward the river, where the water was cold and clear and the reeds
//!   grew tall in the summer sun. Every animal in the valley knew the
//!   fox, and the fox knew every path in the valley. When the evening
//!   came it returned to the den, tired and satisfied with the day.
//!   The next morning it started over again, as foxes do, with the
//!   same hunger and the same bright eyes that it always had.</p>
//! </article></body></html>"#;
//!
//! let captured = capture_page("https://example.com/post", html, &CaptureConfig::default()).unwrap();
//! assert_eq!(captured.metadata.domain, "example.com");
//! ```

#![warn(missing_docs)]

mod config;
mod content_type;
mod eligibility;
mod error;
mod extract;
mod language;

pub use config::CaptureConfig;
pub use content_type::{classify, DEFAULT_CONTENT_TYPE};
pub use error::CaptureRejection;
pub use extract::capture_page;

//! noscript clean
//!
//! Strips scripts, empty containers, chrome elements and selected
//! attributes from a parsed HTML document, optionally injecting a heading.
//!
//! # Example
//! ```rust
//! use noscript_clean::Sanitizer;
//!
//! let mut doc = noscript_html::parse("<body><div> </div><p>kept</p><script>x()</script></body>");
//! let report = Sanitizer::new().sanitize(&mut doc);
//! assert_eq!(report.total(), 2);
//! assert_eq!(noscript_html::serialize(&doc), "<html><head></head><body><p>kept</p></body></html>");
//! ```

mod file;
mod pass;
pub mod rules;
mod sanitizer;

pub use file::{CleanError, CleanOptions, CleanOutcome, clean_file};
pub use pass::{Pass, PassError};
pub use sanitizer::{SanitizeReport, Sanitizer};

use noscript_dom::Document;

/// Run every pass over `doc`, injecting `heading` when it is non-empty
pub fn sanitize(doc: &mut Document, heading: Option<&str>) -> SanitizeReport {
    let sanitizer = match heading {
        Some(text) => Sanitizer::new().with_heading(text),
        None => Sanitizer::new(),
    };
    sanitizer.sanitize(doc)
}

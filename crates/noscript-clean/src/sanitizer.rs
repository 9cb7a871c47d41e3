//! Sanitizer - runs the cleaning passes in order

use std::fmt;

use noscript_dom::Document;

use crate::Pass;
use crate::pass::PassError;

/// Applies every [`Pass`] to a document, in order
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    heading: Option<String>,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the `<h1>` to inject. Empty text disables injection.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Heading that will be injected, if any
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref().filter(|h| !h.is_empty())
    }

    /// Mutate `doc` in place through every pass.
    ///
    /// Missing structure (no article, no matches) is not an error; the
    /// pass simply changes nothing.
    pub fn sanitize(&self, doc: &mut Document) -> SanitizeReport {
        let mut report = SanitizeReport::default();
        for pass in Pass::ALL {
            report.record(pass, pass.apply(doc, self.heading()));
        }
        report
    }
}

/// What each pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    counts: [usize; Pass::ALL.len()],
}

impl SanitizeReport {
    /// Store a pass result; a failed pass keeps the changes it made
    /// before stopping
    fn record(&mut self, pass: Pass, result: Result<usize, PassError>) {
        let count = match result {
            Ok(count) => {
                tracing::debug!(pass = pass.name(), count, "pass finished");
                count
            }
            Err(err) => {
                tracing::warn!(pass = pass.name(), %err, "pass aborted");
                err.completed
            }
        };
        self.counts[pass.index()] = count;
    }

    /// Nodes (or attributes) touched by one pass
    pub fn count(&self, pass: Pass) -> usize {
        self.counts[pass.index()]
    }

    /// Sum over all passes
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn heading_inserted(&self) -> bool {
        self.count(Pass::InjectHeading) > 0
    }

    /// Per-pass counts in execution order
    pub fn iter(&self) -> impl Iterator<Item = (Pass, usize)> + '_ {
        Pass::ALL.into_iter().map(|pass| (pass, self.count(pass)))
    }
}

impl fmt::Display for SanitizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (pass, count) in self.iter().filter(|(_, count)| *count > 0) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", pass.name(), count)?;
            first = false;
        }
        if first {
            f.write_str("no changes")?;
        }
        Ok(())
    }
}

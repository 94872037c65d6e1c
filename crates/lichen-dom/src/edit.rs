//! Span-based source edits.
//!
//! Because every node carries exact byte offsets into the original text, a
//! rewrite is just a set of `(span, replacement)` pairs. [`EditSet::apply`]
//! splices them into a copy of the source in descending start order, so
//! earlier offsets stay valid while later spans are replaced. All bytes
//! outside the edited spans are preserved exactly; applying zero edits
//! returns the source unchanged.
//!
//! Overlapping edits are a consumer error and are not detected here.

use crate::Span;

/// A single replacement of one source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanEdit {
    /// The byte range of the original source to replace.
    pub span: Span,
    /// The text to put in its place.
    pub replacement: String,
}

/// An ordered collection of span edits, typically gathered during a visitor
/// walk and applied once traversal is done.
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    edits: Vec<SpanEdit>,
}

impl EditSet {
    /// Create an empty edit set.
    #[must_use]
    pub const fn new() -> Self {
        Self { edits: Vec::new() }
    }

    /// Record a replacement for one span.
    pub fn replace(&mut self, span: Span, replacement: impl Into<String>) {
        self.edits.push(SpanEdit {
            span,
            replacement: replacement.into(),
        });
    }

    /// Number of recorded edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns true if no edits have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply all recorded edits to `source` and return the rewritten text.
    ///
    /// Edits are applied in descending order of start offset, so every span
    /// still refers to the original source exactly as supplied.
    ///
    /// # Panics
    ///
    /// Panics if an edit's span does not lie within `source` on character
    /// boundaries, i.e. the spans were taken from a different text.
    #[must_use]
    pub fn apply(mut self, source: &str) -> String {
        self.edits
            .sort_by(|a, b| b.span.start.cmp(&a.span.start));
        let mut rewritten = source.to_string();
        for edit in &self.edits {
            rewritten.replace_range(edit.span.start..edit.span.end, &edit.replacement);
        }
        rewritten
    }
}

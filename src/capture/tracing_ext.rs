//! Tracing integration for capture.
//!
//! Records which span was active when an error was captured, so a stored
//! record can be correlated with the surrounding log output.
//!
//! # Feature Flag
//!
//! Requires the `tracing` feature (enabled by default).

use tracing::Span;

use super::ErrorRecordBuilder;

/// Custom-data key holding the span name.
pub const SPAN_KEY: &str = "span";

impl ErrorRecordBuilder<'_> {
    /// Records the current span's name under the `"span"` custom-data key.
    ///
    /// Does nothing when no span is active or the span is disabled.
    pub fn with_current_span(self) -> Self {
        self.with_span(&Span::current())
    }

    /// Records `span`'s name under the `"span"` custom-data key.
    pub fn with_span(self, span: &Span) -> Self {
        match span.metadata() {
            Some(metadata) => self.custom_data(SPAN_KEY, metadata.name()),
            None => self,
        }
    }
}

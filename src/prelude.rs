//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use error_record::prelude::*;
//!
//! let record = ErrorRecord::builder(CaptureConfig::new("shop", "web01"))
//!     .error(HttpError::new(404, "order 7 not found"))
//!     .request(&CapturedRequest::new().server_variable("URL", "/orders/7"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(record.status_code(), Some(404));
//! assert_eq!(record.url(), "/orders/7");
//! ```

// Core types
pub use crate::types::{ErrorRecord, HttpError, OrderedMultiMap};

// Capture
pub use crate::capture::{ErrorRecordBuilder, UnwrapRule};
pub use crate::config::CaptureConfig;
pub use crate::traits::{CapturedRequest, RequestContext, RequestCookie};

// Errors
pub use crate::error::{RecordError, RecordResult};

//! Error records for error-tracking services.
//!
//! An [`ErrorRecord`] is one captured occurrence of an application error. It
//! carries a portable GUID, the promoted type/message/source of the error, the
//! full detail text, a snapshot of the triggering request, and a
//! [fingerprint](FingerprintConfig) used to roll repeated occurrences into one
//! stored record.
//!
//! Request collections (server variables, query string, form, cookies) are
//! [`OrderedMultiMap`]s: names may repeat and order matters. On the wire they
//! are always ordered `{name, value}` pair sequences (see [`convert`]).
//!
//! # Examples
//!
//! ## Capture and Store
//!
//! ```
//! use error_record::{CaptureConfig, CapturedRequest, ErrorRecord, ErrorRecordBuilder};
//!
//! let request = CapturedRequest::new()
//!     .server_variable("HTTP_HOST", "example.com")
//!     .with_query_string("a=1&a=2");
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! let record = ErrorRecordBuilder::new(CaptureConfig::new("shop", "web01"))
//!     .error(err)
//!     .request(&request)
//!     .build()
//!     .unwrap();
//!
//! let stored = record.to_json().unwrap();
//! let loaded = ErrorRecord::from_json(&stored).unwrap();
//! assert_eq!(loaded.query_string(), record.query_string());
//! ```
//!
//! ## Rollup
//!
//! ```
//! use error_record::{CaptureConfig, ErrorRecordBuilder};
//!
//! let config = CaptureConfig::new("shop", "web01");
//! let first = ErrorRecordBuilder::new(config.clone())
//!     .error(std::fmt::Error)
//!     .build()
//!     .unwrap();
//! let mut stored = ErrorRecordBuilder::new(config)
//!     .error(std::fmt::Error)
//!     .build()
//!     .unwrap();
//!
//! if stored.matches_for_rollup(&first) {
//!     stored.increment_duplicate_count(1);
//! }
//! assert_eq!(stored.duplicate_count(), 2);
//! ```

/// Capturing records from errors and request data
pub mod capture;
/// Process-wide capture settings
pub mod config;
/// Multi-map wire representation
pub mod convert;
/// Errors raised by the record model
pub mod error;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Traits at the producer boundary
pub mod traits;
/// ErrorRecord and supporting types
pub mod types;

pub use capture::{ErrorRecordBuilder, UnwrapRule};
pub use config::CaptureConfig;
pub use convert::NameValuePair;
pub use error::{RecordError, RecordResult};
pub use traits::{CapturedRequest, RequestContext, RequestCookie};
pub use types::{
    compute_fingerprint, DetailedRecord, ErrorRecord, FingerprintConfig, HttpError,
    OrderedMultiMap,
};

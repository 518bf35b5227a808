//! Record model types.
//!
//! # Examples
//!
//! ```
//! use error_record::{CaptureConfig, ErrorRecordBuilder};
//!
//! let err = "x".parse::<u32>().unwrap_err();
//! let record = ErrorRecordBuilder::new(CaptureConfig::new("billing", "worker-3"))
//!     .error(err)
//!     .build()
//!     .unwrap();
//!
//! println!("{record}");
//! // core::num::error::ParseIntError: invalid digit found in string
//! ```

pub mod error_record;
pub mod http_error;
pub mod multi_map;

pub use error_record::*;
pub use http_error::HttpError;
pub use multi_map::OrderedMultiMap;

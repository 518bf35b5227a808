//! Traits at the boundary between the record model and its producers.
//!
//! - [`RequestContext`]: request data a capture site can offer, with
//!   [`CapturedRequest`] as an owned implementation.

pub mod request_context;

pub use request_context::{CapturedRequest, RequestContext, RequestCookie};

//! Errors that carry a protocol status code.

use core::fmt;
use std::error::Error;

/// An error raised while serving a request, carrying the response status.
///
/// When an `HttpError` appears anywhere on a captured error's cause chain,
/// its status becomes the record's `status_code`.
///
/// # Examples
///
/// ```
/// use error_record::HttpError;
///
/// let err = HttpError::new(404, "order 7 not found");
/// assert_eq!(err.status(), 404);
/// assert_eq!(err.to_string(), "order 7 not found");
/// ```
#[derive(Debug)]
pub struct HttpError {
    status: u16,
    message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl HttpError {
    pub fn new<M: Into<String>>(status: u16, message: M) -> Self {
        Self { status, message: message.into(), source: None }
    }

    /// Attaches the error that caused this response.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for HttpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

//! Building an [`ErrorRecord`] from a raised error and optional request data.
//!
//! Capture fixes everything that identifies the occurrence: a fresh GUID, the
//! application and machine names from [`CaptureConfig`], the creation time,
//! the promoted type/message/source, the detail text, and the fingerprint.
//!
//! # Examples
//!
//! ```
//! use error_record::{CaptureConfig, CapturedRequest, ErrorRecordBuilder};
//!
//! let request = CapturedRequest::new()
//!     .server_variable("HTTP_HOST", "example.com")
//!     .with_query_string("a=1&a=2");
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! let record = ErrorRecordBuilder::new(CaptureConfig::new("shop", "web01"))
//!     .error(err)
//!     .request(&request)
//!     .custom_data("order", "7")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(record.message(), "disk full");
//! assert_eq!(record.host(), "example.com");
//! assert!(record.fingerprint().is_some());
//! ```

use core::any::type_name;
use core::fmt::Write;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::{self, CaptureConfig, REDACTED};
use crate::error::{RecordError, RecordResult};
use crate::traits::RequestContext;
use crate::types::error_record::{RawError, REMOTE_ADDR};
use crate::types::{compute_fingerprint, ErrorRecord, HttpError, OrderedMultiMap};

#[cfg(feature = "tracing")]
mod tracing_ext;
mod unwrap;

#[cfg(feature = "tracing")]
pub use tracing_ext::SPAN_KEY;
pub use unwrap::{builtin_type_name, UnwrapRule};

/// Builder that classifies an error and snapshots request data into an [`ErrorRecord`].
#[must_use]
pub struct ErrorRecordBuilder<'a> {
    config: CaptureConfig,
    error: Option<(RawError, Option<&'static str>)>,
    request: Option<&'a dyn RequestContext>,
    status_code: Option<u16>,
    custom_data: Option<BTreeMap<String, String>>,
    sql_text: Option<String>,
}

impl<'a> ErrorRecordBuilder<'a> {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            error: None,
            request: None,
            status_code: None,
            custom_data: None,
            sql_text: None,
        }
    }

    /// Starts from the process-wide configuration (see [`config::global`]).
    pub fn from_global() -> Self {
        Self::new(config::global().clone())
    }

    /// The error to capture. Its concrete type names the record when it is not unwrapped.
    pub fn error<E>(mut self, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.error = Some((Arc::new(error), Some(type_name::<E>())));
        self
    }

    /// The error to capture, already type-erased.
    pub fn shared_error(mut self, error: RawError) -> Self {
        self.error = Some((error, None));
        self
    }

    pub fn request(mut self, request: &'a dyn RequestContext) -> Self {
        self.request = Some(request);
        self
    }

    /// Overrides any status code found on the cause chain.
    pub fn status_code(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn custom_data<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn sql_text<S: Into<String>>(mut self, sql: S) -> Self {
        self.sql_text = Some(sql.into());
        self
    }

    /// Captures the record.
    ///
    /// # Errors
    ///
    /// [`RecordError::MissingError`] if no error was supplied.
    pub fn build(mut self) -> RecordResult<ErrorRecord> {
        let Some((raw, outer_type)) = self.error.take() else {
            return Err(RecordError::MissingError);
        };
        Ok(self.assemble(raw, outer_type))
    }

    fn assemble(self, raw: RawError, outer_type: Option<&'static str>) -> ErrorRecord {
        let Classified { error_type, source, message, detail, status_code } =
            classify(&*raw, outer_type, &self.config);
        let status_code = self.status_code.or(status_code);

        let fingerprint = compute_fingerprint(
            &detail,
            &self.config.machine_name,
            self.config.rollup_per_server,
        );

        let (server_variables, query_string, form, cookies) = match self.request {
            Some(request) => {
                let (server, query, mut form, mut cookies) = snapshot(request);
                for name in &self.config.redacted_form_fields {
                    form.redact(name, REDACTED);
                }
                for name in &self.config.redacted_cookies {
                    cookies.redact(name, REDACTED);
                }
                (Some(server), Some(query), Some(form), Some(cookies))
            },
            None => (None, None, None, None),
        };

        let mut record = ErrorRecord {
            id: None,
            guid: Uuid::new_v4(),
            application_name: self.config.application_name,
            machine_name: self.config.machine_name,
            error_type,
            message,
            source,
            detail,
            creation_date: Some(Utc::now()),
            status_code,
            server_variables,
            query_string,
            form,
            cookies,
            custom_data: self.custom_data,
            duplicate_count: 1,
            fingerprint,
            is_protected: false,
            deletion_date: None,
            sql_text: self.sql_text,
            host: String::new(),
            url: String::new(),
            http_method: String::new(),
            ip_address: String::new(),
            exception: Some(raw),
        };
        record.apply_request_summary();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            guid = %record.guid,
            error_type = %record.error_type,
            fingerprint = ?record.fingerprint,
            has_request = record.server_variables.is_some(),
            "captured error record"
        );

        record
    }
}

/// Type, message and detail derived from an error and its cause chain.
struct Classified {
    error_type: String,
    source: String,
    message: String,
    detail: String,
    status_code: Option<u16>,
}

fn classify(
    outer: &(dyn Error + 'static),
    outer_type: Option<&'static str>,
    config: &CaptureConfig,
) -> Classified {
    let chain = unwrap::cause_chain(outer);
    let names: Vec<String> = chain
        .iter()
        .enumerate()
        .map(|(i, err)| {
            let name = match (i, outer_type) {
                (0, Some(name)) => name.to_owned(),
                _ => unwrap::describe_type(*err),
            };
            unwrap::qualify(name, *err)
        })
        .collect();

    let promoted = if config.unwrap_rule.should_unwrap(outer) { chain.len() - 1 } else { 0 };
    let error_type = names[promoted].clone();
    let source = unwrap::source_of(&error_type).to_owned();
    let message = chain[promoted].to_string();

    let mut detail = String::new();
    for (i, (err, name)) in chain.iter().zip(&names).enumerate() {
        if i > 0 {
            detail.push_str("\n ---> ");
        }
        let _ = write!(detail, "{name}: {err}");
    }
    if config.capture_backtrace {
        let backtrace = Backtrace::force_capture();
        if backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(detail, "\n{backtrace}");
        }
    }

    let status_code = chain
        .iter()
        .find_map(|err| err.downcast_ref::<HttpError>())
        .map(HttpError::status);

    Classified { error_type, source, message, detail, status_code }
}

fn snapshot(
    request: &dyn RequestContext,
) -> (OrderedMultiMap, OrderedMultiMap, OrderedMultiMap, OrderedMultiMap) {
    let mut server = request.server_variables();
    if !server.contains_key(REMOTE_ADDR) {
        if let Some(addr) = request.remote_addr() {
            server.add(REMOTE_ADDR, addr.to_string());
        }
    }

    let cookies = request
        .cookies()
        .into_iter()
        .map(|cookie| (cookie.name, cookie.value))
        .collect();

    (server, request.query_string(), request.form(), cookies)
}

impl ErrorRecord {
    /// Captures `error` with the process-wide configuration.
    ///
    /// The error is required by the signature, so unlike
    /// [`ErrorRecordBuilder::build`] this cannot fail.
    pub fn capture<E>(error: E, request: Option<&dyn RequestContext>) -> ErrorRecord
    where
        E: Error + Send + Sync + 'static,
    {
        let mut builder = ErrorRecordBuilder::from_global();
        builder.request = request;
        builder.assemble(Arc::new(error), Some(type_name::<E>()))
    }

    /// Starts a builder with an explicit configuration.
    pub fn builder<'a>(config: CaptureConfig) -> ErrorRecordBuilder<'a> {
        ErrorRecordBuilder::new(config)
    }
}

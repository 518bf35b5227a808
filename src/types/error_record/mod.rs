//! The error record: one captured occurrence of an application error.
//!
//! [`ErrorRecord`] holds the identity of the occurrence, the promoted
//! type/message/source triplet, the full detail text, a snapshot of the
//! triggering request, and the rollup [fingerprint](FingerprintConfig).
//!
//! Records are produced by [`ErrorRecordBuilder`](crate::capture::ErrorRecordBuilder)
//! and afterwards only touched by the store layer (id, duplicate count,
//! deletion and protection flags).

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::types::OrderedMultiMap;

mod detailed;
mod fingerprint;
mod json;
mod request;
mod traits;

pub use detailed::DetailedRecord;
pub use fingerprint::{compute_fingerprint, FingerprintConfig};
pub use request::UNKNOWN_IP;

pub(crate) use request::{RequestSummary, QUERY_STRING, REMOTE_ADDR};

/// Shared handle to the raw error a record was captured from.
pub type RawError = Arc<dyn Error + Send + Sync + 'static>;

/// One occurrence of an application error.
///
/// `Clone` deep-copies every request collection and the custom data, so a clone
/// can be handed to another thread without observing later store-side changes.
/// The raw error handle is shared. Equality ignores the raw error handle.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", from = "json::StoredRecord")]
pub struct ErrorRecord {
    #[serde(skip)]
    pub(crate) id: Option<i64>,
    pub(crate) guid: Uuid,
    pub(crate) application_name: String,
    pub(crate) machine_name: String,
    pub(crate) error_type: String,
    pub(crate) message: String,
    pub(crate) source: String,
    pub(crate) detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) creation_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) status_code: Option<u16>,
    #[serde(
        rename = "serverVariablesSerializable",
        with = "crate::convert::pairs",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) server_variables: Option<OrderedMultiMap>,
    #[serde(
        rename = "queryStringSerializable",
        with = "crate::convert::pairs",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) query_string: Option<OrderedMultiMap>,
    #[serde(
        rename = "formSerializable",
        with = "crate::convert::pairs",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) form: Option<OrderedMultiMap>,
    #[serde(
        rename = "cookiesSerializable",
        with = "crate::convert::pairs",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) cookies: Option<OrderedMultiMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) custom_data: Option<BTreeMap<String, String>>,
    pub(crate) duplicate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) fingerprint: Option<i32>,
    pub(crate) is_protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) deletion_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sql_text: Option<String>,
    pub(crate) host: String,
    pub(crate) url: String,
    pub(crate) http_method: String,
    pub(crate) ip_address: String,
    #[serde(skip)]
    pub(crate) exception: Option<RawError>,
}

impl ErrorRecord {
    /// Store-assigned sequence number, if the record has been persisted.
    #[inline]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Portable identity of this occurrence.
    #[inline]
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    #[inline]
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    #[inline]
    pub fn machine_name(&self) -> &str {
        &self.machine_name
    }

    /// Type name of the promoted error.
    ///
    /// The captured error itself is named by its full path (`type_name`), so
    /// `source` is its crate. A cause reached by unwrapping is known only as a
    /// trait object and is named by the leading identifier of its `Debug`
    /// output, without a path; its `source` is then empty. Standard-library
    /// errors keep their full path in both positions, and an `io::Error`
    /// carries its kind, as in `std::io::error::Error (NotFound)`.
    #[inline]
    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Full human-readable text of the original error and its cause chain.
    #[inline]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    #[inline]
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    #[inline]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    #[inline]
    pub fn server_variables(&self) -> Option<&OrderedMultiMap> {
        self.server_variables.as_ref()
    }

    #[inline]
    pub fn query_string(&self) -> Option<&OrderedMultiMap> {
        self.query_string.as_ref()
    }

    #[inline]
    pub fn form(&self) -> Option<&OrderedMultiMap> {
        self.form.as_ref()
    }

    #[inline]
    pub fn cookies(&self) -> Option<&OrderedMultiMap> {
        self.cookies.as_ref()
    }

    /// Mutable query string, for scrubbing values before hand-off.
    #[inline]
    pub fn query_string_mut(&mut self) -> Option<&mut OrderedMultiMap> {
        self.query_string.as_mut()
    }

    /// Mutable form fields, for scrubbing values before hand-off.
    #[inline]
    pub fn form_mut(&mut self) -> Option<&mut OrderedMultiMap> {
        self.form.as_mut()
    }

    /// Mutable cookies, for scrubbing values before hand-off.
    #[inline]
    pub fn cookies_mut(&mut self) -> Option<&mut OrderedMultiMap> {
        self.cookies.as_mut()
    }

    #[inline]
    pub fn custom_data(&self) -> Option<&BTreeMap<String, String>> {
        self.custom_data.as_ref()
    }

    /// Occurrences collapsed into this record, including the first.
    #[inline]
    pub fn duplicate_count(&self) -> u32 {
        self.duplicate_count
    }

    /// Rollup fingerprint; `None` means the record is not comparable.
    #[inline]
    pub fn fingerprint(&self) -> Option<i32> {
        self.fingerprint
    }

    #[inline]
    pub fn is_protected(&self) -> bool {
        self.is_protected
    }

    #[inline]
    pub fn deletion_date(&self) -> Option<DateTime<Utc>> {
        self.deletion_date
    }

    #[inline]
    pub fn sql_text(&self) -> Option<&str> {
        self.sql_text.as_deref()
    }

    /// `HTTP_HOST` server variable, or empty.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// `URL` server variable, or empty.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `REQUEST_METHOD` server variable, or empty.
    #[inline]
    pub fn http_method(&self) -> &str {
        &self.http_method
    }

    /// Client address resolved from the server variables, or empty without them.
    #[inline]
    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    /// Raw `QUERY_STRING` server variable, if present.
    #[inline]
    pub fn raw_query_string(&self) -> Option<&str> {
        self.server_variables.as_ref().and_then(|v| v.get(QUERY_STRING))
    }

    /// The error this record was captured from. Not available after deserialization.
    #[inline]
    pub fn exception(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.exception.as_deref()
    }

    /// Whether `other` should be rolled up into this record.
    ///
    /// Records without a fingerprint never match anything, including each other.
    pub fn matches_for_rollup(&self, other: &ErrorRecord) -> bool {
        matches!((self.fingerprint, other.fingerprint), (Some(a), Some(b)) if a == b)
    }

    /// Records the store-assigned sequence number.
    #[inline]
    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Adds rolled-up occurrences. The count never decreases.
    #[inline]
    pub fn increment_duplicate_count(&mut self, by: u32) {
        self.duplicate_count = self.duplicate_count.saturating_add(by);
    }

    /// Marks the record soft-deleted at `at`.
    #[inline]
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deletion_date = Some(at);
    }

    /// Protects the record from retention sweeps (or lifts protection).
    #[inline]
    pub fn set_protected(&mut self, protected: bool) {
        self.is_protected = protected;
    }

    /// Attaches a caller-supplied key/value. An existing key is replaced.
    pub fn add_custom_data<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    /// Associates the database command that was running when the error occurred.
    #[inline]
    pub fn set_sql_text<S: Into<String>>(&mut self, sql: S) {
        self.sql_text = Some(sql.into());
    }

    pub(crate) fn apply_request_summary(&mut self) {
        let RequestSummary { host, url, http_method, ip_address } =
            RequestSummary::from_server_variables(self.server_variables.as_ref());
        self.host = host;
        self.url = url;
        self.http_method = http_method;
        self.ip_address = ip_address;
    }
}

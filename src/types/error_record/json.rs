//! Full and detailed JSON forms of an [`ErrorRecord`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{DetailedRecord, ErrorRecord};
use crate::error::{RecordError, RecordResult};
use crate::types::OrderedMultiMap;

/// Stored shape of a record. Derived request fields are not read back; they are
/// recomputed from the server variables.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoredRecord {
    guid: Uuid,
    #[serde(default)]
    application_name: String,
    #[serde(default)]
    machine_name: String,
    #[serde(default)]
    error_type: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    detail: String,
    #[serde(default)]
    creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(rename = "serverVariablesSerializable", default, with = "crate::convert::pairs")]
    server_variables: Option<OrderedMultiMap>,
    #[serde(rename = "queryStringSerializable", default, with = "crate::convert::pairs")]
    query_string: Option<OrderedMultiMap>,
    #[serde(rename = "formSerializable", default, with = "crate::convert::pairs")]
    form: Option<OrderedMultiMap>,
    #[serde(rename = "cookiesSerializable", default, with = "crate::convert::pairs")]
    cookies: Option<OrderedMultiMap>,
    #[serde(default)]
    custom_data: Option<BTreeMap<String, String>>,
    #[serde(default = "first_occurrence")]
    duplicate_count: u32,
    #[serde(default)]
    fingerprint: Option<i32>,
    #[serde(default)]
    is_protected: bool,
    #[serde(default)]
    deletion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    sql_text: Option<String>,
}

fn first_occurrence() -> u32 {
    1
}

impl From<StoredRecord> for ErrorRecord {
    fn from(stored: StoredRecord) -> Self {
        let mut record = ErrorRecord {
            id: None,
            guid: stored.guid,
            application_name: stored.application_name,
            machine_name: stored.machine_name,
            error_type: stored.error_type,
            message: stored.message,
            source: stored.source,
            detail: stored.detail,
            creation_date: stored.creation_date,
            status_code: stored.status_code,
            server_variables: stored.server_variables,
            query_string: stored.query_string,
            form: stored.form,
            cookies: stored.cookies,
            custom_data: stored.custom_data,
            duplicate_count: stored.duplicate_count.max(1),
            fingerprint: stored.fingerprint,
            is_protected: stored.is_protected,
            deletion_date: stored.deletion_date,
            sql_text: stored.sql_text,
            host: String::new(),
            url: String::new(),
            http_method: String::new(),
            ip_address: String::new(),
            exception: None,
        };
        record.apply_request_summary();
        record
    }
}

impl ErrorRecord {
    /// Serializes the full, round-trippable form.
    ///
    /// # Examples
    ///
    /// ```
    /// use error_record::{CaptureConfig, ErrorRecord, ErrorRecordBuilder};
    ///
    /// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    /// let record = ErrorRecordBuilder::new(CaptureConfig::new("shop", "web01"))
    ///     .error(err)
    ///     .build()
    ///     .unwrap();
    ///
    /// let json = record.to_json().unwrap();
    /// let back = ErrorRecord::from_json(&json).unwrap();
    /// assert_eq!(back.guid(), record.guid());
    /// assert_eq!(back.fingerprint(), record.fingerprint());
    /// ```
    pub fn to_json(&self) -> RecordResult<String> {
        serde_json::to_string(self).map_err(RecordError::Serialize)
    }

    /// Serializes the full form with indentation.
    pub fn to_json_pretty(&self) -> RecordResult<String> {
        serde_json::to_string_pretty(self).map_err(RecordError::Serialize)
    }

    /// Parses a record written by [`to_json`](Self::to_json).
    ///
    /// The store-assigned `id` is not part of the wire form and comes back as `None`.
    pub fn from_json(json: &str) -> RecordResult<Self> {
        let record: ErrorRecord = serde_json::from_str(json).map_err(RecordError::Malformed)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(guid = %record.guid, "deserialized error record");

        Ok(record)
    }

    /// Borrowing display projection of this record.
    #[inline]
    pub fn to_detailed(&self) -> DetailedRecord<'_> {
        DetailedRecord::from(self)
    }

    /// Serializes the detailed (display) form.
    pub fn to_detailed_json(&self) -> RecordResult<String> {
        serde_json::to_string(&self.to_detailed()).map_err(RecordError::Serialize)
    }
}

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use super::ErrorRecord;
use crate::convert::last_value_map;

/// Flattened, display-oriented projection of an [`ErrorRecord`].
///
/// Timestamps are epoch seconds and omitted when absent. Request collections
/// are reduced to name → last value, so duplicate names lose all but their
/// final value. This form is write-only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedRecord<'a> {
    pub guid: Uuid,
    pub application_name: &'a str,
    pub machine_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<&'a BTreeMap<String, String>>,
    pub error_type: &'a str,
    pub message: &'a str,
    pub source: &'a str,
    pub detail: &'a str,
    pub duplicate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_hash: Option<i32>,
    pub is_protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_text: Option<&'a str>,
    pub host: &'a str,
    pub url: &'a str,
    pub http_method: &'a str,
    pub ip_address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_variables: Option<BTreeMap<&'a str, &'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_variables: Option<BTreeMap<&'a str, &'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string_variables: Option<BTreeMap<&'a str, &'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_variables: Option<BTreeMap<&'a str, &'a str>>,
}

impl<'a> From<&'a ErrorRecord> for DetailedRecord<'a> {
    fn from(record: &'a ErrorRecord) -> Self {
        Self {
            guid: record.guid,
            application_name: &record.application_name,
            machine_name: &record.machine_name,
            creation_date: record.creation_date.map(|d| d.timestamp()),
            deletion_date: record.deletion_date.map(|d| d.timestamp()),
            custom_data: record.custom_data.as_ref(),
            error_type: &record.error_type,
            message: &record.message,
            source: &record.source,
            detail: &record.detail,
            duplicate_count: record.duplicate_count,
            error_hash: record.fingerprint,
            is_protected: record.is_protected,
            status_code: record.status_code,
            sql_text: record.sql_text.as_deref(),
            host: &record.host,
            url: &record.url,
            http_method: &record.http_method,
            ip_address: &record.ip_address,
            query_string: record.raw_query_string(),
            server_variables: last_value_map(record.server_variables.as_ref()),
            cookie_variables: last_value_map(record.cookies.as_ref()),
            query_string_variables: last_value_map(record.query_string.as_ref()),
            form_variables: last_value_map(record.form.as_ref()),
        }
    }
}

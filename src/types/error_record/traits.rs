use super::ErrorRecord;
use core::fmt::Display;

impl PartialEq for ErrorRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.guid == other.guid
            && self.application_name == other.application_name
            && self.machine_name == other.machine_name
            && self.error_type == other.error_type
            && self.message == other.message
            && self.source == other.source
            && self.detail == other.detail
            && self.creation_date == other.creation_date
            && self.status_code == other.status_code
            && self.server_variables == other.server_variables
            && self.query_string == other.query_string
            && self.form == other.form
            && self.cookies == other.cookies
            && self.custom_data == other.custom_data
            && self.duplicate_count == other.duplicate_count
            && self.fingerprint == other.fingerprint
            && self.is_protected == other.is_protected
            && self.deletion_date == other.deletion_date
            && self.sql_text == other.sql_text
            && self.host == other.host
            && self.url == other.url
            && self.http_method == other.http_method
            && self.ip_address == other.ip_address
    }
}

impl Eq for ErrorRecord {}

impl Display for ErrorRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (status: {code})")?;
        }
        if f.alternate() {
            write!(f, "\n{}", self.detail)?;
        }
        Ok(())
    }
}

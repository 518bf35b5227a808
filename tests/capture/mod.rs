use core::fmt;
use std::error::Error;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use error_record::{
    CaptureConfig, CapturedRequest, ErrorRecord, ErrorRecordBuilder, HttpError, RecordError,
    UnwrapRule,
};

#[derive(Debug)]
struct PaymentDeclined;

impl fmt::Display for PaymentDeclined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("card declined by issuer")
    }
}

impl Error for PaymentDeclined {}

#[derive(Debug)]
struct CheckoutFailed {
    cause: PaymentDeclined,
}

impl fmt::Display for CheckoutFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("checkout failed")
    }
}

impl Error for CheckoutFailed {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

fn config() -> CaptureConfig {
    CaptureConfig::new("shop", "web01")
}

fn capture_with(rule: UnwrapRule, error: impl Error + Send + Sync + 'static) -> ErrorRecord {
    ErrorRecordBuilder::new(config().unwrap_rule(rule))
        .error(error)
        .build()
        .unwrap()
}

#[test]
fn builtin_wrapper_promotes_inner_error() {
    let wrapped = io::Error::new(io::ErrorKind::Other, PaymentDeclined);
    let record = capture_with(UnwrapRule::Builtin, wrapped);

    assert_eq!(record.message(), "card declined by issuer");
    assert_eq!(record.error_type(), "PaymentDeclined");
    assert_eq!(record.source(), "");
    assert!(record
        .detail()
        .starts_with("std::io::error::Error (Other): card declined by issuer"));
    assert!(record.detail().contains("\n ---> PaymentDeclined: card declined by issuer"));
}

#[test]
fn application_error_is_not_unwrapped_by_default() {
    let record = capture_with(UnwrapRule::Builtin, CheckoutFailed { cause: PaymentDeclined });

    assert_eq!(record.message(), "checkout failed");
    assert!(record.error_type().ends_with("capture::CheckoutFailed"));
    assert!(record.error_type().starts_with(record.source()));
    assert!(!record.source().is_empty());
    assert_eq!(record.detail().lines().count(), 2);
    assert!(record.detail().ends_with(" ---> PaymentDeclined: card declined by issuer"));
}

#[test]
fn io_message_error_keeps_its_own_type() {
    let record = capture_with(
        UnwrapRule::Builtin,
        io::Error::new(io::ErrorKind::Other, "disk full"),
    );

    assert_eq!(record.error_type(), "std::io::error::Error (Other)");
    assert_eq!(record.source(), "std");
    assert_eq!(record.message(), "disk full");
    assert_eq!(record.detail(), "std::io::error::Error (Other): disk full");
}

#[test]
fn io_kinds_do_not_roll_up_together() {
    let other = capture_with(UnwrapRule::Builtin, io::Error::new(io::ErrorKind::Other, "boom"));
    let missing =
        capture_with(UnwrapRule::Builtin, io::Error::new(io::ErrorKind::NotFound, "boom"));

    assert_eq!(missing.error_type(), "std::io::error::Error (NotFound)");
    assert_ne!(other.fingerprint(), missing.fingerprint());
    assert!(!other.matches_for_rollup(&missing));
}

#[test]
fn never_rule_keeps_builtin_wrapper() {
    let wrapped = io::Error::new(io::ErrorKind::Other, PaymentDeclined);
    let record = capture_with(UnwrapRule::Never, wrapped);

    assert_eq!(record.error_type(), "std::io::error::Error (Other)");
    assert_eq!(record.source(), "std");
    assert_eq!(record.message(), "card declined by issuer");
}

#[test]
fn always_rule_promotes_innermost_cause() {
    let record = capture_with(UnwrapRule::Always, CheckoutFailed { cause: PaymentDeclined });
    assert_eq!(record.message(), "card declined by issuer");
    assert_eq!(record.error_type(), "PaymentDeclined");
}

#[test]
fn custom_rule_sees_the_outer_error() {
    fn unwrap_checkout(error: &(dyn Error + 'static)) -> bool {
        error.is::<CheckoutFailed>()
    }

    let checkout = CheckoutFailed { cause: PaymentDeclined };
    let record = capture_with(UnwrapRule::Custom(unwrap_checkout), checkout);
    assert_eq!(record.message(), "card declined by issuer");

    let record = capture_with(UnwrapRule::Custom(unwrap_checkout), PaymentDeclined);
    assert_eq!(record.message(), "card declined by issuer");
    assert_eq!(record.detail().lines().count(), 1);
}

#[test]
fn unwrap_rule_does_not_change_detail() {
    let always = capture_with(UnwrapRule::Always, CheckoutFailed { cause: PaymentDeclined });
    let never = capture_with(UnwrapRule::Never, CheckoutFailed { cause: PaymentDeclined });

    assert_eq!(always.detail(), never.detail());
    assert_eq!(always.fingerprint(), never.fingerprint());
}

#[test]
fn outer_errors_carry_a_path_and_unwrapped_causes_do_not() {
    let outer = capture_with(UnwrapRule::Never, PaymentDeclined);
    assert!(outer.error_type().ends_with("capture::PaymentDeclined"));
    assert_eq!(outer.source(), outer.error_type().split("::").next().unwrap());

    let unwrapped = capture_with(UnwrapRule::Always, CheckoutFailed { cause: PaymentDeclined });
    assert_eq!(unwrapped.error_type(), "PaymentDeclined");
    assert_eq!(unwrapped.source(), "");
}

#[test]
fn parse_errors_are_builtin() {
    let err = "seven".parse::<u32>().unwrap_err();
    let record = capture_with(UnwrapRule::Builtin, err);

    assert_eq!(record.error_type(), "core::num::error::ParseIntError");
    assert_eq!(record.source(), "core");
    assert_eq!(record.message(), "invalid digit found in string");
}

#[test]
fn status_code_comes_from_http_error_on_chain() {
    let record = capture_with(UnwrapRule::Builtin, HttpError::new(404, "order 7 not found"));
    assert_eq!(record.status_code(), Some(404));

    let wrapped = io::Error::new(
        io::ErrorKind::Other,
        HttpError::new(502, "upstream failed").with_source(PaymentDeclined),
    );
    let record = capture_with(UnwrapRule::Never, wrapped);
    assert_eq!(record.status_code(), Some(502));
    assert_eq!(record.detail().lines().count(), 3);
}

#[test]
fn explicit_status_code_wins() {
    let record = ErrorRecordBuilder::new(config())
        .error(HttpError::new(404, "order 7 not found"))
        .status_code(410)
        .build()
        .unwrap();
    assert_eq!(record.status_code(), Some(410));

    let record = capture_with(UnwrapRule::Builtin, PaymentDeclined);
    assert_eq!(record.status_code(), None);
}

#[test]
fn build_without_error_fails() {
    let err = ErrorRecordBuilder::new(config()).custom_data("k", "v").build().unwrap_err();
    assert!(matches!(err, RecordError::MissingError));
}

#[test]
fn shared_error_is_captured() {
    let shared: Arc<dyn Error + Send + Sync> = Arc::new(PaymentDeclined);
    let record = ErrorRecordBuilder::new(config())
        .shared_error(shared.clone())
        .build()
        .unwrap();

    assert_eq!(record.error_type(), "PaymentDeclined");
    assert_eq!(Arc::strong_count(&shared), 2);
    drop(record);
    assert_eq!(Arc::strong_count(&shared), 1);
}

#[test]
fn peer_address_fills_missing_remote_addr() {
    let request = CapturedRequest::new()
        .server_variable("HTTP_HOST", "example.com")
        .with_remote_addr(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10)));

    let record = ErrorRecordBuilder::new(config())
        .error(PaymentDeclined)
        .request(&request)
        .build()
        .unwrap();

    assert_eq!(record.ip_address(), "192.0.2.10");
    assert_eq!(record.server_variables().unwrap().get("REMOTE_ADDR"), Some("192.0.2.10"));
}

#[test]
fn explicit_remote_addr_is_kept() {
    let request = CapturedRequest::new()
        .server_variable("REMOTE_ADDR", "198.51.100.1")
        .with_remote_addr(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10)));

    let record = ErrorRecordBuilder::new(config())
        .error(PaymentDeclined)
        .request(&request)
        .build()
        .unwrap();

    assert_eq!(record.ip_address(), "198.51.100.1");
    assert_eq!(record.server_variables().unwrap().get_all("REMOTE_ADDR").count(), 1);
}

#[test]
fn request_without_address_reports_unknown() {
    let request = CapturedRequest::new().server_variable("HTTP_HOST", "example.com");
    let record = ErrorRecordBuilder::new(config())
        .error(PaymentDeclined)
        .request(&request)
        .build()
        .unwrap();

    assert_eq!(record.ip_address(), error_record::types::UNKNOWN_IP);
}

#[test]
fn backtrace_capture_is_opt_in() {
    let record = capture_with(UnwrapRule::Builtin, PaymentDeclined);
    assert!(record.detail().ends_with("capture::PaymentDeclined: card declined by issuer"));
    assert_eq!(record.detail().lines().count(), 1);
}

#[test]
fn backtrace_is_appended_when_enabled() {
    let plain = capture_with(UnwrapRule::Builtin, PaymentDeclined);
    let traced = ErrorRecordBuilder::new(config().capture_backtrace(true))
        .error(PaymentDeclined)
        .build()
        .unwrap();

    assert!(traced.detail().starts_with(plain.detail()));
    assert!(traced.detail().lines().count() > 1);
    assert_eq!(traced.message(), plain.message());
}

#[test]
fn global_configuration_is_installed_once() {
    // Either this call or an earlier `global()` fallback wins; the next one must fail.
    let _ = error_record::config::init(config());

    let err = error_record::config::init(config()).unwrap_err();
    assert!(matches!(err, RecordError::Config(_)));
}

#[test]
fn capture_uses_global_configuration() {
    let request = CapturedRequest::new().with_query_string("q=shoes");
    let record = ErrorRecord::capture(PaymentDeclined, Some(&request));

    assert_eq!(record.message(), "card declined by issuer");
    assert_eq!(record.application_name(), error_record::config::global().application_name);
    assert_eq!(record.query_string().unwrap().get("q"), Some("shoes"));

    let bare = ErrorRecord::capture(PaymentDeclined, None);
    assert!(bare.server_variables().is_none());
}

#[cfg(feature = "tracing")]
#[test]
fn active_span_is_recorded() {
    use error_record::capture::SPAN_KEY;

    let record = tracing::subscriber::with_default(tracing_subscriber::registry(), || {
        let span = tracing::info_span!("place_order");
        let _guard = span.enter();
        ErrorRecordBuilder::new(config())
            .error(PaymentDeclined)
            .with_current_span()
            .build()
            .unwrap()
    });

    assert_eq!(record.custom_data().unwrap()[SPAN_KEY], "place_order");
}

#[cfg(feature = "tracing")]
#[test]
fn no_span_leaves_custom_data_empty() {
    let record = ErrorRecordBuilder::new(config())
        .error(PaymentDeclined)
        .with_current_span()
        .build()
        .unwrap();

    assert!(record.custom_data().is_none());
}

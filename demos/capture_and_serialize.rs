//! Capture and Serialize Example
//!
//! Captures an error raised while serving a request, rolls up a repeat
//! occurrence, and prints both JSON forms.
//!
//! Run with: cargo run --example capture_and_serialize

use error_record::prelude::*;
use error_record::config;

#[derive(Debug)]
struct InventoryError {
    sku: String,
}

impl std::fmt::Display for InventoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sku {} is out of stock", self.sku)
    }
}

impl std::error::Error for InventoryError {}

fn place_order(sku: &str) -> Result<(), HttpError> {
    Err(HttpError::new(409, "order rejected").with_source(InventoryError { sku: sku.to_string() }))
}

fn main() -> Result<(), RecordError> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    config::init(
        CaptureConfig::new("shop", "web01")
            .redact_form_field("card_number")
            .redact_cookie("session"),
    )?;

    let request = CapturedRequest::new()
        .server_variable("HTTP_HOST", "shop.example.com")
        .server_variable("URL", "/orders")
        .server_variable("REQUEST_METHOD", "POST")
        .server_variable("HTTP_X_FORWARDED_FOR", "10.0.0.3, 203.0.113.77")
        .with_query_string("?ref=mail&tag=a&tag=b")
        .with_form_body(b"sku=XL-42&card_number=4111111111111111")
        .cookie(RequestCookie::new("session", "s3cr3t"));

    // =========================================================================
    // Capture
    // =========================================================================

    let err = match place_order("XL-42") {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    let mut first = ErrorRecordBuilder::from_global()
        .error(err)
        .request(&request)
        .custom_data("customer", "1138")
        .build()?;
    first.set_id(1);

    println!("captured: {first}");
    println!("detail:\n{}\n", first.detail());

    // =========================================================================
    // Rollup
    // =========================================================================

    let repeat = ErrorRecord::capture(
        HttpError::new(409, "order rejected").with_source(InventoryError { sku: "XL-42".into() }),
        Some(&request),
    );
    if first.matches_for_rollup(&repeat) {
        first.increment_duplicate_count(1);
    }
    println!("duplicate count after rollup: {}\n", first.duplicate_count());

    // =========================================================================
    // Serialization
    // =========================================================================

    let stored = first.to_json_pretty()?;
    println!("full form:\n{stored}\n");

    let restored = ErrorRecord::from_json(&stored)?;
    println!("restored {} (id: {:?})", restored.guid(), restored.id());

    println!("detailed form:\n{}", restored.to_detailed_json()?);
    Ok(())
}

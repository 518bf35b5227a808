//! Process-wide capture settings.
//!
//! A [`CaptureConfig`] names the reporting application and host, decides
//! whether fingerprints are scoped per server, and selects the [`UnwrapRule`]
//! used to promote a root cause. It can be built in code, loaded from JSON, or
//! taken from the environment, and installed once for the whole process with
//! [`init`].
//!
//! # Examples
//!
//! ```
//! use error_record::config::CaptureConfig;
//!
//! let config = CaptureConfig::new("shop", "web01").rollup_per_server(false);
//! assert_eq!(config.application_name, "shop");
//! assert!(!config.rollup_per_server);
//! ```

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::capture::UnwrapRule;
use crate::error::{RecordError, RecordResult};

/// Environment variable read for the application name by [`CaptureConfig::from_env`].
pub const APPLICATION_NAME_ENV: &str = "ERROR_RECORD_APPLICATION_NAME";

/// Replacement written over redacted form fields and cookies.
pub const REDACTED: &str = "*********";

/// Settings applied to every record captured with this configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub application_name: String,
    pub machine_name: String,
    /// Scope fingerprints to the reporting host.
    pub rollup_per_server: bool,
    /// Append a backtrace of the capture site to the detail text, whatever
    /// `RUST_BACKTRACE` says.
    ///
    /// Backtraces differ between call sites, so this weakens rollup.
    pub capture_backtrace: bool,
    /// Form fields whose values are replaced with [`REDACTED`] at capture.
    pub redacted_form_fields: Vec<String>,
    /// Cookies whose values are replaced with [`REDACTED`] at capture.
    pub redacted_cookies: Vec<String>,
    #[serde(skip)]
    pub unwrap_rule: UnwrapRule,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            application_name: String::new(),
            machine_name: String::new(),
            rollup_per_server: true,
            capture_backtrace: false,
            redacted_form_fields: Vec::new(),
            redacted_cookies: Vec::new(),
            unwrap_rule: UnwrapRule::default(),
        }
    }
}

impl CaptureConfig {
    pub fn new<A, M>(application_name: A, machine_name: M) -> Self
    where
        A: Into<String>,
        M: Into<String>,
    {
        Self {
            application_name: application_name.into(),
            machine_name: machine_name.into(),
            ..Default::default()
        }
    }

    /// Reads the application name from [`APPLICATION_NAME_ENV`] and the machine
    /// name from `HOSTNAME` (or `COMPUTERNAME`). Missing variables leave the
    /// field empty.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            application_name: var(APPLICATION_NAME_ENV).unwrap_or_default(),
            machine_name: var("HOSTNAME").or_else(|| var("COMPUTERNAME")).unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Parses a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> RecordResult<Self> {
        serde_json::from_str(json).map_err(|e| RecordError::Config(e.to_string()))
    }

    #[must_use]
    pub fn rollup_per_server(mut self, per_server: bool) -> Self {
        self.rollup_per_server = per_server;
        self
    }

    #[must_use]
    pub fn capture_backtrace(mut self, capture: bool) -> Self {
        self.capture_backtrace = capture;
        self
    }

    #[must_use]
    pub fn redact_form_field<S: Into<String>>(mut self, name: S) -> Self {
        self.redacted_form_fields.push(name.into());
        self
    }

    #[must_use]
    pub fn redact_cookie<S: Into<String>>(mut self, name: S) -> Self {
        self.redacted_cookies.push(name.into());
        self
    }

    #[must_use]
    pub fn unwrap_rule(mut self, rule: UnwrapRule) -> Self {
        self.unwrap_rule = rule;
        self
    }
}

static GLOBAL: OnceLock<CaptureConfig> = OnceLock::new();

/// Installs the process-wide configuration. Fails if one is already installed.
pub fn init(config: CaptureConfig) -> RecordResult<()> {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        application = %config.application_name,
        machine = %config.machine_name,
        "installing error capture configuration"
    );

    GLOBAL
        .set(config)
        .map_err(|_| RecordError::Config("capture configuration already installed".into()))
}

/// The process-wide configuration, falling back to [`CaptureConfig::from_env`]
/// on first use when [`init`] was never called.
pub fn global() -> &'static CaptureConfig {
    GLOBAL.get_or_init(CaptureConfig::from_env)
}

use core::fmt::Write;

/// Configuration builder for customizing fingerprint generation.
///
/// A fingerprint is a cheap similarity hash of an error's detail text used to
/// roll repeated occurrences into one stored record. Collisions merge two
/// different errors and are tolerated; the value is never an identity.
///
/// # Examples
///
/// ```
/// use error_record::FingerprintConfig;
///
/// let detail = "io error: disk full";
/// let web01 = FingerprintConfig::new(detail).machine_name("web01").compute();
/// let web02 = FingerprintConfig::new(detail).machine_name("web02").compute();
/// assert_ne!(web01, web02);
///
/// let shared = FingerprintConfig::new(detail).rollup_per_server(false);
/// assert_eq!(shared.machine_name("web01").compute(), shared.machine_name("web02").compute());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FingerprintConfig<'a> {
    pub(crate) detail: &'a str,
    pub(crate) machine_name: &'a str,
    pub(crate) rollup_per_server: bool,
}

impl<'a> FingerprintConfig<'a> {
    pub fn new(detail: &'a str) -> Self {
        Self { detail, machine_name: "", rollup_per_server: true }
    }

    /// Host the error was raised on (default: empty).
    #[must_use]
    pub fn machine_name(mut self, machine_name: &'a str) -> Self {
        self.machine_name = machine_name;
        self
    }

    /// Whether identical errors on different hosts get different fingerprints (default: true).
    #[must_use]
    pub fn rollup_per_server(mut self, per_server: bool) -> Self {
        self.rollup_per_server = per_server;
        self
    }

    /// Computes the fingerprint using the configured options.
    ///
    /// Returns `None` when there is no detail text to fingerprint.
    #[must_use]
    pub fn compute(&self) -> Option<i32> {
        compute_fingerprint(self.detail, self.machine_name, self.rollup_per_server)
    }

    /// Computes the fingerprint and returns it as a hex string.
    #[must_use]
    pub fn compute_hex(&self) -> Option<String> {
        self.compute().map(|fp| {
            let mut result = String::with_capacity(8);
            let _ = write!(result, "{:08x}", fp as u32);
            result
        })
    }
}

/// Computes the rollup fingerprint for a detail string.
///
/// The content hash is 32-bit FNV-1a. With `rollup_per_server` set and a
/// non-empty `machine_name`, the host hash is folded in as
/// `content * 397 ^ host`, which is order-sensitive.
pub fn compute_fingerprint(
    detail: &str,
    machine_name: &str,
    rollup_per_server: bool,
) -> Option<i32> {
    if detail.is_empty() {
        return None;
    }

    let content = fnv1a(detail.as_bytes());
    let fingerprint = if rollup_per_server && !machine_name.is_empty() {
        combine(content, fnv1a(machine_name.as_bytes()))
    } else {
        content
    };

    #[cfg(feature = "tracing")]
    tracing::trace!(fingerprint, machine_name, rollup_per_server, "computed error fingerprint");

    Some(fingerprint)
}

#[inline]
pub(crate) fn combine(first: i32, second: i32) -> i32 {
    first.wrapping_mul(397) ^ second
}

/// FNV-1a offset basis for 32-bit hash.
const FNV_OFFSET: u32 = 0x811c_9dc5;
/// FNV-1a prime constant for 32-bit hash.
const FNV_PRIME: u32 = 0x0100_0193;

#[inline(always)]
pub(crate) fn fnv1a(bytes: &[u8]) -> i32 {
    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash as i32
}

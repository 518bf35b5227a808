//! Root-cause promotion rules.
//!
//! Standard-library errors are usually thin wrappers (an `io::Error` around
//! the real failure, a parse error with no context of its own), so surfacing
//! the innermost cause is more useful. Application and third-party errors
//! usually already carry a meaningful message and are kept as they are.

use core::any::type_name;
use core::fmt;
use std::error::Error;

use smallvec::SmallVec;

/// Upper bound on the cause chain walked during capture.
pub(crate) const MAX_CAUSE_DEPTH: usize = 64;

/// Cause chain, outermost error first.
pub(crate) type CauseChain<'a> = SmallVec<[&'a (dyn Error + 'static); 4]>;

/// Decides whether a captured error is unwrapped to its innermost cause before
/// its type, message, and source are promoted onto the record.
///
/// The detail text always describes the original error and its full chain,
/// whichever rule is used.
#[derive(Clone, Copy, Default)]
pub enum UnwrapRule {
    /// Unwrap only when the outer error is one of the standard-library error
    /// types listed in [`builtin_type_name`].
    #[default]
    Builtin,
    /// Always promote the innermost cause.
    Always,
    /// Never unwrap.
    Never,
    /// Unwrap when the predicate returns `true` for the outer error.
    Custom(fn(&(dyn Error + 'static)) -> bool),
}

impl UnwrapRule {
    pub fn should_unwrap(&self, error: &(dyn Error + 'static)) -> bool {
        match self {
            Self::Builtin => builtin_type_name(error).is_some(),
            Self::Always => true,
            Self::Never => false,
            Self::Custom(predicate) => predicate(error),
        }
    }
}

impl fmt::Debug for UnwrapRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("Builtin"),
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

macro_rules! builtin_errors {
    ($($ty:ty),* $(,)?) => {
        /// Returns the type name of `error` if it is one of the standard-library
        /// error types treated as transparent wrappers.
        ///
        /// The list: `io::Error`, `fmt::Error`, the numeric, boolean, char and
        /// string parse/conversion errors, `AddrParseError`, `VarError`,
        /// `SystemTimeError`, `TryFromSliceError`, `NulError`, the `RefCell`
        /// borrow errors, and `mpsc::RecvError`.
        pub fn builtin_type_name(error: &(dyn Error + 'static)) -> Option<&'static str> {
            $(
                if error.is::<$ty>() {
                    return Some(type_name::<$ty>());
                }
            )*
            None
        }
    };
}

builtin_errors!(
    std::io::Error,
    std::fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::char::ParseCharError,
    std::net::AddrParseError,
    std::env::VarError,
    std::time::SystemTimeError,
    std::array::TryFromSliceError,
    std::ffi::NulError,
    std::cell::BorrowError,
    std::cell::BorrowMutError,
    std::sync::mpsc::RecvError,
);

/// Next link of the cause chain.
///
/// `io::Error::source` skips the error it wraps, so wrapped payloads are reached
/// through `get_ref` instead. A bare message payload (`io::Error::new(kind, "...")`)
/// is not an error of its own and ends the chain at the `io::Error`.
pub(crate) fn next_cause<'a>(
    error: &'a (dyn Error + 'static),
) -> Option<&'a (dyn Error + 'static)> {
    if let Some(io) = error.downcast_ref::<std::io::Error>() {
        if let Some(inner) = io.get_ref() {
            let inner: &(dyn Error + 'static) = inner;
            if !is_opaque(inner) {
                return Some(inner);
            }
        }
    }
    error.source()
}

pub(crate) fn cause_chain<'a>(error: &'a (dyn Error + 'static)) -> CauseChain<'a> {
    let mut chain = CauseChain::new();
    let mut current = Some(error);
    while let Some(err) = current {
        if chain.len() == MAX_CAUSE_DEPTH {
            break;
        }
        chain.push(err);
        current = next_cause(err);
    }
    chain
}

/// Leading identifier of the `Debug` output, which is the type name for
/// derived `Debug` impls.
fn debug_ident(error: &(dyn Error + 'static)) -> Option<String> {
    let debug = format!("{error:?}");
    let ident: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        None
    } else {
        Some(ident)
    }
}

/// Whether `error` carries nothing but a message, with no nameable type.
fn is_opaque(error: &(dyn Error + 'static)) -> bool {
    builtin_type_name(error).is_none()
        && !error.is::<crate::types::HttpError>()
        && debug_ident(error).is_none()
}

/// Best-effort type name for an error known only as a trait object.
///
/// Falls back to the leading identifier of its `Debug` output and to `"Error"`
/// when there is none.
pub(crate) fn describe_type(error: &(dyn Error + 'static)) -> String {
    if let Some(name) = builtin_type_name(error) {
        return name.to_owned();
    }
    if error.is::<crate::types::HttpError>() {
        return type_name::<crate::types::HttpError>().to_owned();
    }
    debug_ident(error).unwrap_or_else(|| "Error".to_owned())
}

/// Appends the `ErrorKind` to an `io::Error` type name, so `NotFound` and
/// `PermissionDenied` are told apart.
pub(crate) fn qualify(name: String, error: &(dyn Error + 'static)) -> String {
    match error.downcast_ref::<std::io::Error>() {
        Some(io) => format!("{name} ({:?})", io.kind()),
        None => name,
    }
}

/// Crate segment of a type path, or empty for an unqualified name.
pub(crate) fn source_of(type_name: &str) -> &str {
    match type_name.split_once("::") {
        Some((krate, _)) => krate,
        None => "",
    }
}

//! Errors occurring while decoding.

use alloc::string::String;
use thiserror::Error;

use crate::sans::directive::DirectiveError;

/// Errors occurring while decoding a value.
///
/// The first error aborts the whole decode. Fields decoded before the failure
/// keep their new values; the failing field keeps its old one.
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer bytes were available than a field required.
    #[error("Failed to read {requested} bytes starting from offset {offset:#x}.")]
    ShortRead { requested: usize, offset: usize },
    /// A length referenced a field path with no recorded value.
    #[error("Length of '{path}' references '{reference}', which has no recorded value.")]
    UnresolvedReference { reference: String, path: String },
    /// The destination type has no decoding rule.
    #[error("Type {type_name} at '{path}' cannot be decoded into.")]
    UnsupportedType {
        type_name: &'static str,
        path: String,
    },
    /// Text bytes were not valid UTF-8.
    #[error("Text at '{path}' is not valid UTF-8.")]
    InvalidText { path: String },
    /// A length does not fit in memory on this platform.
    #[error("Length {length} of '{path}' does not fit in memory.")]
    LengthOverflow { length: u64, path: String },
    /// A malformed directive.
    #[error("Malformed directive at '{path}': {source}.")]
    Directive {
        path: String,
        #[source]
        source: DirectiveError,
    },
    /// An error from the supplied reader.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error comes from a malformed schema rather than from the
    /// input.
    pub fn is_directive(&self) -> bool {
        matches!(self, Self::Directive { .. })
    }
}

/// A directive error with no field path, as raised by the root of a decode.
/// Hand-written records use [`Fields::tagged`] to keep the field's path.
///
/// [`Fields::tagged`]: crate::sans::walk::Fields::tagged
impl From<DirectiveError> for Error {
    fn from(source: DirectiveError) -> Self {
        Self::Directive {
            path: String::new(),
            source,
        }
    }
}

//! Per-field directives and their string-tag parser.

use core::{fmt, str::FromStr};

use alloc::string::{String, ToString};
use thiserror::Error;

/// Sentinel marking a greedy length in string form.
pub const GREEDY: &str = "..";

/// A malformed directive.
///
/// These are programmer errors in a schema rather than problems with the
/// input, and are never worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// Byte order other than `big` or `little`.
    #[error("'{0}' is not a valid byte order")]
    InvalidEndian(String),
    /// Length-prefix width that does not parse as an unsigned integer.
    #[error("cannot parse '{0}' as a length-prefix width")]
    InvalidLengthSize(String),
    /// Length-prefix width outside `1..=8`.
    #[error("length-prefix width must be between 1 and 8 bytes, found {0}")]
    LengthSizeOutOfRange(usize),
    /// Length that is neither a literal, a field path, nor the greedy sentinel.
    #[error("'{0}' is not a length literal, field path, or '..'")]
    MalformedLength(String),
    /// Unrecognised directive key.
    #[error("unknown directive '{0}'")]
    UnknownKey(String),
    /// A field follows a greedy sibling in the same record.
    #[error("a greedy field must be the last field of its record")]
    GreedyNotLast,
}

/// Byte order of integer fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    #[default]
    Little,
}

impl FromStr for Endian {
    type Err = DirectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("big") {
            Ok(Self::Big)
        } else if s.eq_ignore_ascii_case("little") {
            Ok(Self::Little)
        } else {
            Err(DirectiveError::InvalidEndian(s.to_string()))
        }
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Big => "big",
            Self::Little => "little",
        })
    }
}

/// How the byte length of a variable-length field is found.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length<'a> {
    /// Read a length prefix, or use the natural size of the type.
    #[default]
    None,
    /// A fixed count.
    Literal(usize),
    /// The value recorded for an earlier field at this path.
    Reference(&'a str),
    /// Everything left in the input.
    Greedy,
}

impl<'a> Length<'a> {
    /// Parse a length from its string form.
    ///
    /// Decimal strings are literals, [`GREEDY`] is greedy, and anything else
    /// must be a dot-separated field path.
    pub fn parse(s: &'a str) -> Result<Self, DirectiveError> {
        if s == GREEDY {
            return Ok(Self::Greedy);
        }

        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse()
                .map(Self::Literal)
                .map_err(|_| DirectiveError::MalformedLength(s.to_string()));
        }

        let is_segment = |seg: &str| {
            !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
        };

        if s.split('.').all(is_segment) {
            Ok(Self::Reference(s))
        } else {
            Err(DirectiveError::MalformedLength(s.to_string()))
        }
    }
}

/// The directives attached to a single field.
///
/// Absent directives inherit from the enclosing context. The derive macro
/// builds these as constants; hand-written schemas may use
/// [`Directives::with`] to parse string tags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Directives<'a> {
    pub length: Length<'a>,
    pub endian: Option<Endian>,
    pub length_size: Option<usize>,
    pub flags: &'a str,
}

impl<'a> Directives<'a> {
    /// No directives: everything inherited, no explicit length.
    pub const NONE: Self = Self {
        length: Length::None,
        endian: None,
        length_size: None,
        flags: "",
    };

    /// Apply a directive given as a key and string value.
    ///
    /// Recognised keys are `length`, `endian`, `length_size` (or
    /// `lengthSize`), and `flags`.
    pub fn with(mut self, key: &str, value: &'a str) -> Result<Self, DirectiveError> {
        match key {
            "length" => self.length = Length::parse(value)?,
            "endian" => self.endian = Some(value.parse()?),
            "length_size" | "lengthSize" => {
                let n: usize = value
                    .parse()
                    .map_err(|_| DirectiveError::InvalidLengthSize(value.to_string()))?;
                self.length_size = Some(check_length_size(n)?);
            }
            "flags" => self.flags = value,
            _ => Err(DirectiveError::UnknownKey(key.to_string()))?,
        }

        Ok(self)
    }
}

/// Largest supported length prefix, in bytes.
pub const MAX_LENGTH_SIZE: usize = size_of::<u64>();

pub(crate) fn check_length_size(n: usize) -> Result<usize, DirectiveError> {
    if (1..=MAX_LENGTH_SIZE).contains(&n) {
        Ok(n)
    } else {
        Err(DirectiveError::LengthSizeOutOfRange(n))
    }
}

//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode a single value from a data slice or a
//! reader. [`Decoder`] frames a sequence of values from one input. All of them
//! publish to the [`Decode`] trait, which in most cases can be derived. See the
//! [`Decode`](macro@Decode) macro for details.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use crate::{
    error::Error,
    sans::{
        config::Config,
        context::Context,
        source::{Input, Source},
        table::FieldTable,
        walk::Walker,
    },
};

/// Derive [`Decode`] for a struct, decoding its fields in declaration order.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// Fields take their length, byte order, and length-prefix width from the
/// `decode` attribute. Without one, a field inherits the byte order and prefix
/// width of its record, and variable-length fields read a length prefix.
///
/// ```
/// #[derive(Debug, Default, Decode)]
/// struct Header {
///     #[decode(length = 3)]
///     sig: String,
///     #[decode(endian = "big")]
///     size: u32,
/// }
///
/// #[derive(Debug, Default, Decode)]
/// struct Chunk {
///     header: Header,
///     #[decode(length = "header.size")]
///     body: Vec<u8>,
///     #[decode(length = "..")]
///     trailer: Vec<u8>,
/// }
/// ```
///
/// A `length` is a literal count, the dot-separated path of an earlier integer
/// field, or `".."` to take everything left in the input (only on the last
/// field). `endian` is `"big"` or `"little"`, `length_size` is a prefix width
/// between 1 and 8, and `flags` is a comma-separated list of tokens available
/// to hand-written implementations through [`Context::has_flag`].
#[cfg(feature = "derive")]
pub use bytewalk_derive::Decode;

/// Decode a value from bytes.
///
/// Implementations exist for integers, floats, `bool`, `String`, arrays,
/// `Vec`, `Box`, and `Option`. See the [`Decode`](macro@Decode) derive macro
/// for an automatic implementation for records.
///
/// A hand-written record decodes its fields through [`Walker::record`]:
///
/// ```
/// impl Decode for Entry {
///     fn decode(&mut self, w: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error> {
///         let mut fields = w.record(ctx);
///         fields.field("len", &Directives::NONE, &mut self.len)?;
///         fields.tagged("name", &[("length", "len")], &mut self.name)
///     }
/// }
/// ```
pub trait Decode {
    /// Read this value from the walker's input.
    fn decode(&mut self, w: &mut Walker<'_>, ctx: &Context<'_>) -> Result<(), Error>;

    /// The value to record for this node once decoded, if it is an integer.
    fn field_value(&self) -> Option<u64> {
        None
    }
}

/// A decoder framing values from one input.
///
/// Unless [`Config::retain_field_values`] is set, each call to
/// [`Decoder::decode`] starts with an empty table of field values.
///
/// The table holds one entry per decoded integer node, sequence elements
/// included. Large byte payloads grow it accordingly, and with
/// `retain_field_values` it grows across calls until [`Decoder::reset`].
/// See [`Config::store_field_values`].
pub struct Decoder<I> {
    input: I,
    offset: usize,
    fields: FieldTable,
    config: Config,
}

impl<I: Input> Decoder<I> {
    pub fn new(input: I) -> Self {
        Self::with_config(input, Config::default())
    }

    pub fn with_config(input: I, config: Config) -> Self {
        Self {
            input,
            offset: 0,
            fields: FieldTable::new(),
            config,
        }
    }

    /// Decode the next value from the input.
    ///
    /// The decoder reads no bytes past those the value needs, unless its last
    /// field is greedy.
    pub fn decode<T: Decode + ?Sized>(&mut self, value: &mut T) -> Result<(), Error> {
        if !self.config.retain_field_values {
            self.reset();
        }

        let root = Context::root(&self.config)?;

        let source = Source::new(&mut self.input, self.offset);
        let mut w = Walker::new(source, &mut self.fields, &self.config);

        let result = w.decode(value, &root);
        self.offset = w.offset();

        result
    }

    /// Forget all recorded field values.
    pub fn reset(&mut self) {
        if !self.fields.is_empty() {
            log::debug!("clearing {} recorded field values", self.fields.len());
        }

        self.fields.clear();
    }

    /// Field values recorded so far.
    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Bytes consumed from the input so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_inner(self) -> I {
        self.input
    }
}

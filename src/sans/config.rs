//! Decoder configuration.

/// Configuration shared by every node of a decode.
///
/// A configuration is fixed for the lifetime of a [`Decoder`], and may be
/// copied freely between decoders.
///
/// [`Decoder`]: crate::avec::Decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Width, in bytes, of length prefixes for fields without a `length_size`
    /// directive. Defaults to 4.
    pub length_size: usize,
    /// Record the values of integer fields so later fields can reference
    /// them. Defaults to true.
    ///
    /// Every integer node is recorded under its own path, including each
    /// element of a sequence, so a `Vec<u8>` of `n` bytes adds `n` entries.
    /// Turn this off for bulk payloads when no later length refers to them.
    pub store_field_values: bool,
    /// Keep recorded field values between calls to [`Decoder::decode`],
    /// letting a record reference fields of the records before it. Defaults
    /// to false.
    ///
    /// [`Decoder::decode`]: crate::avec::Decoder::decode
    pub retain_field_values: bool,
}

impl Config {
    pub const DEFAULT: Self = Self {
        length_size: 4,
        store_field_values: true,
        retain_field_values: false,
    };

    pub const fn with_length_size(mut self, length_size: usize) -> Self {
        self.length_size = length_size;
        self
    }

    pub const fn with_store_field_values(mut self, store: bool) -> Self {
        self.store_field_values = store;
        self
    }

    pub const fn with_retain_field_values(mut self, retain: bool) -> Self {
        self.retain_field_values = retain;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

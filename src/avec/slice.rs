//! Slice-based decoder implementation.

use crate::{error::Error, sans::config::Config};

use super::{Decode, Decoder};

/// Decode a value from a slice with the default configuration.
///
/// This method is also re-exported as `bytewalk::avec::decode_slice`.
pub fn decode<T: Decode + ?Sized>(r: &[u8], o: &mut T) -> Result<(), Error> {
    decode_with(r, o, Config::default())
}

/// Decode a value from a slice.
///
/// Bytes left over once the value is decoded are ignored.
pub fn decode_with<T: Decode + ?Sized>(r: &[u8], o: &mut T, config: Config) -> Result<(), Error> {
    Decoder::with_config(r, config).decode(o)
}

//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use crate::{
    error::Error,
    sans::{config::Config, source::Input},
};

use super::{Decode, Decoder};

/// An [`Input`] over a reader.
///
/// Interrupted reads are retried; other errors from the reader end decoding.
#[derive(Debug)]
pub struct IoInput<R>(pub R);

impl<R: Read> Input for IoInput<R> {
    fn read_up_to(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        loop {
            match self.0.read(buf) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                r => return Ok(r?),
            }
        }
    }
}

impl<R: Read> Decoder<IoInput<R>> {
    /// Create a decoder reading from `r`.
    ///
    /// _Requires Cargo feature `std`._
    pub fn from_reader(r: R) -> Self {
        Self::new(IoInput(r))
    }
}

/// Decode a value from a reader with the default configuration.
///
/// This method is also re-exported as `bytewalk::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode<T: Decode + ?Sized>(r: &mut impl Read, o: &mut T) -> Result<(), Error> {
    decode_with(r, o, Config::default())
}

/// Decode a value from a reader.
///
/// _Requires Cargo feature `std`._
pub fn decode_with<T: Decode + ?Sized>(
    r: &mut impl Read,
    o: &mut T,
    config: Config,
) -> Result<(), Error> {
    Decoder::with_config(IoInput(r), config).decode(o)
}

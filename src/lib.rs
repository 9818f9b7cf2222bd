#![no_std]

//! A declarative, schema-driven binary decoder.
//!
//! Bytewalk fills a value from a byte stream according to its shape:
//! integers, floats, text, fixed arrays, dynamic sequences, and nested
//! records. Each field of a record may carry directives setting its length,
//! byte order, and length-prefix width. A length may name an earlier integer
//! field, so headers can describe the sections that follow them.
//!
//! Most users should begin with the functions and derive macro in the
//! [`avec`] module. Hand-written implementations and custom drivers use the
//! machinery in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoding (default).

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod avec;
pub mod error;
pub mod sans;

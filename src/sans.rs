//! Internal machinery for implementing decoders.
//!
//! This module is intended for hand-written [`Decode`] implementations and
//! for applications that need to drive a decode themselves. See
//! [`crate::avec`] for implementations covering common decoding patterns.
//!
//! # Architecture
//!
//! A decode is a depth-first walk over the destination value. Every field and
//! element gets a [`Context`] derived from its parent's, holding its path from
//! the root, its byte order, its length-prefix width, and its length
//! directive. Malformed directives fail as soon as a context is derived.
//!
//! The [`Walker`] carries the [`Source`] of bytes and a [`FieldTable`] of
//! integer values decoded so far. After any integer node is decoded, its value
//! is recorded under its path, so a later field can take its length from it:
//!
//! ```text
//! header.size = 2            (recorded when decoded)
//! body: length "header.size" (resolved when body is reached)
//! ```
//!
//! References are resolved only when the length is needed, not when the
//! context is derived.
//!
//! [`Decode`]: crate::avec::Decode
//! [`Context`]: context::Context
//! [`Walker`]: walk::Walker
//! [`Source`]: source::Source
//! [`FieldTable`]: table::FieldTable

pub mod config;
pub mod context;
pub mod directive;
pub mod shape;
pub mod source;
pub mod table;
pub mod walk;

//! Core of a color-management library: parses, validates, and
//! evaluates ICC.1:2010 color profiles — the tag-indexed binary
//! container, its tone-reproduction curves, and the A2B LUT pipeline
//! descriptor they feed.
//!
//! The parser is allocation-free: a [`Profile`] borrows into the
//! caller-supplied buffer for its entire lifetime and never copies
//! variable-length data (curve tables, CLUT samples) onto the heap.
//!
//! Out of scope: visualizing profiles, applying a profile to pixel
//! data, curve approximation/fitting, and file I/O — the caller
//! supplies a contiguous byte buffer and consumes the parsed
//! structure itself.

#![forbid(unsafe_code)]

pub mod a2b;
pub mod curve;
pub mod error;
pub mod header;
pub mod profile;
pub mod reader;
pub mod tag;
pub mod types;
pub mod xyz;

pub use a2b::A2B;
pub use curve::{are_approximate_inverses, Curve, Parametric};
pub use error::ParseError;
pub use header::Header;
pub use profile::Profile;
pub use tag::Tag;
pub use types::{DateTime, Signature, Xyz};

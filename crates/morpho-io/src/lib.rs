#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and format failures.
pub mod error;

/// Binary PGM ("P5") image encoding and decoding.
pub mod pgm;

pub use crate::error::IoError;

//! unshade-core - Basic data structures for the restoration pipeline
//!
//! This crate provides the intensity grid shared by every stage:
//!
//! - [`Grid`] / [`GridMut`] - Single-channel 8-bit image (immutable / mutable)
//! - Border replication via [`Grid::pad_replicate`]
//! - Saturating conversions used wherever a stage narrows to 8 bits
//!   (see [`saturate`])

pub mod error;
pub mod grid;
pub mod saturate;

pub use error::{Error, Result};
pub use grid::{Grid, GridMut, MAX_INTENSITY};
pub use saturate::{round_saturate_u8, saturate_i32_u8, saturate_u8};

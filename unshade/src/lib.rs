//! unshade - Illumination compensation and denoising for grayscale images
//!
//! Restores unevenly lit single-channel images in five stages:
//!
//! - Local background estimation (median pre-pass + top-K window mean)
//! - Illumination compensation against that background
//! - Band-pass extraction (difference of box blurs)
//! - Non-local means denoising
//!
//! The stages live in [`filter`]; [`io`] reads and writes grids and
//! provides the [`GridSink`] abstraction that [`run`] writes into.
//!
//! # Example
//!
//! ```
//! use unshade::{Grid, MemorySink, PipelineOptions, run};
//!
//! let source = Grid::new_filled(32, 32, 180).unwrap();
//! let mut sink = MemorySink::new();
//! run(&source, &PipelineOptions::default(), &mut sink).unwrap();
//! assert_eq!(sink.get("bandpass").unwrap().get(0, 0), Some(128));
//! ```

mod error;
pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use unshade_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use unshade_filter as filter;
pub use unshade_io as io;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{PipelineOptions, Restoration, StageInput, restore, run};
pub use unshade_io::{FileSink, GridSink, ImageFormat, MemorySink};

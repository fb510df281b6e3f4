//! unshade-filter - Window filters for illumination restoration
//!
//! This crate provides the per-pixel window stages of the restoration
//! pipeline:
//!
//! - Rank filtering (median, min, max) with edge-clamped windows
//! - Box blur (uniform window average)
//! - Local background estimation (median pre-pass + top-K window mean)
//! - Illumination compensation against an estimated background
//! - Non-local means denoising
//! - Band-pass extraction as a difference of box blurs
//!
//! Every stage validates its parameters before touching any sample and
//! returns a new grid. Rows are processed in parallel with rayon.

pub mod background;
pub mod bandpass;
pub mod box_blur;
mod error;
pub mod illumination;
pub mod nlmeans;
pub mod rank;
mod window;

pub use error::{FilterError, FilterResult};

// Re-export commonly used functions
pub use background::{
    BackgroundOptions, DEFAULT_DENOISE_SIZE, DEFAULT_HALF_WINDOW, DEFAULT_TOP_COUNT,
    estimate_background, estimate_background_with,
};
pub use bandpass::{
    BANDPASS_OFFSET, BandpassOptions, DEFAULT_INNER_SIZE, DEFAULT_OUTER_SIZE, bandpass_with,
    difference_of_boxes,
};
pub use box_blur::box_blur;
pub use illumination::{compensate, compensate_in_place, compensate_pixel, gain};
pub use nlmeans::{
    DEFAULT_BLOCK_SIZE, DEFAULT_H, DEFAULT_SEARCH_WINDOW, NlMeansOptions, nl_means_denoise,
    nl_means_with,
};
pub use rank::{max_filter, median_filter, min_filter, rank_filter};

//! Deterministic synthetic sources
//!
//! The restoration stages only need "a grid of intensity samples"; these
//! builders provide reproducible ones without test data files.

use unshade_core::{Grid, GridMut, saturate_i32_u8};

fn f(x: f32, y: f32) -> f32 {
    x.cos() + y.cos()
}

fn g(x: f32) -> f32 {
    x.sin() + (x * 3.0).sin() / 3.0 + (x * 5.0).sin() / 5.0
}

/// Shading model: large bright/dark cells, fine ripple, a radial square
/// wave and a left-to-right illumination ramp.
fn shade(x: f32, y: f32) -> f32 {
    let cell = if f(x / 15.0, y / 15.0) > 0.0 { 1.0 } else { 0.4 };
    cell + 0.05 * f(x, y) + 0.05 * g((x * x + y * y).sqrt()) - 0.3 + 0.019 * x
}

/// Unevenly lit test pattern centred on the grid.
///
/// Sample `(x, y)` is `shade(x - w/2, y - h/2) * 255`, truncated toward
/// zero and clamped to the 8-bit range.
pub fn test_pattern(width: u32, height: u32) -> unshade_core::Result<Grid> {
    let mut out = GridMut::new(width, height)?;
    let (cx, cy) = ((width / 2) as i32, (height / 2) as i32);
    for (y, row) in out.data_mut().chunks_mut(width as usize).enumerate() {
        for (x, dst) in row.iter_mut().enumerate() {
            let v = shade((x as i32 - cx) as f32, (y as i32 - cy) as f32) * 255.0;
            *dst = saturate_i32_u8(v as i32);
        }
    }
    Ok(out.into())
}

/// Uniform grid.
pub fn constant(width: u32, height: u32, value: u8) -> unshade_core::Result<Grid> {
    Grid::new_filled(width, height, value)
}

/// Uniform grid of `value` with a single `outlier` sample at `(x, y)`.
pub fn single_outlier(
    width: u32,
    height: u32,
    value: u8,
    outlier: u8,
    x: u32,
    y: u32,
) -> unshade_core::Result<Grid> {
    let mut out = Grid::new_filled(width, height, value)?.to_mut();
    out.set(x, y, outlier)?;
    Ok(out.into())
}

/// Horizontal ramp from 0 at the left edge to 255 at the right edge.
pub fn gradient(width: u32, height: u32) -> unshade_core::Result<Grid> {
    let mut out = GridMut::new(width, height)?;
    let span = width.saturating_sub(1).max(1);
    for row in out.data_mut().chunks_mut(width as usize) {
        for (x, dst) in row.iter_mut().enumerate() {
            *dst = (x as u32 * 255 / span) as u8;
        }
    }
    Ok(out.into())
}

/// Add deterministic noise in `[-amplitude, amplitude]` to every sample.
///
/// The noise is a hash of `(x, y, seed)`, so the same call always yields
/// the same grid.
pub fn with_noise(grid: &Grid, amplitude: u8, seed: u32) -> Grid {
    let mut out = grid.to_mut();
    let width = grid.width() as usize;
    let span = 2 * amplitude as u32 + 1;
    for (y, row) in out.data_mut().chunks_mut(width).enumerate() {
        for (x, dst) in row.iter_mut().enumerate() {
            let mut h = (x as u32).wrapping_mul(73_856_093)
                ^ (y as u32).wrapping_mul(19_349_663)
                ^ seed.wrapping_mul(83_492_791);
            h ^= h >> 13;
            h = h.wrapping_mul(0x5bd1_e995);
            h ^= h >> 15;
            let delta = (h % span) as i32 - amplitude as i32;
            *dst = saturate_i32_u8(*dst as i32 + delta);
        }
    }
    out.into()
}

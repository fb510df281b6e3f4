//! Restoration pipeline
//!
//! ```text
//! source ─> background ─> compensated ─┬─> bandpass
//!   └──────────────────────┘           └─> denoised
//! ```
//!
//! Background estimation must finish before compensation; band-pass
//! extraction and denoising only read the compensated (or original)
//! grid and run concurrently.

use crate::PipelineResult;
use log::debug;
use unshade_core::Grid;
use unshade_filter::{
    BackgroundOptions, BandpassOptions, NlMeansOptions, bandpass_with, compensate,
    estimate_background_with, nl_means_with,
};
use unshade_io::GridSink;

/// Sink destination of the source grid
pub const ORIGINAL: &str = "original";
/// Sink destination of the estimated background
pub const BACKGROUND: &str = "background";
/// Sink destination of the compensated grid
pub const COMPENSATED: &str = "compensated";
/// Sink destination of the band-pass grid
pub const BANDPASS: &str = "bandpass";
/// Sink destination of the denoised grid
pub const DENOISED: &str = "denoised";

/// Which grid feeds the band-pass and denoising stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageInput {
    /// The illumination-compensated grid
    #[default]
    Compensated,
    /// The unmodified source grid
    Original,
}

/// Options for the whole pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOptions {
    /// Background estimation options
    pub background: BackgroundOptions,
    /// Non-local means options
    pub nl_means: NlMeansOptions,
    /// Band-pass window sizes
    pub bandpass: BandpassOptions,
    /// Input of the band-pass and denoising stages
    pub stage_input: StageInput,
}

/// Every grid produced by one pipeline run
#[derive(Debug, Clone)]
pub struct Restoration {
    /// The source grid
    pub original: Grid,
    /// Estimated illumination background
    pub background: Grid,
    /// Source compensated against the background
    pub compensated: Grid,
    /// Difference-of-box-blurs band-pass
    pub bandpass: Grid,
    /// Non-local means result
    pub denoised: Grid,
}

impl Restoration {
    /// Write every grid to `sink` under its destination name.
    ///
    /// Order: original, background, compensated, bandpass, denoised.
    pub fn write_to<S: GridSink + ?Sized>(&self, sink: &mut S) -> PipelineResult<()> {
        for (grid, destination) in self.outputs() {
            sink.write(grid, destination)?;
        }
        Ok(())
    }

    /// Grids paired with their destination names, in write order.
    pub fn outputs(&self) -> [(&Grid, &'static str); 5] {
        [
            (&self.original, ORIGINAL),
            (&self.background, BACKGROUND),
            (&self.compensated, COMPENSATED),
            (&self.bandpass, BANDPASS),
            (&self.denoised, DENOISED),
        ]
    }
}

fn log_stage(name: &str, grid: &Grid) {
    let (lo, hi) = grid.min_max();
    debug!(
        "{}: {}x{} min={} max={} mean={:.2}",
        name,
        grid.width(),
        grid.height(),
        lo,
        hi,
        grid.mean()
    );
}

/// Run every stage on `source`.
///
/// All options are checked against the source before the first stage
/// starts.
pub fn restore(source: &Grid, options: &PipelineOptions) -> PipelineResult<Restoration> {
    options.background.validate()?;
    options.nl_means.validate(source)?;
    options.bandpass.validate(source)?;
    debug!(
        "restore: {}x{} {:?}",
        source.width(),
        source.height(),
        options
    );

    let background = estimate_background_with(source, &options.background)?;
    log_stage(BACKGROUND, &background);
    let compensated = compensate(source, &background)?;
    log_stage(COMPENSATED, &compensated);

    let input = match options.stage_input {
        StageInput::Compensated => &compensated,
        StageInput::Original => source,
    };
    let (bandpass, denoised) = rayon::join(
        || bandpass_with(input, &options.bandpass),
        || nl_means_with(input, &options.nl_means),
    );
    let bandpass = bandpass?;
    log_stage(BANDPASS, &bandpass);
    let denoised = denoised?;
    log_stage(DENOISED, &denoised);

    Ok(Restoration {
        original: source.clone(),
        background,
        compensated,
        bandpass,
        denoised,
    })
}

/// Restore `source` and write every result to `sink`.
pub fn run<S: GridSink + ?Sized>(
    source: &Grid,
    options: &PipelineOptions,
    sink: &mut S,
) -> PipelineResult<Restoration> {
    let restoration = restore(source, options)?;
    restoration.write_to(sink)?;
    Ok(restoration)
}

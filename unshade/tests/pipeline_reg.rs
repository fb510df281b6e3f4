//! Restoration pipeline regression test
//!
//! Runs the full pipeline on the 100x100 synthetic pattern:
//!   (1) every stage keeps the 100x100 dimensions
//!   (2) stage outputs agree with calling the stages one by one
//!   (3) the sinks receive the five named outputs in order
//!   (4) known samples of every stage

use std::fs;
use unshade::filter::{compensate, difference_of_boxes, estimate_background, nl_means_denoise};
use unshade::pipeline::{BACKGROUND, BANDPASS, COMPENSATED, DENOISED, ORIGINAL};
use unshade::{FileSink, ImageFormat, MemorySink, PipelineOptions, io, restore, run};
use unshade_test::{RegParams, regout_dir, synthetic};

#[test]
fn pipeline_reg_round_trip() {
    let mut rp = RegParams::new("pipeline_round_trip");

    let source = synthetic::test_pattern(100, 100).unwrap();
    let r = restore(&source, &PipelineOptions::default()).expect("restore");

    for (grid, name) in r.outputs() {
        eprintln!("  {}: min/max {:?} mean {:.2}", name, grid.min_max(), grid.mean());
        rp.compare_values(100.0, grid.width() as f64, 0.0);
        rp.compare_values(100.0, grid.height() as f64, 0.0);
    }

    // Same results stage by stage with the reference parameters
    let bg = estimate_background(&source, 4).expect("estimate_background");
    let comp = compensate(&source, &bg).expect("compensate");
    let dog = difference_of_boxes(&comp, 3, 5).expect("difference_of_boxes");
    let den = nl_means_denoise(&comp, 7, 3, 10.0).expect("nl_means_denoise");
    rp.compare_grid(&source, &r.original);
    rp.compare_grid(&bg, &r.background);
    rp.compare_grid(&comp, &r.compensated);
    rp.compare_grid(&dog, &r.bandpass);
    rp.compare_grid(&den, &r.denoised);

    assert!(rp.cleanup(), "pipeline_round_trip regression test failed");
}

#[test]
fn pipeline_reg_memory_sink() {
    let mut rp = RegParams::new("pipeline_memory_sink");

    let source = synthetic::with_noise(&synthetic::test_pattern(48, 40).unwrap(), 10, 6);
    let mut sink = MemorySink::new();
    let r = run(&source, &PipelineOptions::default(), &mut sink).expect("run");

    let expected = [ORIGINAL, BACKGROUND, COMPENSATED, BANDPASS, DENOISED];
    rp.compare_values(expected.len() as f64, sink.len() as f64, 0.0);
    for (i, name) in sink.destinations().iter().enumerate() {
        rp.compare_values(1.0, if *name == expected[i] { 1.0 } else { 0.0 }, 0.0);
    }
    for (grid, name) in r.outputs() {
        rp.compare_grid(grid, sink.get(name).expect("missing destination"));
    }

    assert!(rp.cleanup(), "pipeline_memory_sink regression test failed");
}

#[test]
fn pipeline_reg_file_sink() {
    let mut rp = RegParams::new("pipeline_file_sink");

    let dir = format!("{}/pipeline_reg", regout_dir());
    let _ = fs::remove_dir_all(&dir);
    let source = synthetic::test_pattern(100, 100).unwrap();

    let mut sink = FileSink::new(&dir, ImageFormat::Jpeg);
    let r = run(&source, &PipelineOptions::default(), &mut sink).expect("run");
    for (grid, name) in r.outputs() {
        let back = io::read_image(sink.path_for(name)).expect("read_image");
        rp.compare_values(100.0, back.width() as f64, 0.0);
        rp.compare_values(100.0, back.height() as f64, 0.0);
        // quality 100 JPEG is close but not exact
        rp.compare_grid_within(grid, &back, 16);
    }

    assert!(rp.cleanup(), "pipeline_file_sink regression test failed");
}

#[test]
fn pipeline_reg_known_samples() {
    let mut rp = RegParams::new("pipeline_known_samples");

    let source = synthetic::test_pattern(100, 100).unwrap();
    let r = restore(&source, &PipelineOptions::default()).expect("restore");

    // Corners, edges, centre and a few interior samples of every stage
    rp.compare_samples(
        &r.original,
        &[(0, 0, 0), (99, 0, 255), (80, 0, 195), (50, 50, 204), (30, 70, 91)],
    );
    rp.compare_samples(
        &r.background,
        &[
            (0, 0, 0),
            (99, 0, 255),
            (0, 99, 0),
            (99, 99, 255),
            (80, 0, 198),
            (0, 30, 0),
            (50, 50, 204),
            (25, 25, 73),
            (30, 70, 105),
            (50, 30, 200),
        ],
    );
    rp.compare_samples(
        &r.compensated,
        &[
            (0, 0, 255),
            (99, 0, 255),
            (0, 99, 255),
            (99, 99, 255),
            (80, 0, 191),
            (20, 99, 255),
            (50, 50, 255),
            (25, 25, 191),
            (30, 70, 191),
            (70, 50, 255),
        ],
    );
    rp.compare_samples(
        &r.bandpass,
        &[
            (0, 0, 128),
            (99, 0, 146),
            (0, 99, 128),
            (99, 99, 133),
            (80, 0, 127),
            (99, 80, 139),
            (50, 50, 169),
            (25, 25, 128),
            (30, 70, 132),
            (50, 30, 151),
        ],
    );
    rp.compare_samples(
        &r.denoised,
        &[
            (0, 0, 255),
            (99, 99, 255),
            (80, 0, 191),
            (0, 30, 255),
            (50, 50, 255),
            (25, 25, 191),
            (30, 70, 191),
            (50, 30, 255),
        ],
    );

    assert!(rp.cleanup(), "pipeline_known_samples regression test failed");
}

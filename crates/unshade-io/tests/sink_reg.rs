//! Output sink regression test
//!
//! Verifies that `FileSink` writes `<dir>/<label>.<ext>` files that
//! read back to the same grids, and that `MemorySink` records writes
//! in order.

use std::fs;
use unshade_io::{FileSink, GridSink, ImageFormat, MemorySink, read_image};
use unshade_test::{RegParams, regout_dir, synthetic};

#[test]
fn sink_reg_file() {
    let mut rp = RegParams::new("sink_file");

    let dir = format!("{}/sink_reg", regout_dir());
    let _ = fs::remove_dir_all(&dir);
    let mut sink = FileSink::new(&dir, ImageFormat::Pnm);

    let a = synthetic::gradient(20, 10).unwrap();
    let b = synthetic::constant(20, 10, 191).unwrap();
    sink.write(&a, "gradient").expect("write gradient");
    sink.write(&b, "flat").expect("write flat");

    let path_a = sink.path_for("gradient");
    let path_b = sink.path_for("flat");
    rp.compare_values(1.0, if path_a.ends_with("gradient.pgm") { 1.0 } else { 0.0 }, 0.0);
    rp.compare_grid(&a, &read_image(&path_a).expect("read gradient"));
    rp.compare_grid(&b, &read_image(&path_b).expect("read flat"));

    assert!(rp.cleanup(), "sink_file regression test failed");
}

#[test]
fn sink_reg_memory() {
    let mut rp = RegParams::new("sink_memory");

    let mut sink = MemorySink::new();
    let grids: Vec<_> = (0..4u8)
        .map(|i| synthetic::constant(3, 3, i * 50).unwrap())
        .collect();
    let names = ["original", "background", "compensated", "denoised"];
    for (grid, name) in grids.iter().zip(names) {
        sink.write(grid, name).unwrap();
    }

    rp.compare_values(4.0, sink.len() as f64, 0.0);
    let recorded = sink.destinations();
    for (i, name) in names.iter().enumerate() {
        rp.compare_values(1.0, if recorded[i] == *name { 1.0 } else { 0.0 }, 0.0);
        rp.compare_grid(&grids[i], sink.get(name).unwrap());
    }

    assert!(rp.cleanup(), "sink_memory regression test failed");
}

use std::sync::Arc;

use fastnoise_core::{
    GridConvention, Node, NoiseError, OutputMinMax, Registry, Spacing, TileScale, UniformGrid,
};
use fastnoise_test_fixtures::MockEngine;

fn setup() -> (Arc<MockEngine>, Arc<Registry>) {
    let engine = Arc::new(MockEngine::new());
    let registry = Registry::load(engine.clone());
    (engine, registry)
}

/// Fractal FBm over Simplex, the usual two-level tree.
fn fbm_over_simplex(registry: &Arc<Registry>) -> Node {
    let simplex = Node::new(registry, "Simplex").expect("simplex");
    let mut fbm = Node::new(registry, "Fractal FBm").expect("fbm");
    fbm.set("Source", &simplex).expect("source");
    fbm.set("Gain", 0.3_f32).expect("gain");
    fbm.set("Lacunarity", 0.6_f32).expect("lacunarity");
    fbm
}

fn assert_bounds(range: OutputMinMax, samples: &[f32]) {
    for &s in samples {
        assert!(
            range.min <= s && s <= range.max,
            "{s} outside {}..{}",
            range.min,
            range.max
        );
    }
    let lo = samples.iter().copied().fold(f32::INFINITY, f32::min);
    let hi = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(range, OutputMinMax::new(lo, hi));
}

#[test]
fn fractal_tree_grid_min_max_bounds_every_sample() {
    let (_, registry) = setup();
    let fbm = fbm_over_simplex(&registry);

    let mut out = vec![0.0; 16];
    let grid = UniformGrid::new([4, 4], Spacing::uniform_step([0.0, 0.0], 0.02));
    let range = fbm
        .gen_uniform_grid_2d(&mut out, &grid, 1337)
        .expect("4x4 grid");
    assert_bounds(range, &out);
}

#[test]
fn exact_buffer_succeeds_and_one_short_fails_before_the_engine() {
    let (engine, registry) = setup();
    let node = Node::new(&registry, "Simplex").expect("simplex");
    let grid = UniformGrid::new([5, 3], Spacing::uniform_step([0.0, 0.0], 0.1));

    let mut exact = vec![0.0; 15];
    node.gen_uniform_grid_2d(&mut exact, &grid, 0).expect("exact fit");
    assert_eq!(engine.calls().generation_calls(), 1);

    let mut short = vec![0.0; 14];
    let err = node
        .gen_uniform_grid_2d(&mut short, &grid, 0)
        .expect_err("one element short");
    assert_eq!(
        err,
        NoiseError::BufferTooSmall {
            required: 15,
            actual: 14
        }
    );
    assert_eq!(engine.calls().generation_calls(), 1);
    assert!(short.iter().all(|&v| v == 0.0));
}

#[test]
fn oversized_buffers_keep_their_tail() {
    let (_, registry) = setup();
    let node = Node::new(&registry, "Constant").expect("constant");
    let mut out = vec![-7.0; 20];
    let grid = UniformGrid::new([2, 2, 2], Spacing::uniform_step([0.0; 3], 1.0));
    let range = node.gen_uniform_grid_3d(&mut out, &grid, 0).expect("3d grid");
    assert_eq!(range, OutputMinMax::new(1.0, 1.0));
    assert!(out[..8].iter().all(|&v| v == 1.0));
    assert!(out[8..].iter().all(|&v| v == -7.0));
}

#[test]
fn grids_of_every_dimension_report_their_range() {
    let (_, registry) = setup();
    let node = fbm_over_simplex(&registry);

    let mut out2 = vec![0.0; 6 * 5];
    let grid2 = UniformGrid::new([6, 5], Spacing::stepped([0.5, -0.5], [0.1, 0.2]));
    let range = node.gen_uniform_grid_2d(&mut out2, &grid2, 3).expect("2d");
    assert_bounds(range, &out2);

    let mut out3 = vec![0.0; 4 * 3 * 2];
    let grid3 = UniformGrid::new([4, 3, 2], Spacing::uniform_step([1.0; 3], 0.3));
    let range = node.gen_uniform_grid_3d(&mut out3, &grid3, 3).expect("3d");
    assert_bounds(range, &out3);

    let mut out4 = vec![0.0; 3 * 3 * 2 * 2];
    let grid4 = UniformGrid::new([3, 3, 2, 2], Spacing::uniform_step([0.0; 4], 0.7));
    let range = node.gen_uniform_grid_4d(&mut out4, &grid4, 3).expect("4d");
    assert_bounds(range, &out4);
}

#[test]
fn grid_rows_are_row_major_with_x_fastest() {
    let (_, registry) = setup();
    let node = Node::new(&registry, "Simplex").expect("simplex");
    let grid = UniformGrid::new([3, 2], Spacing::stepped([1.0, 2.0], [0.5, 0.25]));
    let mut out = vec![0.0; 6];
    node.gen_uniform_grid_2d(&mut out, &grid, 11).expect("grid");

    for y in 0..2 {
        for x in 0..3 {
            let expected = node.gen_single_2d(1.0 + x as f32 * 0.5, 2.0 + y as f32 * 0.25, 11);
            assert_eq!(out[y * 3 + x], expected, "cell ({x}, {y})");
        }
    }
}

#[test]
fn negative_counts_are_invalid() {
    let (engine, registry) = setup();
    let node = Node::new(&registry, "Simplex").expect("simplex");
    let mut out = vec![0.0; 16];
    let grid = UniformGrid::new([4, -4], Spacing::uniform_step([0.0; 2], 0.1));
    let err = node
        .gen_uniform_grid_2d(&mut out, &grid, 0)
        .expect_err("negative count");
    assert_eq!(err, NoiseError::InvalidCount { axis: "y", count: -4 });
    assert_eq!(engine.calls().generation_calls(), 0);
}

#[test]
fn zero_sized_requests_skip_the_engine() {
    let (engine, registry) = setup();
    let node = Node::new(&registry, "Simplex").expect("simplex");
    let mut out: Vec<f32> = Vec::new();
    let grid = UniformGrid::new([0, 16], Spacing::uniform_step([0.0; 2], 0.1));
    let range = node.gen_uniform_grid_2d(&mut out, &grid, 0).expect("empty grid");
    assert!(range.is_empty());
    let range = node
        .gen_position_array_2d(&mut out, &[], &[], [0.0; 2], 0)
        .expect("empty positions");
    assert!(range.is_empty());
    assert_eq!(engine.calls().generation_calls(), 0);
}

#[test]
fn unequal_position_arrays_are_length_mismatches() {
    let (engine, registry) = setup();
    let node = Node::new(&registry, "Simplex").expect("simplex");
    let base = vec![0.5; 8];
    let mut out = vec![0.0; 16];

    for diff in [1usize, 2, 7] {
        let shorter = vec![0.5; 8 - diff];
        let longer = vec![0.5; 8 + diff];
        for other in [&shorter, &longer] {
            let err = node
                .gen_position_array_2d(&mut out, &base, other, [0.0; 2], 0)
                .expect_err("2d mismatch");
            assert!(matches!(err, NoiseError::LengthMismatch { axis: "y", .. }));

            let err = node
                .gen_position_array_3d(&mut out, &base, &base, other, [0.0; 3], 0)
                .expect_err("3d mismatch");
            assert!(matches!(err, NoiseError::LengthMismatch { axis: "z", .. }));

            let err = node
                .gen_position_array_4d(&mut out, &base, &base, &base, other, [0.0; 4], 0)
                .expect_err("4d mismatch");
            assert!(matches!(err, NoiseError::LengthMismatch { axis: "w", .. }));
        }
    }
    assert_eq!(engine.calls().generation_calls(), 0);
}

#[test]
fn position_arrays_sample_each_tuple_plus_offset() {
    let (_, registry) = setup();
    let node = fbm_over_simplex(&registry);
    let xs = [0.0, 1.5, -2.0, 3.25];
    let ys = [0.5, 0.5, 4.0, -1.0];
    let zs = [1.0, 2.0, 3.0, 4.0];
    let mut out = [0.0; 4];

    let range = node
        .gen_position_array_3d(&mut out, &xs, &ys, &zs, [10.0, 0.0, -1.0], 5)
        .expect("positions");
    assert_bounds(range, &out);
    for i in 0..4 {
        let expected = node.gen_single_3d(xs[i] + 10.0, ys[i], zs[i] - 1.0, 5);
        assert_eq!(out[i], expected);
    }

    let mut short_out = [0.0; 3];
    let err = node
        .gen_position_array_2d(&mut short_out, &xs, &ys, [0.0; 2], 5)
        .expect_err("output shorter than positions");
    assert!(matches!(err, NoiseError::BufferTooSmall { required: 4, actual: 3 }));
}

#[test]
fn tileable_output_wraps_at_the_edges() {
    let (_, registry) = setup();
    let node = Node::new(&registry, "Simplex").expect("simplex");
    let (w, h) = (16usize, 8usize);
    let mut out = vec![0.0; w * h];
    let range = node
        .gen_tileable_2d(&mut out, [w as i32, h as i32], TileScale::Stepped([0.1, 0.1]), 8)
        .expect("tileable");
    assert_bounds(range, &out);

    // Neighbouring samples across the seam differ no more than neighbours inside it.
    let max_inner_step = (0..h)
        .flat_map(|y| (1..w).map(move |x| (y, x)))
        .map(|(y, x)| (out[y * w + x] - out[y * w + x - 1]).abs())
        .fold(0.0_f32, f32::max);
    for y in 0..h {
        let seam = (out[y * w] - out[y * w + w - 1]).abs();
        assert!(seam <= max_inner_step * 2.0 + 1e-4, "row {y} seam {seam}");
    }
}

#[test]
fn conventions_are_never_translated() {
    let engine = Arc::new(MockEngine::new().with_convention(GridConvention::Frequency));
    let registry = Registry::load(engine.clone());
    let node = Node::new(&registry, "Simplex").expect("simplex");
    let mut out = vec![0.0; 16];

    let stepped = UniformGrid::new([4, 4], Spacing::uniform_step([0.0; 2], 0.02));
    assert_eq!(
        node.gen_uniform_grid_2d(&mut out, &stepped, 0).expect_err("stepped on frequency engine"),
        NoiseError::UnsupportedConvention {
            convention: GridConvention::Stepped
        }
    );
    assert!(matches!(
        node.gen_tileable_2d(&mut out, [4, 4], TileScale::Stepped([0.1; 2]), 0),
        Err(NoiseError::UnsupportedConvention { .. })
    ));
    assert_eq!(engine.calls().generation_calls(), 0);

    let legacy = UniformGrid::new([4, 4], Spacing::frequency([2, -3], 0.02));
    let range = node.gen_uniform_grid_2d(&mut out, &legacy, 0).expect("frequency grid");
    assert_bounds(range, &out);
    assert_eq!(out[0], node.gen_single_2d(2.0 * 0.02, -3.0 * 0.02, 0));
}

#[test]
fn parallel_bands_match_a_single_call() {
    let (_, registry) = setup();
    let node = fbm_over_simplex(&registry);
    let grid = UniformGrid::new([32, 23], Spacing::stepped([-1.0, 3.0], [0.05, 0.07]));

    let mut whole = vec![0.0; 32 * 23];
    let single = node.gen_uniform_grid_2d(&mut whole, &grid, 77).expect("single call");

    for rows_per_batch in [1, 4, 5, 23, 100] {
        let mut banded = vec![0.0; 32 * 23];
        let merged = node
            .gen_uniform_grid_2d_par(&mut banded, &grid, 77, rows_per_batch)
            .expect("banded call");
        assert!(
            (merged.min - single.min).abs() <= 1e-5 && (merged.max - single.max).abs() <= 1e-5,
            "rows_per_batch {rows_per_batch}: {merged:?} vs {single:?}"
        );
        for (i, (a, b)) in whole.iter().zip(&banded).enumerate() {
            assert!((a - b).abs() <= 1e-5, "sample {i}: {a} vs {b}");
        }
    }
}

#[test]
fn parallel_bands_validate_like_a_single_call() {
    let (engine, registry) = setup();
    let node = Node::new(&registry, "Simplex").expect("simplex");
    let grid = UniformGrid::new([8, 8], Spacing::uniform_step([0.0; 2], 0.1));
    let mut short = vec![0.0; 63];
    assert!(matches!(
        node.gen_uniform_grid_2d_par(&mut short, &grid, 0, 2),
        Err(NoiseError::BufferTooSmall { required: 64, actual: 63 })
    ));
    assert_eq!(engine.calls().generation_calls(), 0);
}

#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use plotstat::internals::primitives::binning::{BinAnchor, BinLayout, bin_index, bins_for_width};
use plotstat::internals::primitives::errors::StatsError;
use plotstat::internals::primitives::grid::{Grid2D, GridSpec};

// ============================================================================
// Binning
// ============================================================================

#[test]
fn test_bin_anchor_offset() {
    assert_eq!(BinAnchor::Left.offset(2.0), 0.0);
    assert_eq!(BinAnchor::Mid.offset(2.0), 1.0);
    assert_eq!(BinAnchor::Right.offset(2.0), 2.0);
    assert_eq!(BinAnchor::default(), BinAnchor::Left);
}

#[test]
fn test_bin_layout_default() {
    assert_eq!(BinLayout::default(), BinLayout::Count(11));
}

#[test]
fn test_bins_for_width() {
    assert_eq!(bins_for_width(10.0, 2.0), 5);
    assert_eq!(bins_for_width(10.0, 3.0), 4);
    // Degenerate range still yields one bin
    assert_eq!(bins_for_width(0.0, 1.0), 1);
}

#[test]
fn test_bin_index_clamps() {
    assert_eq!(bin_index(0.0, 0.0, 1.0, 4), 0);
    assert_eq!(bin_index(2.5, 0.0, 1.0, 4), 2);
    // The maximum lands in the last bin
    assert_eq!(bin_index(4.0, 0.0, 1.0, 4), 3);
    assert_eq!(bin_index(-3.0, 0.0, 1.0, 4), 0);
    assert_eq!(bin_index(100.0, 0.0, 1.0, 4), 3);
    // Zero width maps everything to the first bin
    assert_eq!(bin_index(1.0, 1.0, 0.0, 4), 0);
}

// ============================================================================
// GridSpec
// ============================================================================

#[test]
fn test_grid_spec_steps() {
    let spec = GridSpec::new(0.0, 10.0, -1.0, 1.0, 5, 4);
    assert_relative_eq!(spec.x_step(), 2.0);
    assert_relative_eq!(spec.y_step(), 0.5);
    assert!(spec.validate().is_ok());
}

#[test]
fn test_grid_spec_from_widths() {
    let spec = GridSpec::from_widths(0.0, 10.0, 0.0, 1.0, 3.0, 0.25).unwrap();
    assert_eq!(spec.nx, 4);
    assert_eq!(spec.ny, 4);

    let err = GridSpec::from_widths(0.0, 1.0, 0.0, 1.0, 0.0, 1.0).unwrap_err();
    assert_eq!(err, StatsError::InvalidBinWidth(0.0));
}

#[test]
fn test_grid_spec_autoranged() {
    let x = [3.0, f64::NAN, -1.0, 2.0];
    let y = [5.0, 7.0, 0.0, f64::INFINITY];
    let spec = GridSpec::autoranged(&x, &y, 10, 20).unwrap();
    assert_eq!((spec.xmin, spec.xmax), (-1.0, 3.0));
    assert_eq!((spec.ymin, spec.ymax), (0.0, 7.0));
    assert_eq!((spec.nx, spec.ny), (10, 20));

    let empty: [f64; 0] = [];
    assert_eq!(
        GridSpec::autoranged(&empty, &y, 2, 2).unwrap_err(),
        StatsError::EmptyInput
    );
}

#[test]
fn test_grid_spec_validate_rejects() {
    assert!(matches!(
        GridSpec::new(0.0, 1.0, 0.0, 1.0, 0, 3).validate(),
        Err(StatsError::InvalidGrid(_))
    ));
    assert!(matches!(
        GridSpec::new(0.0, f64::NAN, 0.0, 1.0, 2, 3).validate(),
        Err(StatsError::InvalidGrid(_))
    ));
}

// ============================================================================
// Grid2D
// ============================================================================

#[test]
fn test_grid2d_layout() {
    let spec = GridSpec::new(0.0, 4.0, 10.0, 12.0, 4, 2);
    let mut grid = Grid2D::zeros(spec);
    assert_eq!(grid.values.len(), 8);

    // Cell (ix = 2, iy = 1)
    grid.values[6] = 3.0;
    assert_eq!(grid.get(2, 1), Some(3.0));
    assert_eq!(grid.get(4, 0), None);
    assert_eq!(grid.get(0, 2), None);
    assert_relative_eq!(grid.total(), 3.0);

    assert_eq!(grid.x_positions(), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(grid.y_positions(), vec![10.0, 11.0]);
}

#[test]
fn test_grid2d_display() {
    let grid = Grid2D::zeros(GridSpec::new(0.0, 1.0, 0.0, 1.0, 2, 2));
    let text = format!("{}", grid);
    assert!(text.starts_with("Grid:"));
    assert!(text.contains("in 2 cells"));
}

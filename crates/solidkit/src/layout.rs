//! Arrangement helpers.

use crate::{BuildError, SolidBuilder};

/// Arrange clones of `item` in a grid on the XY plane.
///
/// The first clone stays where `item` is; the others are spaced evenly so
/// the last column sits `width` to the right and the last row `depth`
/// forward. Returns a group whose center anchor is the middle of the grid.
pub fn arrange_grid(
    item: &SolidBuilder,
    rows: usize,
    columns: usize,
    width: f64,
    depth: f64,
) -> Result<SolidBuilder, BuildError> {
    if rows < 2 || columns < 2 {
        return Err(BuildError::InvalidParameter(format!(
            "grid needs at least 2 rows and 2 columns, got {rows} x {columns}"
        )));
    }
    if !width.is_finite() || !depth.is_finite() {
        return Err(BuildError::InvalidParameter(
            "grid extent must be finite".to_string(),
        ));
    }

    let column_spacing = width / (columns - 1) as f64;
    let row_spacing = depth / (rows - 1) as f64;

    let mut grid = SolidBuilder::empty();
    for row in 0..rows {
        for column in 0..columns {
            let copy = item
                .clone()
                .right(column as f64 * column_spacing)
                .forward(row as f64 * row_spacing);
            grid = grid.add(copy);
        }
    }
    log::debug!("arranged {rows} x {columns} grid over {width} x {depth}");

    grid.set_center(width / 2.0, depth / 2.0, 0.0);
    Ok(grid)
}

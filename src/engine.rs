//! Generation update for Conway's Game of Life on a torus.
//!
//! Every cell reads its eight Moore neighbours from the same snapshot; the
//! result is written into a separate buffer, so the input is never observed
//! half-updated.

use crate::grid::{check_cells, ALIVE, DEAD};
use crate::{Grid, LifeError, Result};

#[cfg(test)]
mod tests;

/// Compute the next generation into a fresh grid.
pub fn step(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    update_cells(grid.cells(), next.cells_mut(), grid.width(), grid.height());
    next
}

/// Compute the next generation of `src` into `dst`.
///
/// `dst` must have the same dimensions as `src`; its previous content is
/// overwritten entirely.
pub fn step_into(src: &Grid, dst: &mut Grid) -> Result<()> {
    if !src.same_dimensions(dst) {
        return Err(LifeError::DimensionMismatch {
            expected: src.cells().len(),
            actual: dst.cells().len(),
        });
    }
    update_cells(src.cells(), dst.cells_mut(), src.width(), src.height());
    Ok(())
}

/// Compute the next generation of raw row-major cells, as received in a
/// step request.
pub fn step_cells(cells: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    check_cells(cells, width, height)?;
    let mut next = vec![DEAD; cells.len()];
    update_cells(cells, &mut next, width, height);
    Ok(next)
}

/// Number of live cells among the eight wrapped neighbours of (x, y).
pub fn count_neighbors(grid: &Grid, x: usize, y: usize) -> Result<u8> {
    let (w, h) = (grid.width(), grid.height());
    if x >= w || y >= h {
        return Err(LifeError::OutOfRange {
            x,
            y,
            width: w,
            height: h,
        });
    }
    let cells = grid.cells();
    let (up, down) = (wrap_dec(y, h) * w, wrap_inc(y, h) * w);
    let row = y * w;
    let (left, right) = (wrap_dec(x, w), wrap_inc(x, w));
    Ok(cells[up + left]
        + cells[up + x]
        + cells[up + right]
        + cells[row + left]
        + cells[row + right]
        + cells[down + left]
        + cells[down + x]
        + cells[down + right])
}

/// Life rule: survive on 2 or 3, birth on 3.
#[inline]
pub fn next_state(cell: u8, neighbors: u8) -> u8 {
    match (cell, neighbors) {
        (ALIVE, 2) | (ALIVE, 3) | (DEAD, 3) => ALIVE,
        _ => DEAD,
    }
}

#[inline]
fn wrap_dec(i: usize, n: usize) -> usize {
    if i == 0 {
        n - 1
    } else {
        i - 1
    }
}

#[inline]
fn wrap_inc(i: usize, n: usize) -> usize {
    if i + 1 == n {
        0
    } else {
        i + 1
    }
}

fn update_cells(src: &[u8], dst: &mut [u8], width: usize, height: usize) {
    debug_assert_eq!(src.len(), width * height);
    debug_assert_eq!(dst.len(), src.len());

    for (y, dst_row) in dst.chunks_exact_mut(width).enumerate() {
        // wrapped rows are resolved once per row, not per cell
        let row_prev = &src[wrap_dec(y, height) * width..][..width];
        let row_curr = &src[y * width..][..width];
        let row_next = &src[wrap_inc(y, height) * width..][..width];

        for (x, dst_cell) in dst_row.iter_mut().enumerate() {
            let (x1, x2) = (wrap_dec(x, width), wrap_inc(x, width));
            let neighbors = row_prev[x1]
                + row_prev[x]
                + row_prev[x2]
                + row_curr[x1]
                + row_curr[x2]
                + row_next[x1]
                + row_next[x]
                + row_next[x2];
            *dst_cell = next_state(row_curr[x], neighbors);
        }
    }
}

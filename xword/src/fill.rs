//! Driving the solver and turning covers back into grids.

use anyhow::{Result, bail};
use dancing::{Data, Link, Matrix};
use log::debug;

use crate::dict::Dictionary;
use crate::encode::{
    self, ACROSS_COLUMN, COLS_PER_SLICE, DOWN_COLUMN, ORIENTATION_PAIR,
    SliceTable,
};
use crate::grid::Grid;

/// Callback sentinel that stops the search once enough solutions have
/// been printed.
const BAIL: Data = -99;

#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Skip the duplicate-entry precondition and solution filter.
    pub allow_duplicate_words: bool,
    /// Emit at most this many solutions, then stop searching.
    pub max_solutions: Option<usize>,
    /// Emit only every nth otherwise-acceptable solution.
    pub every_nth: usize,
    /// Give every cell a slice instead of compressing fixed cells out.
    pub naive_matrix: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            allow_duplicate_words: false,
            max_solutions: None,
            every_nth: 1,
            naive_matrix: false,
        }
    }
}

/// Fills the grid with dictionary words, streaming every complete
/// filling to the sink. Returns the number of grids emitted; finding
/// none is not an error.
pub fn fill<F>(
    grid: &Grid,
    dict: &dyn Dictionary,
    config: &Config,
    mut sink: F,
) -> Result<usize>
where
    F: FnMut(&Grid),
{
    if !config.allow_duplicate_words && grid.contains_duplicates() {
        bail!("the input grid contains duplicate words");
    }
    let (mut mat, slices) = encode::build(
        grid,
        dict,
        config.naive_matrix,
        config.allow_duplicate_words,
    )?;
    debug!(
        "the completed matrix has {} columns and {} rows",
        mat.ncolumns(),
        mat.nrows()
    );

    let mut printed = 0usize;
    let mut skipped = 0usize;
    let total = mat.solve(|rows, mat| {
        if config.every_nth > 1 {
            skipped += 1;
            if skipped < config.every_nth {
                return 0;
            }
            skipped = 0;
        }
        let solution = decode(grid, &slices, rows, mat);
        if !config.allow_duplicate_words && solution.contains_duplicates() {
            // Dropped silently; does not count toward the quota.
            return 0;
        }
        sink(&solution);
        printed += 1;
        match config.max_solutions {
            Some(max) if printed == max => BAIL,
            _ => 1,
        }
    });
    debug_assert!(total == BAIL || total >= 0);
    Ok(printed)
}

/// Rebuilds a filled grid from a cover. Only across rows are read:
/// each carries the chosen letter of every unknown cell it passes
/// through as the left-half 1 of that cell's letter pair. Down rows
/// assert the same letters by construction, and a row holding both
/// orientation halves is a naive-mode black filler.
fn decode(
    grid: &Grid,
    slices: &SliceTable,
    rows: &[Link],
    mat: &Matrix,
) -> Grid {
    let mut solution = grid.clone();
    for &node in rows {
        let mut across = false;
        let mut down = false;
        for n in mat.row_nodes(node) {
            match mat.column_of(n) % COLS_PER_SLICE {
                ACROSS_COLUMN => across = true,
                DOWN_COLUMN => down = true,
                _ => {}
            }
        }
        debug_assert!(across || down);
        if down {
            continue;
        }
        for n in mat.row_nodes(node) {
            let colx = mat.column_of(n);
            if colx % 2 != 0 {
                continue;
            }
            let pair = (colx % COLS_PER_SLICE) / 2;
            if pair == ORIENTATION_PAIR {
                continue;
            }
            let cell = slices.cell_of(colx / COLS_PER_SLICE);
            solution.set(cell, b'a' + pair as u8);
        }
    }
    solution
}

//! The reduction from grid filling to exact cover.
//!
//! The matrix is organised in 54-column slices, one per grid cell
//! whose value is still unknown (or one per cell in naive mode). A
//! slice holds 27 column pairs: one pair per letter a-z and one
//! "across or down" pair. An across row placing letter i in a cell
//! puts a 1 in the left half of pair i, the right half of every other
//! letter pair, and the left half of the orientation pair; a down row
//! asserting the same letter supplies exactly the complementary
//! halves. An exact cover therefore picks one across and one down row
//! through every unknown cell, agreeing on its letter.

use anyhow::Result;
use dancing::{Count, Matrix};
use log::debug;

use crate::dict::{Dictionary, MIN_WORDLEN};
use crate::grid::{Direction, Grid, is_fixed};
use crate::matcher::{Fit, entry_fits, letter_index, matches};

/// Column pairs per slice: the 26 letters plus the orientation pair.
pub const PAIRS_PER_SLICE: usize = 27;
/// Columns per slice.
pub const COLS_PER_SLICE: usize = 2 * PAIRS_PER_SLICE;

/// Pair index of the "across or down" pair within a slice.
pub(crate) const ORIENTATION_PAIR: usize = 26;
/// Column residues (mod `COLS_PER_SLICE`) of the orientation halves.
pub(crate) const ACROSS_COLUMN: usize = 2 * ORIENTATION_PAIR;
pub(crate) const DOWN_COLUMN: usize = 2 * ORIENTATION_PAIR + 1;

/// The mapping between grid cells and matrix slices. Compressed mode
/// gives a slice to unknown cells only; naive mode to every cell.
#[derive(Clone, Debug)]
pub struct SliceTable {
    cell_to_slice: Vec<Option<usize>>,
    slice_to_cell: Vec<usize>,
}

impl SliceTable {
    pub fn new(grid: &Grid, naive: bool) -> SliceTable {
        let mut cell_to_slice = Vec::with_capacity(grid.ncells());
        let mut slice_to_cell = Vec::new();
        for cell in 0..grid.ncells() {
            if naive || !is_fixed(grid.at(cell)) {
                cell_to_slice.push(Some(slice_to_cell.len()));
                slice_to_cell.push(cell);
            } else {
                cell_to_slice.push(None);
            }
        }
        SliceTable { cell_to_slice, slice_to_cell }
    }

    /// Number of slices; the matrix has 54 columns per slice.
    #[inline]
    pub fn len(&self) -> usize {
        self.slice_to_cell.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slice_to_cell.is_empty()
    }

    #[inline]
    pub fn slice_of(&self, cell: usize) -> Option<usize> {
        self.cell_to_slice[cell]
    }

    #[inline]
    pub fn cell_of(&self, slice: usize) -> usize {
        self.slice_to_cell[slice]
    }
}

/// Builds the exact-cover matrix for a grid and dictionary.
pub(crate) fn build(
    grid: &Grid,
    dict: &dyn Dictionary,
    naive: bool,
    allow_duplicates: bool,
) -> Result<(Matrix, SliceTable)> {
    let slices = SliceTable::new(grid, naive);
    let words = prune_words(grid, dict, allow_duplicates);
    let mut mat = Matrix::new(COLS_PER_SLICE * slices.len());
    for word in &words {
        add_rows_for_word(&mut mat, grid, &slices, word)?;
    }
    if naive {
        for cell in 0..grid.ncells() {
            if grid.at(cell) == b'#' {
                add_black_row(&mut mat, &slices, cell)?;
                debug!(
                    "added black row for cell ({}, {})",
                    cell / grid.width(),
                    cell % grid.width()
                );
            }
        }
        add_forced_rows(&mut mat, grid, &slices)?;
    }
    add_letter_rows(&mut mat, grid, &slices)?;
    Ok((mat, slices))
}

/// Keeps only the words worth turning into rows: a word that fits
/// nowhere in the grid is useless, and when duplicates are rejected a
/// word the grid already spells in full must not be placed again.
fn prune_words(
    grid: &Grid,
    dict: &dyn Dictionary,
    allow_duplicates: bool,
) -> Vec<String> {
    let mut kept = Vec::new();
    let mut removed = 0usize;
    dict.for_each_word(&mut |word| {
        if keeps_word(grid, word.as_bytes(), allow_duplicates) {
            kept.push(word.to_string());
        } else {
            removed += 1;
        }
    });
    debug!(
        "pruned {} unusable or already-placed words, keeping {}",
        removed,
        kept.len()
    );
    kept
}

fn keeps_word(grid: &Grid, word: &[u8], allow_duplicates: bool) -> bool {
    let mut fits = false;
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            for dir in [Direction::Across, Direction::Down] {
                match entry_fits(grid, row, col, dir, word) {
                    Fit::No => {}
                    Fit::Exact if !allow_duplicates => return false,
                    _ => {
                        if allow_duplicates {
                            return true;
                        }
                        fits = true;
                    }
                }
            }
        }
    }
    fits
}

/// One row per loose placement of the word. Exact placements are
/// skipped: the grid already spells them, so there is nothing left to
/// decide.
fn add_rows_for_word(
    mat: &mut Matrix,
    grid: &Grid,
    slices: &SliceTable,
    word: &str,
) -> Result<()> {
    let bytes = word.as_bytes();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            for dir in [Direction::Across, Direction::Down] {
                if entry_fits(grid, row, col, dir, bytes) == Fit::Loose {
                    add_placement(mat, grid, slices, row, col, dir, bytes)?;
                    debug!("added row {:?}({}, {}, {})", dir, row, col, word);
                }
            }
        }
    }
    Ok(())
}

fn add_placement(
    mat: &mut Matrix,
    grid: &Grid,
    slices: &SliceTable,
    row: usize,
    col: usize,
    dir: Direction,
    word: &[u8],
) -> Result<()> {
    let mut columns = Vec::with_capacity(word.len() * PAIRS_PER_SLICE);
    for (k, &ch) in word.iter().enumerate() {
        let cell = match dir {
            Direction::Across => row * grid.width() + col + k,
            Direction::Down => (row + k) * grid.width() + col,
        };
        push_slice_columns(&mut columns, slices, cell, letter_index(ch), dir);
    }
    mat.add_row(&columns)
}

/// The 27 column indices a row contributes for one cell: its own half
/// of the matching letter pair, the opposite half of every other
/// letter pair, and its own half of the orientation pair. Across rows
/// own the left (even) halves, down rows the right (odd) halves.
/// Cells without a slice contribute nothing.
fn push_slice_columns(
    columns: &mut Vec<Count>,
    slices: &SliceTable,
    cell: usize,
    letter: usize,
    dir: Direction,
) {
    let Some(slice) = slices.slice_of(cell) else {
        return;
    };
    let base = COLS_PER_SLICE * slice;
    let own = match dir {
        Direction::Across => 0,
        Direction::Down => 1,
    };
    for m in 0..ORIENTATION_PAIR {
        let half = if m == letter { own } else { 1 - own };
        columns.push(base + 2 * m + half);
    }
    columns.push(base + 2 * ORIENTATION_PAIR + own);
}

/// Naive mode only: a black cell's slice is covered by a single row
/// holding both halves of all 27 pairs, which every cover must pick.
fn add_black_row(
    mat: &mut Matrix,
    slices: &SliceTable,
    cell: usize,
) -> Result<()> {
    let Some(slice) = slices.slice_of(cell) else {
        return Ok(());
    };
    let base = COLS_PER_SLICE * slice;
    let mut columns = Vec::with_capacity(COLS_PER_SLICE);
    for m in 0..PAIRS_PER_SLICE {
        columns.push(base + 2 * m);
        columns.push(base + 2 * m + 1);
    }
    mat.add_row(&columns)
}

/// Naive mode only: a maximal segment made entirely of fixed letters
/// is played as if it were a dictionary word, so that partially-known
/// corners of a larger puzzle stay coverable.
fn add_forced_rows(
    mat: &mut Matrix,
    grid: &Grid,
    slices: &SliceTable,
) -> Result<()> {
    for dir in [Direction::Across, Direction::Down] {
        for seg in grid.segments(dir) {
            if !seg.cells.iter().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            add_placement(mat, grid, slices, seg.row, seg.col, dir, &seg.cells)?;
            debug!("added forced row {:?}({}, {})", dir, seg.row, seg.col);
        }
    }
    Ok(())
}

/// An open cell whose run in one direction is too short to hold a word
/// still needs that direction's half of every column pair. One row per
/// admissible letter supplies them, interlocking with whatever word
/// the crossing run chooses. Cells whose crossing run is also too
/// short get nothing: no word determines them, so the grid is
/// unfillable there.
fn add_letter_rows(
    mat: &mut Matrix,
    grid: &Grid,
    slices: &SliceTable,
) -> Result<()> {
    let across_len = grid.segment_lengths(Direction::Across);
    let down_len = grid.segment_lengths(Direction::Down);
    for cell in 0..grid.ncells() {
        let ch = grid.at(cell);
        if is_fixed(ch) {
            continue;
        }
        for dir in [Direction::Across, Direction::Down] {
            let (own, crossing) = match dir {
                Direction::Across => (across_len[cell], down_len[cell]),
                Direction::Down => (down_len[cell], across_len[cell]),
            };
            if own >= MIN_WORDLEN || crossing < MIN_WORDLEN {
                continue;
            }
            for letter in 0..ORIENTATION_PAIR {
                if matches(ch, b'a' + letter as u8) == Fit::No {
                    continue;
                }
                let mut columns = Vec::with_capacity(PAIRS_PER_SLICE);
                push_slice_columns(&mut columns, slices, cell, letter, dir);
                mat.add_row(&columns)?;
            }
            debug!(
                "added letter rows {:?} for cell ({}, {})",
                dir,
                cell / grid.width(),
                cell % grid.width()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::WordList;

    #[test]
    fn test_slice_table_compressed() {
        let grid = Grid::parse(".as\n.r.\neta\n").unwrap();
        let slices = SliceTable::new(&grid, false);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices.slice_of(0), Some(0));
        assert_eq!(slices.slice_of(1), None);
        assert_eq!(slices.slice_of(3), Some(1));
        assert_eq!(slices.slice_of(5), Some(2));
        assert_eq!(slices.cell_of(0), 0);
        assert_eq!(slices.cell_of(1), 3);
        assert_eq!(slices.cell_of(2), 5);
    }

    #[test]
    fn test_slice_table_naive() {
        let grid = Grid::parse(".as\n.r.\neta\n").unwrap();
        let slices = SliceTable::new(&grid, true);
        assert_eq!(slices.len(), 9);
        for cell in 0..9 {
            assert_eq!(slices.slice_of(cell), Some(cell));
            assert_eq!(slices.cell_of(cell), cell);
        }
    }

    #[test]
    fn test_placement_columns() {
        // One unknown cell: placing "bag" across claims the left half
        // of the a-pair, the right halves of the other letter pairs,
        // and the across half of the orientation pair.
        let grid = Grid::parse("b0g\n").unwrap();
        let slices = SliceTable::new(&grid, false);
        let mut columns = Vec::new();
        push_slice_columns(&mut columns, &slices, 1, 0, Direction::Across);
        let mut expected = vec![0];
        expected.extend((1..26).map(|m| 2 * m + 1));
        expected.push(52);
        assert_eq!(columns, expected);

        let mut columns = Vec::new();
        push_slice_columns(&mut columns, &slices, 1, 0, Direction::Down);
        let mut expected = vec![1];
        expected.extend((1..26).map(|m| 2 * m));
        expected.push(53);
        assert_eq!(columns, expected);

        // Fixed cells contribute nothing in compressed mode.
        let mut columns = Vec::new();
        push_slice_columns(&mut columns, &slices, 0, 1, Direction::Across);
        assert!(columns.is_empty());
    }

    #[test]
    fn test_prune_words() {
        let grid = Grid::parse(".as\n.r.\neta\n").unwrap();
        let dict = WordList::from_words([
            "art", "eta", "has", "hie", "hit", "ire", "sea",
        ])
        .unwrap();
        let kept = prune_words(&grid, &dict, false);
        // "hit" fits nowhere; "art" and "eta" are already in the grid.
        assert_eq!(kept, vec!["has", "hie", "ire", "sea"]);

        // With duplicates allowed only the useless word goes.
        let kept = prune_words(&grid, &dict, true);
        assert_eq!(kept, vec!["art", "eta", "has", "hie", "ire", "sea"]);
    }

    #[test]
    fn test_matrix_dimensions() {
        let grid = Grid::parse(".as\n.r.\neta\n").unwrap();
        let dict = WordList::from_words([
            "art", "eta", "has", "hie", "hit", "ire", "sea",
        ])
        .unwrap();
        let (mat, slices) = build(&grid, &dict, false, false).unwrap();
        assert_eq!(slices.len(), 3);
        assert_eq!(mat.ncolumns(), 54 * 3);
        // has across; hie down; ire across and down; sea down.
        assert_eq!(mat.nrows(), 5);

        let (mat, slices) = build(&grid, &dict, true, false).unwrap();
        assert_eq!(slices.len(), 9);
        assert_eq!(mat.ncolumns(), 54 * 9);
        // The same five placements plus the forced rows for "eta"
        // across and "art" down; no cell is black.
        assert_eq!(mat.nrows(), 5 + 2);
    }

    #[test]
    fn test_letter_rows() {
        // The down runs of a single-row grid are too short for words,
        // so the open cell gets one down row per admissible letter.
        let grid = Grid::parse("b0g\n").unwrap();
        let slices = SliceTable::new(&grid, false);
        let mut mat = Matrix::new(54);
        add_letter_rows(&mut mat, &grid, &slices).unwrap();
        assert_eq!(mat.nrows(), 6, "one row per vowel");

        // No crossing word run, no letter rows.
        let grid = Grid::parse(".#.\n").unwrap();
        let slices = SliceTable::new(&grid, false);
        let mut mat = Matrix::new(108);
        add_letter_rows(&mut mat, &grid, &slices).unwrap();
        assert_eq!(mat.nrows(), 0);
    }
}

//! Matching letters against cell constraints.

use crate::grid::{Direction, Grid};

const VOWELS: &[u8] = b"aeiouy";
const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwxyz";

/// How well a candidate matches a constraint. `Loose` means the match
/// involved an open cell, so choosing it narrows the grid; `Exact`
/// means the grid already spells it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fit {
    No,
    Loose,
    Exact,
}

/// Whether one word letter is admissible in one grid cell. The
/// arguments are symmetric, so patterns can be matched against each
/// other as well.
pub fn matches(a: u8, b: u8) -> Fit {
    if a == b'#' || b == b'#' {
        Fit::No
    } else if a == b'.' || b == b'.' {
        Fit::Loose
    } else if (VOWELS.contains(&a) && b == b'0')
        || (VOWELS.contains(&b) && a == b'0')
        || (CONSONANTS.contains(&a) && b == b'1')
        || (CONSONANTS.contains(&b) && a == b'1')
    {
        Fit::Loose
    } else if a.to_ascii_lowercase() == b.to_ascii_lowercase() {
        Fit::Exact
    } else {
        Fit::No
    }
}

/// Letter-pair index of a word character; anything non-alphabetic is
/// treated as the letter x.
#[inline]
pub(crate) fn letter_index(ch: u8) -> usize {
    if ch.is_ascii_alphabetic() {
        (ch.to_ascii_lowercase() - b'a') as usize
    } else {
        (b'x' - b'a') as usize
    }
}

/// Whether a word can be placed at (row, col) in the given direction:
/// the run must end at the grid edge or a black square on both sides,
/// and every letter must match its cell. `Exact` means the grid
/// already spells the word verbatim.
pub fn entry_fits(
    grid: &Grid,
    row: usize,
    col: usize,
    dir: Direction,
    word: &[u8],
) -> Fit {
    let len = word.len();
    match dir {
        Direction::Across => {
            if col + len > grid.width() {
                return Fit::No;
            }
            if col > 0 && grid.cell(row, col - 1) != b'#' {
                return Fit::No;
            }
            if col + len < grid.width() && grid.cell(row, col + len) != b'#' {
                return Fit::No;
            }
        }
        Direction::Down => {
            if row + len > grid.height() {
                return Fit::No;
            }
            if row > 0 && grid.cell(row - 1, col) != b'#' {
                return Fit::No;
            }
            if row + len < grid.height() && grid.cell(row + len, col) != b'#' {
                return Fit::No;
            }
        }
    }
    let mut exact = true;
    for (k, &ch) in word.iter().enumerate() {
        let cell = match dir {
            Direction::Across => grid.cell(row, col + k),
            Direction::Down => grid.cell(row + k, col),
        };
        match matches(cell, ch) {
            Fit::No => return Fit::No,
            Fit::Loose => exact = false,
            Fit::Exact => {}
        }
    }
    if exact { Fit::Exact } else { Fit::Loose }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_black() {
        assert_eq!(matches(b'#', b'a'), Fit::No);
        assert_eq!(matches(b'a', b'#'), Fit::No);
    }

    #[test]
    fn test_matches_open() {
        assert_eq!(matches(b'.', b'q'), Fit::Loose);
        assert_eq!(matches(b'q', b'.'), Fit::Loose);
    }

    #[test]
    fn test_matches_vowel() {
        for v in *b"aeiouy" {
            assert_eq!(matches(b'0', v), Fit::Loose, "vowel {}", v as char);
        }
        assert_eq!(matches(b'0', b'f'), Fit::No);
        assert_eq!(matches(b'e', b'0'), Fit::Loose);
    }

    #[test]
    fn test_matches_consonant() {
        assert_eq!(matches(b'1', b'b'), Fit::Loose);
        assert_eq!(matches(b'1', b'y'), Fit::No, "y counts as a vowel");
        assert_eq!(matches(b'1', b'e'), Fit::No);
        assert_eq!(matches(b'g', b'1'), Fit::Loose);
    }

    #[test]
    fn test_matches_letters() {
        assert_eq!(matches(b'a', b'a'), Fit::Exact);
        assert_eq!(matches(b'a', b'A'), Fit::Exact);
        assert_eq!(matches(b'a', b'b'), Fit::No);
    }

    #[test]
    fn test_letter_index() {
        assert_eq!(letter_index(b'a'), 0);
        assert_eq!(letter_index(b'Z'), 25);
        assert_eq!(letter_index(b'-'), 23);
    }

    #[test]
    fn test_entry_fits_wildcards() {
        let grid = Grid::parse("b0g\n").unwrap();
        let fits = |w: &[u8]| entry_fits(&grid, 0, 0, Direction::Across, w);
        assert_eq!(fits(b"bag"), Fit::Loose);
        assert_eq!(fits(b"byg"), Fit::Loose);
        assert_eq!(fits(b"bfg"), Fit::No);
        assert_eq!(fits(b"big!"), Fit::No, "word overruns the grid");
    }

    #[test]
    fn test_entry_fits_boundaries() {
        let grid = Grid::parse("#...\n").unwrap();
        assert_eq!(entry_fits(&grid, 0, 1, Direction::Across, b"cat"), Fit::Loose);
        assert_eq!(
            entry_fits(&grid, 0, 1, Direction::Across, b"at"),
            Fit::No,
            "run must reach the edge or a black square"
        );
        let grid = Grid::parse("...a\n").unwrap();
        assert_eq!(entry_fits(&grid, 0, 0, Direction::Across, b"cat"), Fit::No);
    }

    #[test]
    fn test_entry_fits_exact() {
        let grid = Grid::parse("cat\n").unwrap();
        assert_eq!(entry_fits(&grid, 0, 0, Direction::Across, b"cat"), Fit::Exact);
        assert_eq!(entry_fits(&grid, 0, 0, Direction::Across, b"cut"), Fit::No);
    }

    #[test]
    fn test_entry_fits_down() {
        let grid = Grid::parse(".as\n.r.\neta\n").unwrap();
        assert_eq!(entry_fits(&grid, 0, 0, Direction::Down, b"hie"), Fit::Loose);
        assert_eq!(entry_fits(&grid, 0, 1, Direction::Down, b"art"), Fit::Exact);
        assert_eq!(entry_fits(&grid, 0, 2, Direction::Down, b"sea"), Fit::Loose);
        assert_eq!(entry_fits(&grid, 0, 0, Direction::Down, b"art"), Fit::No);
    }
}

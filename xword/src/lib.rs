//! Filling crossword grids with dictionary words.
//!
//! The grid-filling problem is reduced to exact cover and handed to
//! the `dancing` crate's solver; every cover is decoded back into a
//! completed grid.

pub mod dict;
pub mod encode;
pub mod fill;
pub mod grid;
pub mod matcher;

pub use dict::{Dictionary, WordList};
pub use fill::{Config, fill};
pub use grid::Grid;

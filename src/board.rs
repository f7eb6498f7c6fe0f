use std::fmt::{Debug, Formatter};

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::validate::find_word_path;
use crate::{CellId, Path, ALPHABET};

/// A square board under construction. Each cell is either empty or holds one uppercase letter.
/// Boards are owned by a single generation attempt and never shared.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    dimension: usize,
    cells: Vec<Option<char>>,
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self.cells.chunks(self.dimension.max(1)).map(|row| {
            row.iter().map(|cell| cell.unwrap_or('.')).collect()
        }).collect();

        f.debug_struct("Board")
            .field("dimension", &self.dimension)
            .field("rows", &rows)
            .finish()
    }
}

impl Board {
    /// Create an empty `dimension` x `dimension` board.
    pub fn new(dimension: usize) -> Board {
        Board { dimension, cells: vec![None; dimension * dimension] }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, cell: CellId) -> Option<char> {
        self.cells[cell]
    }

    pub fn set(&mut self, cell: CellId, letter: char) {
        self.cells[cell] = Some(letter);
    }

    /// Can `letter` go in `cell`? True if the cell is empty or already holds that letter.
    pub fn accepts(&self, cell: CellId, letter: char) -> bool {
        self.cells[cell].map(|existing| existing == letter).unwrap_or(true)
    }

    pub fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn neighbors(&self, cell: CellId) -> SmallVec<[CellId; 8]> {
        neighbors(cell, self.dimension)
    }
}

/// All cells 8-adjacent to `cell` on a board of the given dimension, in row-major order.
pub fn neighbors(cell: CellId, dimension: usize) -> SmallVec<[CellId; 8]> {
    let row = cell / dimension;
    let col = cell % dimension;
    let mut result = SmallVec::new();

    for r in row.saturating_sub(1)..=(row + 1).min(dimension - 1) {
        for c in col.saturating_sub(1)..=(col + 1).min(dimension - 1) {
            if r == row && c == col {
                continue;
            }
            result.push(r * dimension + c);
        }
    }

    result
}

/// Are two distinct cells 8-adjacent?
pub fn is_adjacent(a: CellId, b: CellId, dimension: usize) -> bool {
    let (a_row, a_col) = (a / dimension, a % dimension);
    let (b_row, b_col) = (b / dimension, b % dimension);

    a != b && a_row.abs_diff(b_row) <= 1 && a_col.abs_diff(b_col) <= 1
}

/// Row-major cell order with every odd row reversed. Consecutive cells are always adjacent.
pub fn serpentine_order(dimension: usize) -> Vec<CellId> {
    (0..dimension).flat_map(|row| {
        (0..dimension).map(move |col| {
            if row % 2 == 0 {
                row * dimension + col
            } else {
                row * dimension + (dimension - 1 - col)
            }
        })
    }).collect()
}

/// Replace every empty cell with an independently chosen random letter, consuming the board
/// and returning its final row-major letters. Nothing stops the filler from spelling extra
/// words by accident.
pub fn fill_empty_cells<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Vec<char> {
    board.cells.into_iter().map(|cell| {
        cell.unwrap_or_else(|| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
    }).collect()
}

/// A word together with the cells it was written into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub path: Path,
}

/// A finished board, ready to hand to the renderer. Layouts are replaced wholesale rather than
/// edited once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub letters: Vec<char>,
    pub dimension: usize,
    pub placements: Vec<Placement>,
}

impl Layout {
    /// Find a path for `word`, preferring the recorded placement and otherwise searching the
    /// grid for any path that spells it.
    pub fn locate(&self, word: &str) -> Option<Path> {
        let word = word.to_uppercase();

        self.placements.iter()
            .find(|placement| placement.word == word)
            .map(|placement| placement.path.clone())
            .or_else(|| find_word_path(&self.letters, self.dimension, &word))
    }

    pub fn letter_at(&self, cell: CellId) -> Option<char> {
        self.letters.get(cell).copied()
    }
}

/// Turn a layout into one line per row, with letters separated by spaces.
pub fn render_layout(layout: &Layout) -> String {
    layout.letters.chunks(layout.dimension.max(1)).map(|row| {
        row.iter().map(|letter| letter.to_string()).collect::<Vec<_>>().join(" ")
    }).collect::<Vec<_>>().join("\n")
}

/// A nudge toward `word` without giving it away: the first few letters and the length.
pub fn hint_for(word: &str) -> String {
    let letters: Vec<char> = word.to_uppercase().chars().collect();
    let shown = 3.min(letters.len().saturating_sub(1));
    let prefix: String = letters[..shown].iter().collect();

    format!("{}… ({} letters)", prefix, letters.len())
}

use bit_set::BitSet;
use smallvec::SmallVec;

use crate::board::{is_adjacent, neighbors, Layout};
use crate::{CellId, Path, MAX_WORD_LENGTH};

/// Outcome of checking a finished layout against its word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Words that couldn't be found anywhere in the grid.
    pub missing: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Search `letters` (a row-major `dimension` x `dimension` grid) for any path of adjacent,
/// distinct cells spelling `word`. This deliberately ignores how the layout was built, so it
/// can catch a placement that a later word quietly overwrote.
pub fn find_word_path(letters: &[char], dimension: usize, word: &str) -> Option<Path> {
    let target: SmallVec<[char; MAX_WORD_LENGTH]> = word.chars().collect();
    let first_letter = *target.first()?;

    let cell_count = letters.len().min(dimension * dimension);
    let mut visited = BitSet::with_capacity(cell_count);
    let mut path = Path::with_capacity(target.len());

    for start_cell in 0..cell_count {
        if letters[start_cell] != first_letter {
            continue;
        }
        if match_from(letters, dimension, &target, start_cell, &mut visited, &mut path) {
            return Some(path);
        }
    }

    None
}

fn match_from(
    letters: &[char],
    dimension: usize,
    target: &[char],
    cell: CellId,
    visited: &mut BitSet,
    path: &mut Path,
) -> bool {
    if letters[cell] != target[path.len()] {
        return false;
    }

    path.push(cell);
    if path.len() == target.len() {
        return true;
    }

    visited.insert(cell);
    for neighbor in neighbors(cell, dimension) {
        if neighbor >= letters.len() || visited.contains(neighbor) {
            continue;
        }
        if match_from(letters, dimension, target, neighbor, visited, path) {
            visited.remove(cell);
            return true;
        }
    }
    visited.remove(cell);
    path.pop();

    false
}

/// Check that every word in `words` can be found in the layout's grid.
pub fn validate_layout<S: AsRef<str>>(layout: &Layout, words: &[S]) -> ValidationReport {
    let missing = words.iter()
        .map(|word| word.as_ref().to_uppercase())
        .filter(|word| find_word_path(&layout.letters, layout.dimension, word).is_none())
        .collect();

    ValidationReport { missing }
}

/// Is `path` a sequence of distinct, in-bounds cells where each consecutive pair is adjacent?
pub fn is_adjacent_path(path: &[CellId], dimension: usize) -> bool {
    let cell_count = dimension * dimension;
    let mut seen = BitSet::with_capacity(cell_count);

    for &cell in path {
        if cell >= cell_count || !seen.insert(cell) {
            return false;
        }
    }

    path.windows(2).all(|pair| is_adjacent(pair[0], pair[1], dimension))
}

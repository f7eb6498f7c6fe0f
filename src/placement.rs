use bit_set::BitSet;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::board::Board;
use crate::{CellId, Path, MAX_WORD_LENGTH};

/// Try to write `word` onto `board` along a path of adjacent, distinct cells. Each cell on the
/// path must be empty or already hold the matching letter, so words are free to share letters
/// with earlier placements.
///
/// Start cells and neighbor order are shuffled on every call, which is what lets repeated
/// attempts explore different search trees. On success the letters are committed to the board
/// and the path is returned; on failure the board is left untouched.
pub fn place_word<R: Rng + ?Sized>(board: &mut Board, word: &str, rng: &mut R) -> Option<Path> {
    let letters: SmallVec<[char; MAX_WORD_LENGTH]> = word.chars().collect();

    let Some(&first_letter) = letters.first() else {
        return Some(Path::new());
    };

    let mut start_cells: Vec<CellId> = (0..board.cell_count())
        .filter(|&cell| board.accepts(cell, first_letter))
        .collect();
    start_cells.shuffle(rng);

    // Both of these are restored to empty whenever a start cell fails, so they can be reused
    // across starts.
    let mut visited = BitSet::with_capacity(board.cell_count());
    let mut path = Path::with_capacity(letters.len());

    for start_cell in start_cells {
        if extend_path(board, &letters, start_cell, &mut visited, &mut path, rng) {
            for (&cell, &letter) in path.iter().zip(&letters) {
                board.set(cell, letter);
            }
            return Some(path);
        }
    }

    None
}

/// Depth-first step: try to put the next letter of the word (`letters[path.len()]`) in `cell`
/// and then finish the word from there. Returns true with `path` complete on success; on
/// failure `path` and `visited` are exactly as they were before the call.
fn extend_path<R: Rng + ?Sized>(
    board: &Board,
    letters: &[char],
    cell: CellId,
    visited: &mut BitSet,
    path: &mut Path,
    rng: &mut R,
) -> bool {
    if !board.accepts(cell, letters[path.len()]) {
        return false;
    }

    visited.insert(cell);
    path.push(cell);

    if path.len() == letters.len() {
        return true;
    }

    let mut neighbors = board.neighbors(cell);
    neighbors.shuffle(rng);

    for neighbor in neighbors {
        if visited.contains(neighbor) {
            continue;
        }
        if extend_path(board, letters, neighbor, visited, path, rng) {
            return true;
        }
    }

    visited.remove(cell);
    path.pop();
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::is_adjacent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn assert_valid_path(board: &Board, word: &str, path: &Path) {
        assert_eq!(path.len(), word.chars().count(), "path length for {}", word);

        let distinct: HashSet<_> = path.iter().collect();
        assert_eq!(distinct.len(), path.len(), "cells repeat in {:?}", path);

        for (&cell, letter) in path.iter().zip(word.chars()) {
            assert_eq!(board.get(cell), Some(letter));
        }
        for pair in path.windows(2) {
            assert!(is_adjacent(pair[0], pair[1], board.dimension()), "{:?}", pair);
        }
    }

    #[test]
    fn test_place_word_on_empty_board() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::new(4);

        let path = place_word(&mut board, "NEBULA", &mut rng).expect("Failed to place word");

        assert_valid_path(&board, "NEBULA", &path);
        assert_eq!(board.empty_cell_count(), 10);
    }

    #[test]
    fn test_place_word_shares_cells_with_earlier_words() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut board = Board::new(2);

        let cars = place_word(&mut board, "CARS", &mut rng).expect("Failed to place CARS");
        assert_eq!(board.empty_cell_count(), 0);

        // The only way to fit CART now is to reuse C, A and R and fail on T, so it can't go.
        assert_eq!(place_word(&mut board, "CART", &mut rng), None);

        // But the reverse of an existing word can always reuse every cell.
        let sra = place_word(&mut board, "SRAC", &mut rng).expect("Failed to place SRAC");
        let reversed: Vec<_> = cars.iter().rev().cloned().collect();
        assert_eq!(sra.into_vec(), reversed);
    }

    #[test]
    fn test_place_long_self_avoiding_word() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new(4);

        let path = place_word(&mut board, "AAAAAAAAAA", &mut rng).expect("Failed to place word");

        assert_valid_path(&board, "AAAAAAAAAA", &path);
    }

    #[test]
    fn test_failed_placement_leaves_board_untouched() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut board = Board::new(3);
        board.set(4, 'X');
        let before = board.clone();

        assert_eq!(place_word(&mut board, "ABCDEFGHIJ", &mut rng), None, "longer than board");
        assert_eq!(board, before);

        for cell in 0..9 {
            board.set(cell, 'Z');
        }
        let full = board.clone();
        assert_eq!(place_word(&mut board, "ZZQ", &mut rng), None, "no Q anywhere");
        assert_eq!(board, full);
    }

    #[test]
    fn test_place_word_is_deterministic_for_a_seed() {
        let place = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::new(5);
            place_word(&mut board, "QUARTZ", &mut rng).map(|path| path.into_vec())
        };

        assert_eq!(place(99), place(99));
        assert!(place(99).is_some());
    }

    #[test]
    fn test_place_empty_word() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut board = Board::new(2);

        assert_eq!(place_word(&mut board, "", &mut rng), Some(Path::new()));
        assert_eq!(board.empty_cell_count(), 4);
    }
}

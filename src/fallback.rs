use rand::Rng;
use tracing::{error, warn};

use crate::board::{fill_empty_cells, serpentine_order, Board, Layout, Placement};
use crate::config::{ceil_sqrt, LayoutConfig};
use crate::validate::validate_layout;
use crate::Path;

/// Recorded when the fallback board is too small for every letter. This isn't an error: the
/// caller still gets a usable board, just without the words listed in `unplaced`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackOverflow {
    pub total_letters: usize,
    pub capacity: usize,
    /// Words with no complete placement, in placement order. The first of these may have had a
    /// prefix written before the board ran out.
    pub unplaced: Vec<String>,
}

/// The dimension used by the fallback: just big enough for every letter (and never below the
/// configured minimum), capped at the configured maximum.
pub fn fallback_dimension(total_letters: usize, config: &LayoutConfig) -> usize {
    let min_cells = config.min_dim() * config.min_dim();

    ceil_sqrt(total_letters.max(min_cells))
        .max(config.min_dim())
        .min(config.max_dim())
}

/// Build a layout with no search at all by writing the words back to back along the
/// serpentine traversal of the board. Consecutive serpentine cells are always adjacent, so every
/// word that fits is automatically a valid path. Runs in time linear in the number of letters.
pub fn generate_fallback_layout<S: AsRef<str>, R: Rng + ?Sized>(
    words: &[S],
    config: &LayoutConfig,
    rng: &mut R,
) -> (Layout, Option<FallbackOverflow>) {
    let total_letters: usize = words.iter().map(|word| word.as_ref().chars().count()).sum();
    let dimension = fallback_dimension(total_letters, config);
    let order = serpentine_order(dimension);

    if order.len() < total_letters {
        warn!(
            requested_letters = total_letters,
            capacity = order.len(),
            dimension,
            "Fallback board is smaller than the word list"
        );
    }

    let mut board = Board::new(dimension);
    let mut placements: Vec<Placement> = Vec::with_capacity(words.len());
    let mut cursor = 0;
    let mut first_unplaced = None;

    'word_placement: for (word_idx, word) in words.iter().enumerate() {
        let word = word.as_ref();
        let mut path = Path::with_capacity(word.len());

        for letter in word.chars() {
            let Some(&cell) = order.get(cursor) else {
                error!(dimension, word, "Fallback layout ran out of board space");
                first_unplaced = Some(word_idx);
                break 'word_placement;
            };

            board.set(cell, letter);
            path.push(cell);
            cursor += 1;
        }

        placements.push(Placement { word: word.to_string(), path });
    }

    let overflow = first_unplaced.map(|first_unplaced| FallbackOverflow {
        total_letters,
        capacity: order.len(),
        unplaced: words[first_unplaced..].iter().map(|word| word.as_ref().to_string()).collect(),
    });

    let layout = Layout { letters: fill_empty_cells(board, rng), dimension, placements };

    warn!(
        dimension,
        placements = layout.placements.len(),
        total_letters,
        "Using deterministic serpentine board layout"
    );

    let report = validate_layout(&layout, words);
    if !report.is_valid() {
        match &overflow {
            Some(overflow) => warn!(
                missing = ?report.missing,
                unplaced = ?overflow.unplaced,
                "Fallback layout is missing words that did not fit"
            ),
            None => error!(
                missing = ?report.missing,
                "Fallback layout failed validation without overflowing"
            ),
        }
    }

    (layout, overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::is_adjacent;
    use crate::validate::find_word_path;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fallback_dimension() {
        let config = LayoutConfig::default();

        assert_eq!(fallback_dimension(0, &config), 4);
        assert_eq!(fallback_dimension(16, &config), 4);
        assert_eq!(fallback_dimension(17, &config), 5);
        assert_eq!(fallback_dimension(57, &config), 8);
        assert_eq!(fallback_dimension(100, &config), 10);
        assert_eq!(fallback_dimension(250, &config), 10);

        let small = LayoutConfig::new(2, 3, 1).unwrap();
        assert_eq!(fallback_dimension(3, &small), 2);
        assert_eq!(fallback_dimension(5, &small), 3);
    }

    #[test]
    fn test_fallback_writes_words_along_serpentine() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = LayoutConfig::default();
        let words = ["NEBULA", "ORBIT", "QUARTZ", "MYSTIC"];

        let (layout, overflow) = generate_fallback_layout(&words, &config, &mut rng);

        assert_eq!(overflow, None);
        assert_eq!(layout.dimension, 5, "23 letters need a 5x5 board");
        assert_eq!(layout.letters.len(), 25);
        assert_eq!(layout.placements.len(), 4);

        let order = serpentine_order(5);
        let mut cursor = 0;
        for (placement, word) in layout.placements.iter().zip(words) {
            assert_eq!(placement.word, word);
            assert_eq!(placement.path.as_slice(), &order[cursor..cursor + word.len()]);
            for pair in placement.path.windows(2) {
                assert!(is_adjacent(pair[0], pair[1], 5));
            }
            cursor += word.len();
        }

        assert!(validate_layout(&layout, &words).is_valid());
        println!("{}", crate::board::render_layout(&layout));
    }

    #[test]
    fn test_fallback_overflow_places_only_what_fits() {
        let mut rng = StdRng::seed_from_u64(12);
        let config = LayoutConfig::new(2, 3, 0).unwrap();
        let words = ["ABCDE", "FGHIJK", "LMN"];

        let (layout, overflow) = generate_fallback_layout(&words, &config, &mut rng);

        assert_eq!(layout.dimension, 3);
        assert_eq!(layout.placements.len(), 1);
        assert_eq!(
            overflow,
            Some(FallbackOverflow {
                total_letters: 14,
                capacity: 9,
                unplaced: vec!["FGHIJK".to_string(), "LMN".to_string()],
            }),
        );

        // Serpentine order on 3x3 is 0 1 2 5 4 3 6 7 8, and the prefix FGHI of the second word
        // fills the board, so no filler letters appear anywhere.
        assert_eq!(layout.letters, "ABCFEDGHI".chars().collect::<Vec<_>>());
        assert!(find_word_path(&layout.letters, 3, "ABCDE").is_some());
        assert!(find_word_path(&layout.letters, 3, "FGHIJK").is_none());
    }
}

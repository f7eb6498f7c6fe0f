use instant::{Duration, Instant};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::board::{fill_empty_cells, Board, Layout, Placement};
use crate::config::{ceil_sqrt, LayoutConfig};
use crate::fallback::{generate_fallback_layout, FallbackOverflow};
use crate::normalize::{normalize_words, NormalizedWords};
use crate::placement::place_word;
use crate::validate::validate_layout;

/// How a layout was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Randomized backtracking succeeded on the given (zero-based) attempt at the layout's
    /// dimension.
    Structured { attempt: usize },

    /// The search budget ran out and the words were laid end to end instead.
    Fallback { overflow: Option<FallbackOverflow> },
}

/// A struct tracking statistics about the generation process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub dimensions_tried: usize,
    pub attempts: usize,
    pub placement_failures: usize,
    pub validation_mismatches: usize,
    pub duration: Duration,
}

/// A struct representing the results of a generation call. The layout is always usable; the
/// other fields describe how we got there.
#[derive(Debug, Clone)]
pub struct Generation {
    pub layout: Layout,
    pub strategy: LayoutStrategy,
    pub normalized: NormalizedWords,
    pub statistics: Statistics,
}

impl Generation {
    pub fn is_fallback(&self) -> bool {
        matches!(self.strategy, LayoutStrategy::Fallback { .. })
    }

    pub fn overflow(&self) -> Option<&FallbackOverflow> {
        match &self.strategy {
            LayoutStrategy::Fallback { overflow } => overflow.as_ref(),
            LayoutStrategy::Structured { .. } => None,
        }
    }
}

/// Why a single structured attempt was thrown away.
#[derive(Debug)]
enum AttemptFailure {
    PlacementFailure,
    ValidationMismatch { missing: Vec<String> },
}

/// Make one attempt at a `dimension` x `dimension` board: place every word in order, fill the
/// gaps, and check the result independently of the recorded placements.
fn try_layout<R: Rng + ?Sized>(
    words: &[String],
    dimension: usize,
    rng: &mut R,
) -> Result<Layout, AttemptFailure> {
    let mut board = Board::new(dimension);
    let mut placements: Vec<Placement> = Vec::with_capacity(words.len());

    for word in words {
        let path = place_word(&mut board, word, rng).ok_or(AttemptFailure::PlacementFailure)?;
        placements.push(Placement { word: word.clone(), path });
    }

    let layout = Layout { letters: fill_empty_cells(board, rng), dimension, placements };

    let report = validate_layout(&layout, words);
    if !report.is_valid() {
        return Err(AttemptFailure::ValidationMismatch { missing: report.missing });
    }

    Ok(layout)
}

/// Generate a board containing every valid word in `raw_words`.
///
/// Dimensions are tried from smallest to largest, starting at the configured minimum or the
/// smallest square that could hold the longest word, and each dimension gets
/// `config.max_attempts()` randomized attempts. The first attempt that places and validates
/// every word wins. If the whole budget is spent, we fall back to a serpentine layout, so this
/// always returns a layout.
pub fn generate_layout<S: AsRef<str>, R: Rng + ?Sized>(
    raw_words: &[S],
    config: &LayoutConfig,
    rng: &mut R,
) -> Generation {
    let start = Instant::now();
    let normalized = normalize_words(raw_words);
    let words = &normalized.words;

    let longest = normalized.longest().unwrap_or(config.min_dim());
    let min_dim = config.min_dim().max(ceil_sqrt(longest));

    let mut statistics = Statistics::default();

    info!(
        word_count = words.len(),
        min_dim,
        longest,
        "Attempting structured board layout"
    );

    for dimension in min_dim..=config.max_dim() {
        statistics.dimensions_tried += 1;

        for attempt in 0..config.max_attempts() {
            statistics.attempts += 1;

            match try_layout(words, dimension, rng) {
                Ok(layout) => {
                    statistics.duration = start.elapsed();
                    info!(
                        dimension,
                        attempt = attempt + 1,
                        placements = layout.placements.len(),
                        "Generated structured board layout"
                    );

                    return Generation {
                        layout,
                        strategy: LayoutStrategy::Structured { attempt },
                        normalized,
                        statistics,
                    };
                }
                Err(AttemptFailure::PlacementFailure) => {
                    statistics.placement_failures += 1;
                }
                Err(AttemptFailure::ValidationMismatch { missing }) => {
                    statistics.validation_mismatches += 1;
                    warn!(
                        dimension,
                        attempt = attempt + 1,
                        ?missing,
                        "Structured layout failed validation, retrying"
                    );
                }
            }
        }

        debug!(dimension, attempts = config.max_attempts(), "Exhausted attempts at dimension");
    }

    warn!(
        words = words.len(),
        attempts = statistics.attempts,
        "Unable to embed all words using structured layout, invoking fallback"
    );

    let (layout, overflow) = generate_fallback_layout(words, config, rng);
    statistics.duration = start.elapsed();

    Generation {
        layout,
        strategy: LayoutStrategy::Fallback { overflow },
        normalized,
        statistics,
    }
}

/// Like `generate_layout`, but with an RNG built from `seed`, or from OS entropy if there's no
/// seed. The same seed and words always give the same layout.
pub fn generate_layout_with_seed<S: AsRef<str>>(
    raw_words: &[S],
    config: &LayoutConfig,
    seed: Option<u64>,
) -> Generation {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    generate_layout(raw_words, config, &mut rng)
}

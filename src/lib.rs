use smallvec::SmallVec;

pub mod board;
pub mod config;
pub mod fallback;
pub mod generator;
pub mod normalize;
pub mod placement;
pub mod validate;

pub use board::{fill_empty_cells, hint_for, render_layout, Board, Layout, Placement};
pub use config::{ConfigError, LayoutConfig};
pub use fallback::{generate_fallback_layout, FallbackOverflow};
pub use generator::{
    generate_layout, generate_layout_with_seed, Generation, LayoutStrategy, Statistics,
};
pub use normalize::{normalize_words, NormalizedWords};
pub use placement::place_word;
pub use validate::{find_word_path, is_adjacent_path, validate_layout, ValidationReport};

/// Smallest board dimension the generator will try by default.
pub const MIN_DIM: usize = 4;

/// Largest board dimension the generator will try by default.
pub const MAX_DIM: usize = 10;

/// How many randomized placement attempts we make at each dimension before growing the board.
pub const MAX_ATTEMPTS: usize = 90;

/// Hard ceiling on any configured dimension, so that a misconfigured caller can't ask us to
/// allocate an enormous board.
pub const MAX_SUPPORTED_DIM: usize = 32;

/// The expected maximum length of a single word. Longer words still work, they just spill
/// their paths onto the heap.
pub const MAX_WORD_LENGTH: usize = 14;

/// The letters used for filler cells.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The puzzle served when the remote word provider is unavailable.
pub const DEFAULT_WORDS: [&str; 12] = [
    "nebula", "orbit", "quartz", "mystic", "riddle", "pixel", "sonic", "lunar", "glyph", "vivid",
    "nova", "spark",
];

/// An identifier for a board cell, based on its row-major index.
pub type CellId = usize;

/// An ordered list of cells spelling out a word.
pub type Path = SmallVec<[CellId; MAX_WORD_LENGTH]>;

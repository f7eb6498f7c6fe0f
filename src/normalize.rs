use std::collections::HashSet;

use tracing::warn;

/// The canonical word list, plus counts of what had to be thrown away to get there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedWords {
    /// Uppercase, alphabetic, deduplicated, longest first.
    pub words: Vec<String>,

    /// Entries dropped because they weren't purely alphabetic.
    pub rejected: usize,

    /// Entries dropped because an earlier entry had the same uppercase spelling.
    pub duplicates: usize,
}

impl NormalizedWords {
    pub fn discarded(&self) -> usize {
        self.rejected + self.duplicates
    }

    pub fn longest(&self) -> Option<usize> {
        self.words.first().map(|word| word.chars().count())
    }

    pub fn total_letters(&self) -> usize {
        self.words.iter().map(|word| word.chars().count()).sum()
    }
}

fn is_canonical(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase())
}

/// Uppercase, filter, and deduplicate a raw word list, then sort it so that the longest words
/// come first. Long words are the hardest to fit, so they get to claim space while the board is
/// still empty. The sort is stable, so words of equal length keep their input order.
pub fn normalize_words<S: AsRef<str>>(raw_words: &[S]) -> NormalizedWords {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw_words.len());
    let mut result = NormalizedWords::default();

    for raw_word in raw_words {
        let word = raw_word.as_ref().to_uppercase();

        if !is_canonical(&word) {
            result.rejected += 1;
            continue;
        }
        if !seen.insert(word.clone()) {
            result.duplicates += 1;
            continue;
        }

        result.words.push(word);
    }

    result.words.sort_by(|a, b| b.len().cmp(&a.len()));

    if result.discarded() > 0 {
        warn!(
            original = raw_words.len(),
            sanitized = result.words.len(),
            rejected = result.rejected,
            duplicates = result.duplicates,
            "Filtered entries from word list"
        );
    }

    result
}

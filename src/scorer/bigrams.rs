use crate::error::{KeyParetoError, KpResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bigram {
    pub first: char,
    pub second: char,
    pub count: u64,
}

/// Weighted bigram table for one language.
///
/// Entries are kept sorted by `(first, second)` so every consumer sums them
/// in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigramModel {
    name: String,
    bigrams: Vec<Bigram>,
    total_length: u64,
}

impl BigramModel {
    /// Pads every word with one space on each side and slides a 2-character
    /// window over it, weighting each window by the word's count.
    ///
    /// `total_length` sums `(len + 1) * count`; an empty corpus yields zero,
    /// which the scorer refuses. Counts too large for `u64` are rejected.
    pub fn from_words<'a, I>(name: &str, words: I) -> KpResult<Self>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let overflow = || {
            KeyParetoError::Validation(format!(
                "Corpus '{}' is too large: bigram counts overflow",
                name
            ))
        };

        let mut table: HashMap<(char, char), u64> = HashMap::new();
        let mut total_length = 0u64;

        for (word, count) in words {
            let padded: Vec<char> = std::iter::once(' ')
                .chain(word.chars())
                .chain(std::iter::once(' '))
                .collect();

            for pair in padded.windows(2) {
                let slot = table.entry((pair[0], pair[1])).or_default();
                *slot = slot.checked_add(count).ok_or_else(overflow)?;
            }

            // Window count equals `len + 1`.
            let windows = padded.len() as u64 - 1;
            total_length = windows
                .checked_mul(count)
                .and_then(|n| total_length.checked_add(n))
                .ok_or_else(overflow)?;
        }

        let mut bigrams: Vec<Bigram> = table
            .into_iter()
            .map(|((first, second), count)| Bigram {
                first,
                second,
                count,
            })
            .collect();
        bigrams.sort_by_key(|b| (b.first, b.second));

        Ok(Self {
            name: name.to_string(),
            bigrams,
            total_length,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bigrams(&self) -> &[Bigram] {
        &self.bigrams
    }

    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    pub fn is_empty(&self) -> bool {
        self.total_length == 0
    }

    pub fn count(&self, first: char, second: char) -> u64 {
        self.bigrams
            .binary_search_by_key(&(first, second), |b| (b.first, b.second))
            .map(|i| self.bigrams[i].count)
            .unwrap_or(0)
    }
}

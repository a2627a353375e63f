// src/dedup/profile.rs
// =============================================================================
// Phrase profiles: the content fingerprint of one page.
//
// A profile counts every window of `n` consecutive tokens. Windows overlap,
// so "a b c d e f" with n = 5 yields "a b c d e" and "b c d e f". Repeated
// boilerplate (navigation, footers) therefore shows up with high counts that
// survive across near-duplicate pages.
//
// Two profiles match on a phrase only when both contain it with the SAME
// count. Mere presence is not enough.
// =============================================================================

use std::collections::HashMap;

/// Phrase -> occurrence count for one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseProfile {
    phrases: HashMap<String, u32>,
}

impl PhraseProfile {
    /// Build a profile from a token stream using windows of `n` tokens
    ///
    /// Fewer than `n` tokens produce an empty profile.
    pub fn from_tokens(tokens: &[String], n: usize) -> Self {
        let mut phrases = HashMap::new();
        if n == 0 {
            return Self { phrases };
        }

        for window in tokens.windows(n) {
            *phrases.entry(window.join(" ")).or_insert(0) += 1;
        }

        Self { phrases }
    }

    /// Number of distinct phrases
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Occurrences of one phrase, 0 when absent
    pub fn count(&self, phrase: &str) -> u32 {
        self.phrases.get(phrase).copied().unwrap_or(0)
    }

    /// Phrases present in both profiles with equal counts
    pub fn match_count(&self, other: &PhraseProfile) -> usize {
        // iterate the smaller map, look up in the larger one
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        small
            .phrases
            .iter()
            .filter(|(phrase, count)| large.phrases.get(phrase.as_str()) == Some(*count))
            .count()
    }

    /// `match_count / max(len, other.len)`, or `None` when both are empty
    pub fn similarity(&self, other: &PhraseProfile) -> Option<f64> {
        let largest = self.len().max(other.len());
        if largest == 0 {
            return None;
        }
        Some(self.match_count(other) as f64 / largest as f64)
    }

    /// Move the stored counts towards `other`:
    /// `round((1 - weight) * self + weight * other)`, zero counts dropped
    pub fn blend(&mut self, other: &PhraseProfile, weight: f64) {
        let weight = weight.clamp(0.0, 1.0);
        let mut blended = HashMap::with_capacity(self.len().max(other.len()));

        let keys = self.phrases.keys().chain(other.phrases.keys());
        for phrase in keys {
            if blended.contains_key(phrase) {
                continue;
            }
            let old = self.count(phrase) as f64;
            let new = other.count(phrase) as f64;
            let value = ((1.0 - weight) * old + weight * new).round() as u32;
            if value > 0 {
                blended.insert(phrase.clone(), value);
            }
        }

        self.phrases = blended;
    }
}

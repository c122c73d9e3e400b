//! Tokenizer
//!
//! Turns raw text into a word-frequency mapping of stemmed, lowercased words.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ClassifierConfig;
use crate::language::{
    BuiltinStopwords, DirectoryStopwords, IdentityStemmer, SnowballStemmer, Stemmer, StopwordSet,
};

/// Tokens with this many characters or fewer are discarded
pub const MAX_SKIPPED_WORD_LENGTH: usize = 2;

/// Word-frequency mapping in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordHash {
    entries: Vec<(String, i64)>,
    index: HashMap<String, usize>,
}

impl WordHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `word`
    pub fn add(&mut self, word: impl Into<String>, count: i64) {
        let word = word.into();
        match self.index.get(&word) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push((word, count));
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<i64> {
        self.index.get(word).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Distinct words in first-occurrence order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl<S: Into<String>> FromIterator<S> for WordHash {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut hash = WordHash::new();
        for word in iter {
            hash.add(word, 1);
        }
        hash
    }
}

/// Text tokenizer backed by a stemmer and a stopword set.
#[derive(Clone)]
pub struct Tokenizer {
    stemmer: Arc<dyn Stemmer>,
    stopwords: Arc<dyn StopwordSet>,
}

impl Tokenizer {
    pub fn new(stemmer: Arc<dyn Stemmer>, stopwords: Arc<dyn StopwordSet>) -> Self {
        Self { stemmer, stopwords }
    }

    /// Build the collaborators a classifier config asks for
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let stemmer: Arc<dyn Stemmer> = if config.enable_stemmer {
            Arc::new(SnowballStemmer)
        } else {
            Arc::new(IdentityStemmer)
        };
        let stopwords: Arc<dyn StopwordSet> = match &config.stopwords_dir {
            Some(dir) => Arc::new(DirectoryStopwords::new(dir)),
            None => Arc::new(BuiltinStopwords),
        };
        Self::new(stemmer, stopwords)
    }

    /// Tokenize `text` into stemmed word counts.
    ///
    /// Characters that are neither word characters nor whitespace are
    /// removed before splitting, so `"don't"` becomes `"dont"`.
    pub fn tokenize(&self, text: &str, language: &str) -> WordHash {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect();
        let lowered = cleaned.to_lowercase();

        let mut hash = WordHash::new();
        for token in lowered.split_whitespace() {
            if token.chars().count() <= MAX_SKIPPED_WORD_LENGTH {
                continue;
            }
            if self.stopwords.is_stopword(token, language) {
                continue;
            }
            hash.add(self.stemmer.stem(token, language).into_owned(), 1);
        }
        hash
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Arc::new(SnowballStemmer), Arc::new(BuiltinStopwords))
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer").finish_non_exhaustive()
    }
}

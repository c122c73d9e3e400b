//! Category Store
//!
//! Per-category word frequencies plus the aggregate counters the scorer
//! reads. Categories keep their insertion order and are never removed.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{NbayesError, Result};
use crate::tokenizer::WordHash;

/// Word-frequency store for every known category
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    /// Category names in insertion order
    names: Vec<String>,
    words: HashMap<String, HashMap<String, i64>>,
    /// Training events per category; absent until first train/untrain
    category_counts: HashMap<String, i64>,
    /// Sum of word counts per category; absent until first counted word
    category_word_count: HashMap<String, i64>,
    total_words: i64,
}

/// Outcome of an untrain call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UntrainReport {
    /// Words whose counts were adjusted
    pub applied: usize,
    /// Words left untouched because `total_words` went negative
    pub skipped: usize,
}

impl UntrainReport {
    pub fn is_partial(&self) -> bool {
        self.skipped > 0
    }
}

/// Per-category summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub name: String,
    pub training_count: Option<i64>,
    pub word_count: Option<i64>,
    pub distinct_words: usize,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with empty categories
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        for name in categories {
            store.add_category(name);
        }
        store
    }

    /// Add an empty category. Returns `false` if it already existed.
    pub fn add_category(&mut self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        if self.words.contains_key(name) {
            return false;
        }
        self.names.push(name.to_string());
        self.words.insert(name.to_string(), HashMap::new());
        tracing::debug!(category = name, "added category");
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.words.contains_key(name)
    }

    /// Category names in insertion order
    pub fn categories(&self) -> Vec<&str> {
        self.names.iter().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn category_count(&self, name: &str) -> Option<i64> {
        self.category_counts.get(name).copied()
    }

    pub fn category_word_count(&self, name: &str) -> Option<i64> {
        self.category_word_count.get(name).copied()
    }

    pub fn total_words(&self) -> i64 {
        self.total_words
    }

    /// Stored count of `word` in `category`
    pub fn word_count(&self, category: &str, word: &str) -> Option<i64> {
        self.words.get(category)?.get(word).copied()
    }

    /// Word-frequency map of a category
    pub fn words(&self, category: &str) -> Option<&HashMap<String, i64>> {
        self.words.get(category)
    }

    /// Sum of training events across all categories
    pub fn training_count(&self) -> i64 {
        self.category_counts.values().sum()
    }

    pub fn stats(&self) -> Vec<CategoryStats> {
        self.names
            .iter()
            .map(|name| CategoryStats {
                name: name.clone(),
                training_count: self.category_count(name),
                word_count: self.category_word_count(name),
                distinct_words: self.words.get(name).map_or(0, HashMap::len),
            })
            .collect()
    }

    /// Record one training document for `category`
    pub fn train(&mut self, category: &str, words: &WordHash) -> Result<()> {
        let map = self
            .words
            .get_mut(category)
            .ok_or_else(|| NbayesError::CategoryNotFound {
                name: category.to_string(),
            })?;

        *self.category_counts.entry(category.to_string()).or_insert(0) += 1;

        for (word, count) in words.iter() {
            *map.entry(word.to_string()).or_insert(0) += count;
            *self
                .category_word_count
                .entry(category.to_string())
                .or_insert(0) += count;
            self.total_words += count;
        }

        tracing::debug!(
            category,
            words = words.len(),
            total_words = self.total_words,
            "trained"
        );
        Ok(())
    }

    /// Remove one training document from `category`, word by word.
    ///
    /// A word whose entry drops to zero or below is deleted, and only its
    /// previously stored count is taken off the aggregates. Once
    /// `total_words` is negative the remaining words are skipped.
    pub fn untrain(&mut self, category: &str, words: &WordHash) -> Result<UntrainReport> {
        if !self.contains(category) {
            return Err(NbayesError::CategoryNotFound {
                name: category.to_string(),
            });
        }

        *self.category_counts.entry(category.to_string()).or_insert(0) -= 1;
        let report = self.subtract_words(category, words);

        if report.is_partial() {
            tracing::warn!(
                category,
                applied = report.applied,
                skipped = report.skipped,
                total_words = self.total_words,
                "total word count went negative, untrain applied partially"
            );
        } else {
            tracing::debug!(category, words = words.len(), "untrained");
        }
        Ok(report)
    }

    /// Remove one training document, failing without any mutation when
    /// the document was not fully trained into `category`.
    pub fn untrain_strict(&mut self, category: &str, words: &WordHash) -> Result<UntrainReport> {
        let map = self
            .words
            .get(category)
            .ok_or_else(|| NbayesError::CategoryNotFound {
                name: category.to_string(),
            })?;

        if self.category_count(category).unwrap_or(0) < 1 {
            return Err(NbayesError::NothingToUntrain {
                category: category.to_string(),
            });
        }

        for (word, count) in words.iter() {
            let stored = map.get(word).copied().unwrap_or(0);
            if stored < count {
                return Err(NbayesError::UntrainUnderflow {
                    category: category.to_string(),
                    word: word.to_string(),
                    stored,
                    requested: count,
                });
            }
        }

        self.untrain(category, words)
    }

    fn subtract_words(&mut self, category: &str, words: &WordHash) -> UntrainReport {
        let mut report = UntrainReport::default();
        let Some(map) = self.words.get_mut(category) else {
            return report;
        };

        for (word, count) in words.iter() {
            if self.total_words < 0 {
                report.skipped = words.len() - report.applied;
                break;
            }

            let orig = map.get(word).copied().unwrap_or(0);
            let remaining = orig - count;
            let amount = if remaining <= 0 {
                map.remove(word);
                orig
            } else {
                map.insert(word.to_string(), remaining);
                count
            };

            let current = self
                .category_word_count
                .get(category)
                .copied()
                .unwrap_or(0);
            if current >= amount {
                self.category_word_count
                    .insert(category.to_string(), current - amount);
            }
            self.total_words -= amount;
            report.applied += 1;
        }

        report
    }
}

//! Category Scorer
//!
//! Log-probability score of a tokenized document against every category.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{NbayesError, Result};
use crate::tokenizer::WordHash;

use super::store::CategoryStore;

/// Count assumed for words a category has never seen, and for the prior
/// of a category that was never trained
pub const SMOOTHING_COUNT: f64 = 0.1;

/// Per-category scores in category insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classifications {
    scores: Vec<(String, f64)>,
}

impl Classifications {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Highest score. Ties go to the earliest category; NaN never beats a number.
    pub fn best(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (name, score) in self.iter() {
            let replace = match best {
                None => true,
                Some((_, top)) => score > top || (top.is_nan() && !score.is_nan()),
            };
            if replace {
                best = Some((name, score));
            }
        }
        best
    }

    /// Categories ordered by descending score, ties in insertion order
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| nan_last(b.1).total_cmp(&nan_last(a.1)));
        ranked
    }

    pub fn into_vec(self) -> Vec<(String, f64)> {
        self.scores
    }
}

fn nan_last(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

impl Serialize for Classifications {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for (name, score) in &self.scores {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

/// Scores documents against a [`CategoryStore`]
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    store: &'a CategoryStore,
}

impl<'a> Scorer<'a> {
    pub fn new(store: &'a CategoryStore) -> Self {
        Self { store }
    }

    /// Score `words` against every category.
    ///
    /// Each distinct word adds `ln(count / category_words)` once, whatever
    /// its multiplicity in the document; the category prior adds
    /// `ln(training_events / all_training_events)`.
    ///
    /// # Errors
    ///
    /// [`NbayesError::Untrained`] when the summed training count is not positive.
    pub fn score(&self, words: &WordHash) -> Result<Classifications> {
        let training_count = self.store.training_count() as f64;
        if training_count <= 0.0 {
            return Err(NbayesError::Untrained { training_count });
        }

        let mut scores = Vec::with_capacity(self.store.len());
        for category in self.store.categories() {
            let total = self
                .store
                .category_word_count(category)
                .map_or(1.0, |c| c as f64);

            let mut score = 0.0;
            for word in words.words() {
                let s = self
                    .store
                    .word_count(category, word)
                    .map_or(SMOOTHING_COUNT, |c| c as f64);
                score += (s / total).ln();
            }

            let s = self
                .store
                .category_count(category)
                .map_or(SMOOTHING_COUNT, |c| c as f64);
            score += (s / training_count).ln();

            tracing::trace!(category, score, "scored category");
            scores.push((category.to_string(), score));
        }

        Ok(Classifications { scores })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> WordHash {
        words.iter().copied().collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_score_requires_training() {
        let store = CategoryStore::with_categories(["A", "B"]);
        let err = Scorer::new(&store).score(&doc(&["word"])).unwrap_err();
        assert!(matches!(err, NbayesError::Untrained { training_count } if training_count == 0.0));
    }

    #[test]
    fn test_score_negative_training_count_is_rejected() {
        let mut store = CategoryStore::with_categories(["A"]);
        store.untrain("A", &WordHash::new()).unwrap();
        assert!(Scorer::new(&store).score(&doc(&["word"])).is_err());
    }

    #[test]
    fn test_score_formula() {
        let mut store = CategoryStore::with_categories(["A", "B"]);
        store.train("A", &doc(&["apple", "apple", "pear"])).unwrap();
        store.train("A", &doc(&["plum"])).unwrap();
        store.train("B", &doc(&["kiwi"])).unwrap();

        let scores = Scorer::new(&store).score(&doc(&["apple", "kiwi"])).unwrap();
        assert_eq!(scores.len(), 2);

        // A: 4 words, apple=2, kiwi unseen; prior 2/3
        let a = (2.0f64 / 4.0).ln() + (0.1f64 / 4.0).ln() + (2.0f64 / 3.0).ln();
        // B: 1 word, apple unseen, kiwi=1; prior 1/3
        let b = (0.1f64 / 1.0).ln() + (1.0f64 / 1.0).ln() + (1.0f64 / 3.0).ln();
        assert_close(scores.get("A").unwrap(), a);
        assert_close(scores.get("B").unwrap(), b);
    }

    #[test]
    fn test_score_ignores_query_multiplicity() {
        let mut store = CategoryStore::with_categories(["A"]);
        store.train("A", &doc(&["apple", "pear"])).unwrap();

        let scorer = Scorer::new(&store);
        let once = scorer.score(&doc(&["apple"])).unwrap();
        let thrice = scorer.score(&doc(&["apple", "apple", "apple"])).unwrap();
        assert_eq!(once.get("A"), thrice.get("A"));
    }

    #[test]
    fn test_untouched_category_uses_smoothing() {
        let mut store = CategoryStore::with_categories(["A", "Spam"]);
        store.train("A", &doc(&["apple"])).unwrap();

        let scores = Scorer::new(&store).score(&doc(&["apple", "pear"])).unwrap();
        let expected = 2.0 * (0.1f64 / 1.0).ln() + (0.1f64 / 1.0).ln();
        assert_close(scores.get("Spam").unwrap(), expected);
    }

    #[test]
    fn test_emptied_category_scores_infinite() {
        let mut store = CategoryStore::with_categories(["A", "B"]);
        store.train("A", &doc(&["apple"])).unwrap();
        store.train("A", &WordHash::new()).unwrap();
        store.train("B", &doc(&["kiwi"])).unwrap();
        store.untrain("A", &doc(&["apple"])).unwrap();

        // A keeps a zero word total, so unseen words divide by zero
        assert_eq!(store.category_word_count("A"), Some(0));
        let scores = Scorer::new(&store).score(&doc(&["kiwi"])).unwrap();
        assert_eq!(scores.get("A"), Some(f64::INFINITY));
        assert_eq!(scores.best(), Some(("A", f64::INFINITY)));
    }

    #[test]
    fn test_best_tie_goes_to_first() {
        let c = Classifications {
            scores: vec![
                ("A".into(), -3.0),
                ("B".into(), -1.0),
                ("C".into(), -1.0),
            ],
        };
        assert_eq!(c.best(), Some(("B", -1.0)));
        assert_eq!(c.ranked()[0].0, "B");
        assert_eq!(c.ranked()[1].0, "C");
    }

    #[test]
    fn test_best_skips_nan() {
        let c = Classifications {
            scores: vec![("A".into(), f64::NAN), ("B".into(), -10.0)],
        };
        assert_eq!(c.best(), Some(("B", -10.0)));
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let c = Classifications {
            scores: vec![("Z".into(), -1.5), ("A".into(), -2.0)],
        };
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"Z":-1.5,"A":-2.0}"#);
    }
}

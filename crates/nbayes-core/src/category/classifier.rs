//! Category Classifier
//!
//! Public training and classification surface: tokenizes text, feeds the
//! [`CategoryStore`], and picks the best-scoring category.

use crate::config::{ClassifierConfig, UntrainMode};
use crate::error::{NbayesError, Result};
use crate::tokenizer::Tokenizer;

use super::scorer::{Classifications, Scorer};
use super::store::{CategoryStore, UntrainReport};

/// Online multinomial Naive Bayes classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
    store: CategoryStore,
    tokenizer: Tokenizer,
}

impl Classifier {
    /// Create a classifier with the given initial categories.
    ///
    /// The tokenizer follows `config` (stemming flag, stopword directory).
    pub fn new<I, S>(categories: I, config: ClassifierConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokenizer = Tokenizer::from_config(&config);
        Self::with_tokenizer(categories, config, tokenizer)
    }

    /// Create a classifier with custom stemming/stopword collaborators
    pub fn with_tokenizer<I, S>(categories: I, config: ClassifierConfig, tokenizer: Tokenizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            store: CategoryStore::with_categories(categories),
            config,
            tokenizer,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Add a category if it does not exist yet
    pub fn add_category(&mut self, category: impl AsRef<str>) {
        self.store.add_category(category);
    }

    /// Category names in insertion order
    pub fn categories(&self) -> Vec<&str> {
        self.store.categories()
    }

    /// Train `text` into `category`.
    ///
    /// Unknown categories are created when auto-categorize is enabled and
    /// rejected with [`NbayesError::CategoryNotFound`] otherwise.
    pub fn train(&mut self, category: impl AsRef<str>, text: &str) -> Result<()> {
        let category = category.as_ref();
        if self.config.auto_categorize {
            self.store.add_category(category);
        }
        let words = self.tokenizer.tokenize(text, &self.config.language);
        self.store.train(category, &words)
    }

    /// Remove a previously trained `text` from `category`, using the
    /// configured [`UntrainMode`].
    pub fn untrain(&mut self, category: impl AsRef<str>, text: &str) -> Result<UntrainReport> {
        let words = self.tokenizer.tokenize(text, &self.config.language);
        match self.config.untrain_mode {
            UntrainMode::Lenient => self.store.untrain(category.as_ref(), &words),
            UntrainMode::Strict => self.store.untrain_strict(category.as_ref(), &words),
        }
    }

    /// Remove `text` from `category` only if every word was trained there
    pub fn untrain_strict(&mut self, category: impl AsRef<str>, text: &str) -> Result<UntrainReport> {
        let words = self.tokenizer.tokenize(text, &self.config.language);
        self.store.untrain_strict(category.as_ref(), &words)
    }

    /// Score `text` against every category
    pub fn classifications(&self, text: &str) -> Result<Classifications> {
        let words = self.tokenizer.tokenize(text, &self.config.language);
        Scorer::new(&self.store).score(&words)
    }

    /// Best category for `text` with its score
    pub fn classify_with_score(&self, text: &str) -> Result<(String, f64)> {
        let classifications = self.classifications(text)?;
        classifications
            .best()
            .map(|(name, score)| (name.to_string(), score))
            .ok_or_else(|| NbayesError::Untrained {
                training_count: self.store.training_count() as f64,
            })
    }

    /// Best category for `text`, or `None` when the threshold rejects it
    pub fn classify(&self, text: &str) -> Result<Option<String>> {
        let (category, score) = self.classify_with_score(text)?;
        if !self.accepts(score) {
            tracing::debug!(
                category = %category,
                score,
                threshold = self.config.threshold,
                "classification rejected by threshold"
            );
            return Ok(None);
        }
        Ok(Some(category))
    }

    /// Whether the threshold gate lets `score` through.
    ///
    /// Always true while the gate is disabled. When enabled, scores below
    /// the threshold and `+inf` are rejected.
    pub fn accepts(&self, score: f64) -> bool {
        let rejected = score < self.config.threshold || score == f64::INFINITY;
        !(self.config.enable_threshold && rejected)
    }

    pub fn enable_threshold(&mut self) {
        self.config.enable_threshold = true;
    }

    pub fn disable_threshold(&mut self) {
        self.config.enable_threshold = false;
    }

    pub fn threshold_enabled(&self) -> bool {
        self.config.enable_threshold
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.config.threshold = threshold;
    }
}

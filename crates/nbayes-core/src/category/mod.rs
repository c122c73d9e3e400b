//! # Category Module
//!
//! Per-category word statistics and the Naive Bayes scoring built on them.
//!
//! ## Module layout
//!
//! - `store`: word-frequency maps and aggregate counters, train/untrain
//! - `scorer`: log-probability scores with additive smoothing
//! - `classifier`: public surface, threshold gate
//!
//! ## Example
//!
//! ```rust
//! use nbayes_core::{Classifier, ClassifierConfig};
//!
//! let mut classifier = Classifier::new(["Interesting", "Uninteresting"], ClassifierConfig::default());
//! classifier.train("Interesting", "I love this good book").unwrap();
//! classifier.train("Uninteresting", "I hate bad words").unwrap();
//!
//! let category = classifier.classify("I hate bad words and you").unwrap();
//! assert_eq!(category.as_deref(), Some("Uninteresting"));
//!
//! let scores = classifier.classifications("a good book").unwrap();
//! assert_eq!(scores.len(), 2);
//! ```

mod classifier;
mod scorer;
mod store;

// Re-exports
pub use classifier::Classifier;
pub use scorer::{Classifications, Scorer, SMOOTHING_COUNT};
pub use store::{CategoryStats, CategoryStore, UntrainReport};

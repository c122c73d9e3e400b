pub mod category;
pub mod config;
pub mod corpus;
pub mod error;
pub mod language;
pub mod tokenizer;

pub use category::{
    CategoryStats, CategoryStore, Classifications, Classifier, Scorer, UntrainReport,
    SMOOTHING_COUNT,
};
pub use config::{ClassifierConfig, Config, UntrainMode};
pub use corpus::{CategorySource, Corpus, CorpusManifest, TrainingReport, CORPUS_FILE};
pub use error::{NbayesError, Result};
pub use language::{
    BuiltinStopwords, DirectoryStopwords, IdentityStemmer, SnowballStemmer, StaticStopwords,
    Stemmer, StopwordSet, DEFAULT_LANGUAGE,
};
pub use tokenizer::{Tokenizer, WordHash};

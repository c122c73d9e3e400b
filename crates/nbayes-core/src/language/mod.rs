//! # Language Module
//!
//! Language-dependent collaborators consumed by the tokenizer.
//!
//! - `stemmer`: reduces words to their root (`Stemmer` trait, Snowball implementation)
//! - `stopwords`: words excluded from counting (`StopwordSet` trait, builtin lists)
//!
//! Both are addressed by a language tag such as `"en"`.

mod stemmer;
mod stopwords;

pub use stemmer::{algorithm_for, IdentityStemmer, SnowballStemmer, Stemmer};
pub use stopwords::{
    builtin_languages, builtin_stopwords, parse_word_list, BuiltinStopwords,
    DirectoryStopwords, StaticStopwords, StopwordSet,
};

/// Language tag used when none is configured
pub const DEFAULT_LANGUAGE: &str = "en";

//! Stemming collaborators.

use std::borrow::Cow;

use rust_stemmers::Algorithm;

/// Reduces an inflected word to its root form for a language tag.
pub trait Stemmer: Send + Sync {
    fn stem<'x>(&self, word: &'x str, language: &str) -> Cow<'x, str>;
}

/// Snowball stemmer selected by language tag.
///
/// Tags without a Snowball algorithm leave words unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowballStemmer;

impl Stemmer for SnowballStemmer {
    fn stem<'x>(&self, word: &'x str, language: &str) -> Cow<'x, str> {
        match algorithm_for(language) {
            Some(algorithm) => match rust_stemmers::Stemmer::create(algorithm).stem(word) {
                Cow::Owned(stemmed) => Cow::Owned(stemmed),
                Cow::Borrowed(_) => Cow::Borrowed(word),
            },
            None => Cow::Borrowed(word),
        }
    }
}

/// Stemmer that never changes a word.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem<'x>(&self, word: &'x str, _language: &str) -> Cow<'x, str> {
        Cow::Borrowed(word)
    }
}

/// Snowball algorithm for an ISO-639-1 tag or English language name.
pub fn algorithm_for(language: &str) -> Option<Algorithm> {
    let algorithm = match language.to_ascii_lowercase().as_str() {
        "ar" | "arabic" => Algorithm::Arabic,
        "da" | "danish" => Algorithm::Danish,
        "de" | "german" => Algorithm::German,
        "el" | "greek" => Algorithm::Greek,
        "en" | "english" => Algorithm::English,
        "es" | "spanish" => Algorithm::Spanish,
        "fi" | "finnish" => Algorithm::Finnish,
        "fr" | "french" => Algorithm::French,
        "hu" | "hungarian" => Algorithm::Hungarian,
        "it" | "italian" => Algorithm::Italian,
        "nl" | "dutch" => Algorithm::Dutch,
        "no" | "nb" | "norwegian" => Algorithm::Norwegian,
        "pt" | "portuguese" => Algorithm::Portuguese,
        "ro" | "romanian" => Algorithm::Romanian,
        "ru" | "russian" => Algorithm::Russian,
        "sv" | "swedish" => Algorithm::Swedish,
        "ta" | "tamil" => Algorithm::Tamil,
        "tr" | "turkish" => Algorithm::Turkish,
        _ => return None,
    };
    Some(algorithm)
}

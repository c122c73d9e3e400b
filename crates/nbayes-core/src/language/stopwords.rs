//! Stopword collaborators.
//!
//! Builtin lists are embedded in the crate and parsed on first use. Parsed
//! sets live in a process-wide cache keyed by language tag, so every
//! tokenizer in the process shares one copy per language.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

/// Language-specific set of words excluded from counting.
pub trait StopwordSet: Send + Sync {
    fn is_stopword(&self, word: &str, language: &str) -> bool;
}

type WordSet = Arc<HashSet<String>>;

const BUILTIN_LISTS: &[(&str, &str)] = &[
    ("de", include_str!("../../data/stopwords/de")),
    ("en", include_str!("../../data/stopwords/en")),
    ("es", include_str!("../../data/stopwords/es")),
    ("fr", include_str!("../../data/stopwords/fr")),
    ("it", include_str!("../../data/stopwords/it")),
    ("nl", include_str!("../../data/stopwords/nl")),
    ("pt", include_str!("../../data/stopwords/pt")),
];

static BUILTIN_CACHE: Lazy<RwLock<HashMap<String, WordSet>>> = Lazy::new(Default::default);

/// Languages with an embedded stopword list
pub fn builtin_languages() -> Vec<&'static str> {
    BUILTIN_LISTS.iter().map(|(lang, _)| *lang).collect()
}

/// Cached builtin stopword set for a language.
///
/// Unknown languages resolve to an empty set, which is cached as well.
pub fn builtin_stopwords(language: &str) -> WordSet {
    let key = language.to_ascii_lowercase();

    {
        let cache = BUILTIN_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(set) = cache.get(&key) {
            return Arc::clone(set);
        }
    }

    let source = BUILTIN_LISTS
        .iter()
        .find(|(lang, _)| *lang == key)
        .map(|(_, list)| *list)
        .unwrap_or("");
    let parsed = Arc::new(parse_word_list(source));

    // A racing loader may have inserted first; keep whichever landed.
    let mut cache = BUILTIN_CACHE.write().unwrap_or_else(|e| e.into_inner());
    Arc::clone(cache.entry(key).or_insert(parsed))
}

/// Parse a list with one word per line. Blank lines and `#` comments are skipped.
pub fn parse_word_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

/// Stopwords embedded in the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStopwords;

impl StopwordSet for BuiltinStopwords {
    fn is_stopword(&self, word: &str, language: &str) -> bool {
        builtin_stopwords(language).contains(word)
    }
}

/// Stopwords read from `<dir>/<language>` files.
///
/// Languages without a file fall back to the builtin list. Each file is
/// read at most once per instance.
#[derive(Debug)]
pub struct DirectoryStopwords {
    dir: PathBuf,
    loaded: RwLock<HashMap<String, WordSet>>,
}

impl DirectoryStopwords {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            loaded: RwLock::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn words_for(&self, language: &str) -> WordSet {
        let key = language.to_ascii_lowercase();

        {
            let loaded = self.loaded.read().unwrap_or_else(|e| e.into_inner());
            if let Some(set) = loaded.get(&key) {
                return Arc::clone(set);
            }
        }

        let path = self.dir.join(&key);
        let set = match fs::read_to_string(&path) {
            Ok(content) => Arc::new(parse_word_list(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => builtin_stopwords(&key),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read stopword list, using builtin");
                builtin_stopwords(&key)
            }
        };

        let mut loaded = self.loaded.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(loaded.entry(key).or_insert(set))
    }
}

impl StopwordSet for DirectoryStopwords {
    fn is_stopword(&self, word: &str, language: &str) -> bool {
        self.words_for(language).contains(word)
    }
}

/// Fixed stopword list applied to every language.
#[derive(Debug, Clone, Default)]
pub struct StaticStopwords {
    words: HashSet<String>,
}

impl StaticStopwords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }
}

impl StopwordSet for StaticStopwords {
    fn is_stopword(&self, word: &str, _language: &str) -> bool {
        self.words.contains(word)
    }
}

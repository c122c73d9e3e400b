use nbayes_core::language::builtin_stopwords;
use nbayes_core::{Classifier, ClassifierConfig, SnowballStemmer, Stemmer, Tokenizer};
use proptest::prelude::*;

const VOCABULARY: &[&str] = &[
    "apple", "banana", "cherry", "dragon", "engine", "forest", "garden", "harbor", "island",
    "jungle", "the", "and", "with", "an", "ox", "a", "running", "runs", "Words!", "don't", "ies",
    "others", "owning",
];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..24).prop_map(|w| w.join(" "))
}

fn category() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Alpha", "Beta", "Gamma"])
}

fn classifier() -> Classifier {
    Classifier::new(["Alpha", "Beta", "Gamma"], ClassifierConfig::default())
}

proptest! {
    #[test]
    fn train_counts_one_event_and_every_token(cat in category(), doc in text()) {
        let mut classifier = classifier();
        let before = classifier.store().category_count(cat).unwrap_or(0);
        let tokens = Tokenizer::default().tokenize(&doc, "en").total();

        classifier.train(cat, &doc).unwrap();

        prop_assert_eq!(classifier.store().category_count(cat).unwrap_or(0), before + 1);
        prop_assert_eq!(classifier.store().total_words(), tokens);
    }

    #[test]
    fn aggregates_match_word_maps(docs in prop::collection::vec((category(), text()), 1..12)) {
        let mut classifier = classifier();
        for (cat, doc) in &docs {
            classifier.train(*cat, doc).unwrap();
        }

        let store = classifier.store();
        let mut total = 0;
        for cat in store.categories() {
            let sum: i64 = store.words(cat).unwrap().values().sum();
            prop_assert_eq!(store.category_word_count(cat).unwrap_or(0), sum);
            total += sum;
        }
        prop_assert_eq!(store.total_words(), total);
    }

    #[test]
    fn train_then_untrain_round_trips(base in text(), doc in text(), cat in category()) {
        let mut classifier = classifier();
        classifier.train(cat, &base).unwrap();
        let words_before = classifier.store().category_word_count(cat).unwrap_or(0);
        let total_before = classifier.store().total_words();

        classifier.train(cat, &doc).unwrap();
        classifier.untrain(cat, &doc).unwrap();

        prop_assert_eq!(classifier.store().category_word_count(cat).unwrap_or(0), words_before);
        prop_assert_eq!(classifier.store().total_words(), total_before);
    }

    #[test]
    fn unstemmed_stopwords_and_short_tokens_are_never_counted(docs in prop::collection::vec((category(), text()), 1..8)) {
        let mut classifier = Classifier::new(
            ["Alpha", "Beta", "Gamma"],
            ClassifierConfig::default().with_stemmer(false),
        );
        for (cat, doc) in &docs {
            classifier.train(*cat, doc).unwrap();
        }

        let stopwords = builtin_stopwords("en");
        for cat in classifier.store().categories() {
            for (word, count) in classifier.store().words(cat).unwrap() {
                prop_assert!(word.chars().count() > 2);
                prop_assert!(!stopwords.contains(word.as_str()));
                prop_assert!(*count > 0);
            }
        }
    }

    #[test]
    fn stemmed_keys_come_from_filtered_tokens(doc in text()) {
        let unstemmed = Tokenizer::from_config(&ClassifierConfig::default().with_stemmer(false))
            .tokenize(&doc, "en");
        let stemmed = Tokenizer::default().tokenize(&doc, "en");

        // Stemming only merges surviving tokens, it never adds or drops one
        prop_assert_eq!(stemmed.total(), unstemmed.total());
        prop_assert!(stemmed.len() <= unstemmed.len());
        for word in stemmed.words() {
            prop_assert!(unstemmed
                .words()
                .any(|token| SnowballStemmer.stem(token, "en") == word));
        }
    }

    #[test]
    fn classify_returns_known_category(docs in prop::collection::vec((category(), text()), 1..8), query in text()) {
        let mut classifier = classifier();
        for (cat, doc) in &docs {
            classifier.train(*cat, doc).unwrap();
        }

        let scores = classifier.classifications(&query).unwrap();
        prop_assert_eq!(scores.len(), 3);

        let result = classifier.classify(&query).unwrap();
        prop_assert!(result.is_some());
        let name = result.unwrap();
        prop_assert!(classifier.categories().contains(&name.as_str()));
    }
}

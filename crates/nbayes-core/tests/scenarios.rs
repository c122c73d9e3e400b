use nbayes_core::{Classifier, ClassifierConfig, NbayesError, UntrainMode};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn interesting() -> Classifier {
    let mut classifier =
        Classifier::new(["Interesting", "Uninteresting"], ClassifierConfig::default());
    classifier
        .train("Interesting", "I love this good book")
        .unwrap();
    classifier
        .train("Uninteresting", "I hate bad words")
        .unwrap();
    classifier
}

#[test]
fn classifies_uninteresting_text() {
    let classifier = interesting();
    assert_eq!(
        classifier.classify("I hate bad words and you").unwrap(),
        Some("Uninteresting".to_string())
    );
}

#[test]
fn threshold_rejects_unseen_vocabulary_against_large_categories() {
    let config = ClassifierConfig::default().with_threshold(-100.0);
    let mut classifier = Classifier::new(["Latin", "Filler"], config);
    classifier
        .train("Latin", &"lorem ipsum dolor ".repeat(5000))
        .unwrap();
    classifier
        .train("Filler", &"placeholder sample content ".repeat(5000))
        .unwrap();

    let query = "zebra quantum violin nebula glacier orchid falcon harbor meadow lantern compass thunder";
    let scores = classifier.classifications(query).unwrap();
    assert!(scores.iter().all(|(_, score)| score < -100.0));

    assert_eq!(classifier.classify(query).unwrap(), None);

    // The best guess is still available without the gate
    let (category, _) = classifier.classify_with_score(query).unwrap();
    assert!(classifier.categories().contains(&category.as_str()));
    classifier.disable_threshold();
    assert_eq!(classifier.classify(query).unwrap(), Some(category));
}

#[test]
fn untrained_category_is_scored_from_smoothing() {
    let mut classifier = interesting();
    classifier.add_category("Spam");

    let scores = classifier.classifications("good book").unwrap();
    assert_eq!(scores.len(), 3);

    // Two unseen words over a default total of 1, plus a 0.1 prior over 2 trainings
    let expected = 2.0 * (0.1f64).ln() + (0.1f64 / 2.0).ln();
    assert_close(scores.get("Spam").unwrap(), expected);
}

#[test]
fn add_category_is_idempotent_and_ordered() {
    let mut classifier = interesting();
    classifier.add_category("Spam");
    classifier.add_category("Interesting");
    assert_eq!(
        classifier.categories(),
        vec!["Interesting", "Uninteresting", "Spam"]
    );
}

#[test]
fn ties_go_to_first_category() {
    let mut classifier = Classifier::new(["First", "Second"], ClassifierConfig::default());
    classifier.train("First", "shared words here").unwrap();
    classifier.train("Second", "shared words here").unwrap();

    let (category, _) = classifier.classify_with_score("shared").unwrap();
    assert_eq!(category, "First");
}

#[test]
fn train_then_untrain_restores_counters() {
    let mut classifier = interesting();
    let store = classifier.store();
    let words_before = store.category_word_count("Interesting");
    let total_before = store.total_words();
    let count_before = store.category_count("Interesting");

    classifier
        .train("Interesting", "another great novel about dragons")
        .unwrap();
    classifier
        .untrain("Interesting", "another great novel about dragons")
        .unwrap();

    let store = classifier.store();
    assert_eq!(store.category_word_count("Interesting"), words_before);
    assert_eq!(store.total_words(), total_before);
    assert_eq!(store.category_count("Interesting"), count_before);
}

#[test]
fn lenient_and_strict_untrain_diverge_on_underflow() {
    let mut lenient = interesting();
    let mut strict = Classifier::new(
        ["Interesting", "Uninteresting"],
        ClassifierConfig::default().with_untrain_mode(UntrainMode::Strict),
    );
    strict.train("Interesting", "I love this good book").unwrap();
    strict.train("Uninteresting", "I hate bad words").unwrap();

    // "book" was trained once; removing it twice underflows
    let report = lenient.untrain("Interesting", "book book").unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(lenient.store().word_count("Interesting", "book"), None);
    assert_eq!(lenient.store().category_word_count("Interesting"), Some(2));

    let err = strict.untrain("Interesting", "book book").unwrap_err();
    assert!(matches!(err, NbayesError::UntrainUnderflow { stored: 1, requested: 2, .. }));
    assert_eq!(strict.store().word_count("Interesting", "book"), Some(1));
    assert_eq!(strict.store().category_count("Interesting"), Some(1));
}

#[test]
fn classify_before_training_is_a_precondition_error() {
    let classifier = Classifier::new(["A"], ClassifierConfig::default());
    assert!(matches!(
        classifier.classify_with_score("some text"),
        Err(NbayesError::Untrained { .. })
    ));
}

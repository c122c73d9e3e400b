use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use nbayes_core::{Classifier, ClassifierConfig, Config, Corpus, Result, CORPUS_FILE};

mod args;
use args::{Cli, Commands, ConfigAction, Shell, TextInput};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir.clone());
    let overrides = Overrides {
        corpus: cli.corpus.clone(),
        language: cli.language.clone(),
        threshold: cli.threshold,
    };

    let result = match cli.command {
        Some(Commands::Classify { input, score }) => {
            handle_classify(&base_dir, &overrides, &input, score)
        }
        Some(Commands::Scores { input, json }) => handle_scores(&base_dir, &overrides, &input, json),
        Some(Commands::Categories) => handle_categories(&base_dir, &overrides),
        Some(Commands::Stats { json }) => handle_stats(&base_dir, &overrides, json),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Command-line settings layered over the config files
struct Overrides {
    corpus: Option<PathBuf>,
    language: Option<String>,
    threshold: Option<f64>,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env("NBAYES_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "nbayes", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("NBAYES_BASE") {
        return PathBuf::from(base);
    }

    Config::default_base_dir().unwrap_or_else(|_| PathBuf::from(".nbayes"))
}

fn resolve_corpus_path(cli_corpus: Option<PathBuf>) -> PathBuf {
    if let Some(corpus) = cli_corpus {
        return corpus;
    }

    if let Ok(corpus) = std::env::var("NBAYES_CORPUS") {
        return PathBuf::from(corpus);
    }

    PathBuf::from(CORPUS_FILE)
}

/// Resolve classifier options.
/// Priority: CLI options > corpus manifest > config file > defaults
fn build_config(base_dir: &Path, corpus: &Corpus, overrides: &Overrides) -> ClassifierConfig {
    let global = Config::load(base_dir)
        .map(|c| c.classifier)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            ClassifierConfig::default()
        });

    let mut config = corpus.classifier_config(&global);
    if let Some(language) = &overrides.language {
        config.language = language.clone();
    }
    if let Some(threshold) = overrides.threshold {
        config = config.with_threshold(threshold);
    }
    config
}

fn load_classifier(base_dir: &Path, overrides: &Overrides) -> Result<Classifier> {
    let path = resolve_corpus_path(overrides.corpus.clone());
    let corpus = Corpus::load(&path)?;
    let config = build_config(base_dir, &corpus, overrides);
    let (classifier, report) = corpus.train(config)?;

    for (category, documents) in &report.documents {
        if *documents == 0 {
            tracing::warn!(category = %category, "category has no training documents");
        }
    }
    Ok(classifier)
}

fn read_input(input: &TextInput) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(file) = &input.file {
        return Ok(fs::read_to_string(file)?);
    }

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn handle_classify(
    base_dir: &Path,
    overrides: &Overrides,
    input: &TextInput,
    show_score: bool,
) -> Result<()> {
    let classifier = load_classifier(base_dir, overrides)?;
    let text = read_input(input)?;

    let (best, score) = classifier.classify_with_score(&text)?;
    let accepted = classifier.accepts(score);

    match (accepted, show_score) {
        (true, false) => println!("{}", best.cyan().bold()),
        (true, true) => println!("{}\t{:.4}", best.cyan().bold(), score),
        (false, false) => println!("{}", "(none)".dimmed()),
        (false, true) => println!(
            "{}\t{:.4} ({} rejected by threshold {})",
            "(none)".dimmed(),
            score,
            best,
            classifier.threshold()
        ),
    }

    Ok(())
}

fn handle_scores(base_dir: &Path, overrides: &Overrides, input: &TextInput, json: bool) -> Result<()> {
    let classifier = load_classifier(base_dir, overrides)?;
    let text = read_input(input)?;
    let scores = classifier.classifications(&text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    let best = scores.best().map(|(name, _)| name.to_string());
    let width = scores.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    println!();
    for (name, score) in scores.ranked() {
        let label = format!("{:width$}", name, width = width);
        if best.as_deref() == Some(name) {
            println!("  {}  {:>12.4}", label.cyan().bold(), score);
        } else {
            println!("  {}  {:>12.4}", label, score);
        }
    }
    println!();

    Ok(())
}

fn handle_categories(base_dir: &Path, overrides: &Overrides) -> Result<()> {
    let classifier = load_classifier(base_dir, overrides)?;
    for name in classifier.categories() {
        println!("{}", name);
    }
    Ok(())
}

fn handle_stats(base_dir: &Path, overrides: &Overrides, json: bool) -> Result<()> {
    let classifier = load_classifier(base_dir, overrides)?;
    let store = classifier.store();
    let stats = store.stats();

    if json {
        let value = serde_json::json!({
            "language": classifier.language(),
            "training_count": store.training_count(),
            "total_words": store.total_words(),
            "categories": stats,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!("Language: {}", classifier.language().cyan());
    println!("Documents: {}", store.training_count());
    println!("Total words: {}", store.total_words());
    println!();
    for entry in stats {
        println!("  {}", entry.name.cyan().bold());
        println!(
            "    Documents: {}  Words: {}  Distinct: {}",
            entry.training_count.unwrap_or(0),
            entry.word_count.unwrap_or(0),
            entry.distinct_words
        );
    }
    println!();

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => println!("{}", Config::load(base_dir)?.value(&key)?),
        ConfigAction::Set { key, value } => {
            let stored = Config::set_and_save(base_dir, &key, &value)?.value(&key)?;
            println!("{} {} = {}", "Set:".green(), key, stored);
        }
        ConfigAction::List => {
            let entries = Config::load(base_dir)?.list();
            let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
            for (key, value) in entries {
                println!("{} = {}", format!("{:width$}", key).cyan(), value);
            }
        }
        ConfigAction::Path => println!("{}", Config::path(base_dir).display()),
        ConfigAction::Init => match Config::init(base_dir)? {
            (path, true) => println!("{} {}", "Initialized:".green(), path.display()),
            (path, false) => println!("{} {}", "Already exists:".yellow(), path.display()),
        },
    }

    Ok(())
}

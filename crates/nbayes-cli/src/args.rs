use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "nbayes")]
#[command(about = "Naive Bayes text classification from a training corpus")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.nbayes)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Corpus manifest (default: $NBAYES_CORPUS or ./nbayes.toml)
    #[arg(short, long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Override the classifier language
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Enable the threshold gate at this score
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Where the text to classify comes from
#[derive(Args, Debug)]
pub struct TextInput {
    /// Text to classify (reads stdin when omitted)
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the best category for a text
    Classify {
        #[command(flatten)]
        input: TextInput,

        /// Print the score next to the category
        #[arg(short, long)]
        score: bool,
    },

    /// Print the score of every category
    Scores {
        #[command(flatten)]
        input: TextInput,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List categories defined by the corpus
    Categories,

    /// Show training statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., classifier.language)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., classifier.threshold)
        key: String,

        /// Value to set (e.g., "-50.0" or "true")
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify_with_negative_threshold() {
        let cli = Cli::try_parse_from([
            "nbayes",
            "--threshold",
            "-100.5",
            "classify",
            "some text",
            "--score",
        ])
        .unwrap();
        assert_eq!(cli.threshold, Some(-100.5));
        match cli.command {
            Some(Commands::Classify { input, score }) => {
                assert_eq!(input.text.as_deref(), Some("some text"));
                assert!(score);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = Cli::try_parse_from(["nbayes", "scores", "text", "--file", "doc.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_set_negative_value() {
        let cli =
            Cli::try_parse_from(["nbayes", "config", "set", "classifier.threshold", "-20"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Set { key, value },
            }) => {
                assert_eq!(key, "classifier.threshold");
                assert_eq!(value, "-20");
            }
            _ => panic!("expected config set"),
        }
    }
}

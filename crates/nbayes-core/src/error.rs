use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbayesError {
    #[error("Category not found: {name}")]
    CategoryNotFound { name: String },

    #[error("Classifier has no training data (training count: {training_count})")]
    Untrained { training_count: f64 },

    #[error(
        "Cannot untrain '{word}' from {category}: {requested} requested, {stored} stored"
    )]
    UntrainUnderflow {
        category: String,
        word: String,
        stored: i64,
        requested: i64,
    },

    #[error("Nothing left to untrain in {category}")]
    NothingToUntrain { category: String },

    #[error("Corpus defines no categories: {path}")]
    NoCategories { path: PathBuf },

    #[error("Training source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidConfigValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Home directory not found")]
    HomeNotFound,
}

pub type Result<T> = std::result::Result<T, NbayesError>;

impl NbayesError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CategoryNotFound { .. } => 2,
            Self::Untrained { .. } => 3,
            Self::UntrainUnderflow { .. } | Self::NothingToUntrain { .. } => 4,
            Self::NoCategories { .. } | Self::SourceNotFound { .. } => 5,
            Self::ConfigParse { .. }
            | Self::ConfigKeyNotFound { .. }
            | Self::InvalidConfigValue { .. } => 6,
            _ => 1,
        }
    }
}

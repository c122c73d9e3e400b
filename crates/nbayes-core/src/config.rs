use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NbayesError, Result};
use crate::language::DEFAULT_LANGUAGE;

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# nbayes configuration file
# Location: ~/.nbayes/config.toml

[classifier]
# Language tag selecting the stopword list and stemmer
# Default: "en"
language = "en"

# Create unknown categories on first training instead of failing
# Default: false
auto_categorize = false

# Reject classifications scoring below `threshold`
# Default: false
enable_threshold = false
threshold = 0.0

# Reduce words to their root before counting
# Default: true
enable_stemmer = true

# "lenient" applies untraining word by word, "strict" refuses to untrain
# words that were never trained
# Default: "lenient"
untrain_mode = "lenient"

# Directory holding per-language stopword files named by tag (e.g. "en")
# stopwords_dir = "/path/to/stopwords"
"#;

/// How `untrain` handles words whose stored count is below the requested count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UntrainMode {
    /// Apply word by word, clamping removed entries to their stored count
    #[default]
    Lenient,
    /// Validate the whole document first and fail without mutating
    Strict,
}

impl fmt::Display for UntrainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for UntrainMode {
    type Err = NbayesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(NbayesError::InvalidConfigValue {
                key: "classifier.untrain_mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Options for a single classifier instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub language: String,
    pub auto_categorize: bool,
    pub enable_threshold: bool,
    pub threshold: f64,
    pub enable_stemmer: bool,
    pub untrain_mode: UntrainMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords_dir: Option<PathBuf>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            auto_categorize: false,
            enable_threshold: false,
            threshold: 0.0,
            enable_stemmer: true,
            untrain_mode: UntrainMode::Lenient,
            stopwords_dir: None,
        }
    }
}

impl ClassifierConfig {
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_auto_categorize(mut self, enabled: bool) -> Self {
        self.auto_categorize = enabled;
        self
    }

    /// Enable the threshold gate at `threshold`
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.enable_threshold = true;
        self.threshold = threshold;
        self
    }

    pub fn with_stemmer(mut self, enabled: bool) -> Self {
        self.enable_stemmer = enabled;
        self
    }

    pub fn with_untrain_mode(mut self, mode: UntrainMode) -> Self {
        self.untrain_mode = mode;
        self
    }

    pub fn with_stopwords_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stopwords_dir = Some(dir.into());
        self
    }
}

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Default base directory (`~/.nbayes`)
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".nbayes"))
            .ok_or(NbayesError::HomeNotFound)
    }

    /// Config file location under `base_dir`
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Read the config under `base_dir`. A missing file yields the defaults.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::path(base_dir);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|e| NbayesError::ConfigParse {
            path,
            message: e.to_string(),
        })
    }

    pub fn save(&self, base_dir: &Path) -> Result<()> {
        fs::create_dir_all(base_dir)?;
        fs::write(Self::path(base_dir), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Update one key of the stored config and write it back
    pub fn set_and_save(base_dir: &Path, key: &str, value: &str) -> Result<Self> {
        let mut config = Self::load(base_dir)?;
        config.set(key, value)?;
        config.save(base_dir)?;
        tracing::debug!(key, value, "config updated");
        Ok(config)
    }

    /// Write the commented template unless a config file exists.
    /// The flag is `true` when the file was created.
    pub fn init(base_dir: &Path) -> Result<(PathBuf, bool)> {
        fs::create_dir_all(base_dir)?;
        let path = Self::path(base_dir);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())?;
                Ok((path, true))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok((path, false)),
            Err(e) => Err(e.into()),
        }
    }

    /// Value of a known key, or `ConfigKeyNotFound`
    pub fn value(&self, key: &str) -> Result<String> {
        self.get(key).ok_or_else(|| NbayesError::ConfigKeyNotFound {
            key: key.to_string(),
        })
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        self.list()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let c = &mut self.classifier;
        match key {
            "classifier.language" => c.language = value.trim().to_string(),
            "classifier.auto_categorize" => c.auto_categorize = parse_bool(key, value)?,
            "classifier.enable_threshold" => c.enable_threshold = parse_bool(key, value)?,
            "classifier.threshold" => c.threshold = parse_f64(key, value)?,
            "classifier.enable_stemmer" => c.enable_stemmer = parse_bool(key, value)?,
            "classifier.untrain_mode" => c.untrain_mode = value.parse()?,
            "classifier.stopwords_dir" => {
                let trimmed = value.trim();
                c.stopwords_dir = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            _ => {
                return Err(NbayesError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        let c = &self.classifier;
        vec![
            ("classifier.language".to_string(), c.language.clone()),
            (
                "classifier.auto_categorize".to_string(),
                c.auto_categorize.to_string(),
            ),
            (
                "classifier.enable_threshold".to_string(),
                c.enable_threshold.to_string(),
            ),
            ("classifier.threshold".to_string(), c.threshold.to_string()),
            (
                "classifier.enable_stemmer".to_string(),
                c.enable_stemmer.to_string(),
            ),
            (
                "classifier.untrain_mode".to_string(),
                c.untrain_mode.to_string(),
            ),
            (
                "classifier.stopwords_dir".to_string(),
                c.stopwords_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| NbayesError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(NbayesError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

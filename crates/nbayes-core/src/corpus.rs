//! Corpus manifests
//!
//! A corpus is a TOML file that names categories and the documents each one
//! is trained on:
//!
//! ```toml
//! [classifier]
//! language = "en"
//!
//! [[categories]]
//! name = "Spam"
//! sources = ["spam/*.txt", "more-spam/"]
//!
//! [[categories]]
//! name = "Ham"
//! sources = ["ham"]
//! ```
//!
//! Sources are glob patterns, files, or directories (walked recursively),
//! resolved against the manifest's directory. Every file is one document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::category::Classifier;
use crate::config::ClassifierConfig;
use crate::error::{NbayesError, Result};

/// Default manifest file name
pub const CORPUS_FILE: &str = "nbayes.toml";

const IGNORED_FILES: &[&str] = &[".DS_Store", ".gitignore", ".gitkeep"];

/// Parsed manifest contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusManifest {
    /// Classifier options; the caller's defaults apply when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierConfig>,
    #[serde(default)]
    pub categories: Vec<CategorySource>,
}

/// A category and the sources it is trained on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySource {
    pub name: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Documents trained per category, in manifest order
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingReport {
    pub documents: Vec<(String, usize)>,
}

impl TrainingReport {
    pub fn total(&self) -> usize {
        self.documents.iter().map(|(_, n)| n).sum()
    }
}

/// A manifest bound to the directory its sources resolve against
#[derive(Debug, Clone)]
pub struct Corpus {
    path: PathBuf,
    root: PathBuf,
    manifest: CorpusManifest,
}

impl Corpus {
    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let manifest: CorpusManifest =
            toml::from_str(&content).map_err(|e| NbayesError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self::from_manifest(path.to_path_buf(), root, manifest))
    }

    pub fn from_manifest(path: PathBuf, root: PathBuf, manifest: CorpusManifest) -> Self {
        Self {
            path,
            root,
            manifest,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> &CorpusManifest {
        &self.manifest
    }

    /// Manifest classifier options, or `fallback` when the manifest has none
    pub fn classifier_config(&self, fallback: &ClassifierConfig) -> ClassifierConfig {
        self.manifest
            .classifier
            .clone()
            .unwrap_or_else(|| fallback.clone())
    }

    /// Files a category is trained on, sorted and deduplicated
    pub fn resolve_sources(&self, category: &CategorySource) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for source in &category.sources {
            let path = self.root.join(source);
            let before = files.len();

            if path.is_dir() {
                for entry in WalkDir::new(&path).into_iter().filter_map(|e| e.ok()) {
                    if entry.file_type().is_file() && !is_ignored(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
            } else if path.is_file() {
                files.push(path.clone());
            } else {
                let pattern = path.to_string_lossy();
                for entry in glob::glob(&pattern)? {
                    let matched = entry.map_err(io::Error::from)?;
                    if matched.is_file() && !is_ignored(&matched) {
                        files.push(matched);
                    }
                }
            }

            if files.len() == before {
                return Err(NbayesError::SourceNotFound { path });
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Build a classifier trained on every source in the manifest
    pub fn train(&self, config: ClassifierConfig) -> Result<(Classifier, TrainingReport)> {
        if self.manifest.categories.is_empty() {
            return Err(NbayesError::NoCategories {
                path: self.path.clone(),
            });
        }

        let names = self.manifest.categories.iter().map(|c| c.name.as_str());
        let mut classifier = Classifier::new(names, config);
        let mut report = TrainingReport::default();

        for category in &self.manifest.categories {
            let files = self.resolve_sources(category)?;
            for file in &files {
                let bytes = fs::read(file)?;
                classifier.train(&category.name, &String::from_utf8_lossy(&bytes))?;
            }
            tracing::debug!(
                category = %category.name,
                documents = files.len(),
                "trained category from corpus"
            );
            report.documents.push((category.name.clone(), files.len()));
        }

        tracing::info!(
            corpus = %self.path.display(),
            documents = report.total(),
            total_words = classifier.store().total_words(),
            "corpus trained"
        );
        Ok((classifier, report))
    }
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| IGNORED_FILES.contains(&name))
}

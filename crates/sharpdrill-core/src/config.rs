//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{QuestionKind, MAX_QUESTIONS};

/// Preset color themes for terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Original,
    Programmer,
    #[default]
    Marine,
    Clear,
}

/// Top-level sharpdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Material catalog file.
    #[serde(default = "default_material_path")]
    pub material_path: PathBuf,
    /// Records file.
    #[serde(default = "default_records_path")]
    pub records_path: PathBuf,
    /// Questions per drill.
    #[serde(default = "default_questions")]
    pub questions: usize,
    /// Offer the review phase after a drill.
    #[serde(default = "default_true")]
    pub review: bool,
    /// Color theme.
    #[serde(default)]
    pub theme: ThemeName,
    /// Question types drilled unless changed interactively.
    #[serde(default = "default_enabled_types")]
    pub enabled_types: Vec<QuestionKind>,
}

fn default_material_path() -> PathBuf {
    PathBuf::from("material.json")
}
fn default_records_path() -> PathBuf {
    PathBuf::from("records.json")
}
fn default_questions() -> usize {
    15
}
fn default_true() -> bool {
    true
}
fn default_enabled_types() -> Vec<QuestionKind> {
    QuestionKind::ALL
        .into_iter()
        .filter(|k| k.enabled_by_default())
        .collect()
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            material_path: default_material_path(),
            records_path: default_records_path(),
            questions: default_questions(),
            review: true,
            theme: ThemeName::default(),
            enabled_types: default_enabled_types(),
        }
    }
}

impl DrillConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (1..=MAX_QUESTIONS).contains(&self.questions),
            "questions must be between 1 and {MAX_QUESTIONS}, got {}",
            self.questions
        );
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substituted values are taken literally and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut cursor = 0;
    while let Some(offset) = result[cursor..].find("${") {
        let start = cursor + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        cursor = start + value.len();
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the well-known locations:
/// 1. `sharpdrill.toml` in the current directory
/// 2. `~/.config/sharpdrill/config.toml`
///
/// Environment variable overrides: `SHARPDRILL_MATERIAL`, `SHARPDRILL_RECORDS`.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("sharpdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<DrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    if let Ok(material) = std::env::var("SHARPDRILL_MATERIAL") {
        config.material_path = PathBuf::from(material);
    }
    if let Ok(records) = std::env::var("SHARPDRILL_RECORDS") {
        config.records_path = PathBuf::from(records);
    }

    config.material_path = resolve_path(&config.material_path);
    config.records_path = resolve_path(&config.records_path);
    config.validate()?;

    if let Some(path) = &config_path {
        tracing::debug!("loaded config from {}", path.display());
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sharpdrill"))
}

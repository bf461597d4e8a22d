use crate::domain::model::{PairTag, RectEntry};
use crate::utils::error::{MirrorError, Result};
use crate::utils::validation::{
    validate_file_name, validate_relative_path, validate_unique, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Left-center pairs used for the mosaics.
pub fn default_pairs() -> Vec<PairTag> {
    vec![
        PairTag::new("1491_1492", "IMG_1491.jpg", "IMG_1492.jpg"),
        PairTag::new("1495_1496", "IMG_1495.jpg", "IMG_1496.jpg"),
        PairTag::new("1497_1498", "IMG_1497.jpg", "IMG_1498.jpg"),
        PairTag::new("1511_1512", "IMG_1511.jpg", "IMG_1512.jpg"),
        PairTag::new("1513_1514", "IMG_1513.jpg", "IMG_1514.jpg"),
    ]
}

/// Images fed to the A.3 rectification batch.
pub fn default_rect_batch() -> Vec<RectEntry> {
    vec![
        RectEntry::new("poster", "data/converted/rect_poster/poster_right.jpg"),
        RectEntry::new(
            "blackboard",
            "data/converted/rect_blackboard/blackboard_left.jpg",
        ),
        RectEntry::new("macbook", "data/converted/rect_macbook/macbook_right.jpg"),
        RectEntry::new("box", "data/converted/rect_box/box_bottom.jpg"),
    ]
}

fn default_submission_dir() -> String {
    "submission".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPaths {
    /// Relative to `--src`.
    #[serde(default = "default_submission_dir")]
    pub submission_dir: String,
    /// Relative to `--dst`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

impl Default for LayoutPaths {
    fn default() -> Self {
        Self {
            submission_dir: default_submission_dir(),
            assets_dir: default_assets_dir(),
        }
    }
}

/// Lookup tables and fixed roots. Every section is optional in TOML and
/// falls back to the built-in tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub layout: LayoutPaths,
    #[serde(default = "default_pairs")]
    pub pairs: Vec<PairTag>,
    #[serde(default = "default_rect_batch")]
    pub rectification: Vec<RectEntry>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layout: LayoutPaths::default(),
            pairs: default_pairs(),
            rectification: default_rect_batch(),
        }
    }
}

impl LayoutConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| MirrorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| MirrorError::config(format!("env pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn pair(&self, tag: &str) -> Option<&PairTag> {
        self.pairs.iter().find(|p| p.tag == tag)
    }
}

impl Validate for LayoutConfig {
    fn validate(&self) -> Result<()> {
        validate_relative_path("layout.submission_dir", &self.layout.submission_dir)?;
        validate_relative_path("layout.assets_dir", &self.layout.assets_dir)?;

        for pair in &self.pairs {
            validate_file_name("pairs.tag", &pair.tag)?;
            validate_file_name("pairs.left", &pair.left)?;
            validate_file_name("pairs.center", &pair.center)?;
        }
        validate_unique("pairs.tag", self.pairs.iter().map(|p| p.tag.as_str()))?;

        for entry in &self.rectification {
            validate_file_name("rectification.label", &entry.label)?;
            validate_relative_path("rectification.source", &entry.source)?;
        }
        validate_unique(
            "rectification.label",
            self.rectification.iter().map(|r| r.label.as_str()),
        )?;

        Ok(())
    }
}

//! Core domain types and models
//!
//! Defines the detection result, detection profiles, and the configuration
//! that feeds the signature registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language identifier returned when no rule matches.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Confidence reported for an `unknown` result.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Confidence reported when the filename extension decides the language.
pub const EXTENSION_CONFIDENCE: f64 = 0.9;

/// Ceiling for pattern-scored confidence in the standard profile.
pub const STANDARD_CONFIDENCE_CAP: f64 = 0.98;

/// Ceiling for pattern-scored confidence in the compact profile.
pub const COMPACT_CONFIDENCE_CAP: f64 = 0.8;

/// Outcome of a single detection call.
///
/// Serializes as `{"name": ..., "confidence": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Detected language identifier (or `"unknown"`)
    #[serde(rename = "name")]
    pub language: String,

    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

impl DetectionResult {
    pub fn new(language: impl Into<String>, confidence: f64) -> Self {
        Self { language: language.into(), confidence: confidence.clamp(0.0, 1.0) }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LANGUAGE, FALLBACK_CONFIDENCE)
    }

    pub fn is_unknown(&self) -> bool {
        self.language == UNKNOWN_LANGUAGE
    }
}

/// Built-in signature set and confidence policy to detect with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Full signature table, confidence relative to the leading score
    #[default]
    Standard,
    /// Small fallback table, confidence relative to the winner's own rules
    Compact,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Standard => "standard",
            Profile::Compact => "compact",
        }
    }
}

/// One user-supplied detection rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    pub pattern: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

/// A language declared (or extended) from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLanguage {
    pub name: String,

    #[serde(default)]
    pub rules: Vec<CustomRule>,

    /// Extensions routed to this language (normalized to `.ext`)
    #[serde(default, deserialize_with = "deserialize_extensions")]
    pub extensions: Vec<String>,
}

/// Normalize an extension to lowercase with a single leading dot.
///
/// Returns `None` for blank input.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        Some(lower)
    } else {
        Some(format!(".{}", lower))
    }
}

/// Custom deserializer for extensions: accepts a comma-separated string or
/// an array and normalizes every entry to `.ext`.
fn deserialize_extensions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ExtensionsVisitor;

    impl<'de> Visitor<'de> for ExtensionsVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or array of extensions")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.split(',').filter_map(normalize_extension).collect())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut result = Vec::new();
            while let Some(ext) = seq.next_element::<String>()? {
                if let Some(normalized) = normalize_extension(&ext) {
                    if !result.contains(&normalized) {
                        result.push(normalized);
                    }
                }
            }
            Ok(result)
        }
    }

    deserializer.deserialize_any(ExtensionsVisitor)
}

/// Custom deserializer for the `[extensions]` table: normalizes the keys.
fn deserialize_extension_table<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(ext, lang)| normalize_extension(&ext).map(|ext| (ext, lang.trim().to_string())))
        .collect())
}

/// Main configuration for langsniff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: Profile,

    /// Files larger than this are skipped by the CLI
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// Consult filename extensions before pattern scoring
    #[serde(default = "default_true")]
    pub extension_hint: bool,

    /// Extra extension mappings (extension -> language)
    #[serde(default, alias = "extension_map", deserialize_with = "deserialize_extension_table")]
    pub extensions: BTreeMap<String, String>,

    /// Custom languages, or extra rules for built-in ones
    #[serde(default, alias = "language")]
    pub languages: Vec<CustomLanguage>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Profile::Standard,
            max_file_bytes: default_max_file_bytes(),
            respect_gitignore: true,
            follow_symlinks: false,
            extension_hint: true,
            extensions: BTreeMap::new(),
            languages: Vec::new(),
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_weight() -> u32 {
    1
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024 // 10 MiB
}

//! Signature registry: languages, their detection rules, and the extension map
//!
//! A registry is assembled once through [`RegistryBuilder`], validated on
//! [`RegistryBuilder::build`], and is read-only afterwards. Declaration order
//! is significant: it is the order reported by
//! [`SignatureRegistry::list_supported_languages`] and the tie-break order
//! used during scoring.

use crate::domain::{normalize_extension, Config, Profile};
use regex::bytes::{Regex, RegexBuilder};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

pub mod builtin;

/// Invalid signature configuration. Fatal at startup.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("signature registry is empty")]
    Empty,

    #[error("language identifier must not be empty")]
    EmptyLanguageId,

    #[error("language `{0}` is declared more than once")]
    DuplicateLanguage(String),

    #[error("language `{0}` has no rules and no extensions")]
    Unreachable(String),

    #[error("invalid pattern `{pattern}` for language `{language}`")]
    InvalidPattern {
        language: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule `{pattern}` for language `{language}` has zero weight")]
    ZeroWeight { language: String, pattern: String },

    #[error("malformed extension `{0}`")]
    MalformedExtension(String),

    #[error("extension `{extension}` maps to undeclared language `{language}`")]
    UndeclaredLanguage { extension: String, language: String },
}

/// A single case-insensitive detection pattern with its weight.
///
/// Patterns run in ASCII mode: `\w`, `\b`, `\s` and case folding only know
/// ASCII, so `é` or `ñ` are never word characters.
#[derive(Debug, Clone)]
pub struct Rule {
    regex: Regex,
    weight: u32,
}

impl Rule {
    pub fn new(pattern: &str, weight: u32) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).unicode(false).build()?;
        Ok(Self { regex, weight })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text.as_bytes())
    }
}

/// One supported language and its ordered rules.
#[derive(Debug, Clone)]
pub struct LanguageSignature {
    id: String,
    rules: Vec<Rule>,
}

impl LanguageSignature {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Sum of all rule weights, i.e. the best score this language can reach.
    /// Saturates at `u32::MAX`, like the scoreboard tally.
    pub fn total_weight(&self) -> u32 {
        self.rules.iter().map(Rule::weight).fold(0u32, u32::saturating_add)
    }
}

/// Validated, immutable set of language signatures plus the extension map.
#[derive(Debug, Clone)]
pub struct SignatureRegistry {
    languages: Vec<LanguageSignature>,
    index: HashMap<String, usize>,
    extensions: BTreeMap<String, String>,
}

impl SignatureRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Shared built-in registry for a profile.
    pub fn builtin(profile: Profile) -> Result<Arc<SignatureRegistry>, RegistryError> {
        builtin::shared(profile)
    }

    /// Built-in registry for the configured profile, extended with the
    /// config's custom languages and extension mappings.
    pub fn from_config(config: &Config) -> Result<Arc<SignatureRegistry>, RegistryError> {
        if config.languages.is_empty() && config.extensions.is_empty() {
            return Self::builtin(config.profile);
        }
        let registry = builtin::builder(config.profile).apply_config(config).build()?;
        tracing::debug!(
            profile = config.profile.as_str(),
            languages = registry.len(),
            extensions = registry.extensions.len(),
            "built custom signature registry"
        );
        Ok(Arc::new(registry))
    }

    /// Supported language identifiers in declaration order.
    pub fn list_supported_languages(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn signatures(&self) -> &[LanguageSignature] {
        &self.languages
    }

    pub fn signature(&self, language: &str) -> Option<&LanguageSignature> {
        self.index.get(language).map(|&idx| &self.languages[idx])
    }

    pub fn get_rules(&self, language: &str) -> Option<&[Rule]> {
        self.signature(language).map(LanguageSignature::rules)
    }

    /// Language mapped to an extension. Accepts `py`, `.py`, `.PY`.
    pub fn language_for_extension(&self, extension: &str) -> Option<&str> {
        let normalized = normalize_extension(extension)?;
        self.extensions.get(&normalized).map(String::as_str)
    }

    pub fn extensions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extensions.iter().map(|(ext, lang)| (ext.as_str(), lang.as_str()))
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[derive(Debug, Clone)]
struct PendingLanguage {
    id: String,
    rules: Vec<(String, u32)>,
}

/// Collects languages, rules and extensions; validates on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    languages: Vec<PendingLanguage>,
    extensions: Vec<(String, String)>,
    duplicates: Vec<String>,
}

impl RegistryBuilder {
    /// Declare a language with unit-weight rules.
    pub fn language(mut self, id: &str, patterns: &[&str]) -> Self {
        if self.position(id).is_some() {
            self.duplicates.push(id.to_string());
            return self;
        }
        self.languages.push(PendingLanguage {
            id: id.to_string(),
            rules: patterns.iter().map(|p| (p.to_string(), 1)).collect(),
        });
        self
    }

    /// Append a rule to a language, declaring the language after the existing
    /// ones if it is new.
    pub fn rule(mut self, id: &str, pattern: &str, weight: u32) -> Self {
        let idx = match self.position(id) {
            Some(idx) => idx,
            None => {
                self.languages.push(PendingLanguage { id: id.to_string(), rules: Vec::new() });
                self.languages.len() - 1
            }
        };
        self.languages[idx].rules.push((pattern.to_string(), weight));
        self
    }

    /// Map an extension to a language. A later mapping for the same
    /// extension replaces an earlier one.
    pub fn extension(mut self, extension: &str, id: &str) -> Self {
        self.extensions.push((extension.to_string(), id.to_string()));
        self
    }

    /// Layer the config's custom languages and extension table on top.
    pub fn apply_config(mut self, config: &Config) -> Self {
        for custom in &config.languages {
            let id = custom.name.trim();
            if self.position(id).is_none() {
                self.languages.push(PendingLanguage { id: id.to_string(), rules: Vec::new() });
            }
            for rule in &custom.rules {
                self = self.rule(id, &rule.pattern, rule.weight);
            }
            for ext in &custom.extensions {
                self = self.extension(ext, id);
            }
        }
        for (ext, id) in &config.extensions {
            self = self.extension(ext, id);
        }
        self
    }

    pub fn build(self) -> Result<SignatureRegistry, RegistryError> {
        if self.languages.is_empty() {
            return Err(RegistryError::Empty);
        }
        if let Some(dup) = self.duplicates.into_iter().next() {
            return Err(RegistryError::DuplicateLanguage(dup));
        }

        let mut languages = Vec::with_capacity(self.languages.len());
        let mut index = HashMap::with_capacity(self.languages.len());
        for pending in self.languages {
            if pending.id.is_empty() {
                return Err(RegistryError::EmptyLanguageId);
            }
            let mut rules = Vec::with_capacity(pending.rules.len());
            for (pattern, weight) in pending.rules {
                if weight == 0 {
                    return Err(RegistryError::ZeroWeight { language: pending.id, pattern });
                }
                let rule = Rule::new(&pattern, weight).map_err(|source| {
                    RegistryError::InvalidPattern {
                        language: pending.id.clone(),
                        pattern: pattern.clone(),
                        source,
                    }
                })?;
                rules.push(rule);
            }
            index.insert(pending.id.clone(), languages.len());
            languages.push(LanguageSignature { id: pending.id, rules });
        }

        let mut extensions = BTreeMap::new();
        for (raw, language) in self.extensions {
            let ext = normalize_extension(&raw)
                .filter(|e| e.len() > 1 && !e[1..].contains(['.', '/', '\\']))
                .ok_or_else(|| RegistryError::MalformedExtension(raw.clone()))?;
            if !index.contains_key(&language) {
                return Err(RegistryError::UndeclaredLanguage { extension: ext, language });
            }
            if let Some(previous) = extensions.insert(ext.clone(), language.clone()) {
                if previous != language {
                    tracing::debug!(extension = %ext, from = %previous, to = %language, "extension remapped");
                }
            }
        }

        for signature in &languages {
            let reachable = !signature.rules.is_empty()
                || extensions.values().any(|lang| lang == &signature.id);
            if !reachable {
                return Err(RegistryError::Unreachable(signature.id.clone()));
            }
        }

        Ok(SignatureRegistry { languages, index, extensions })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.languages.iter().position(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomLanguage, CustomRule};

    #[test]
    fn builds_in_declaration_order() {
        let registry = SignatureRegistry::builder()
            .language("beta", &[r"\bbeta\b"])
            .language("alpha", &[r"\balpha\b"])
            .extension(".b", "beta")
            .build()
            .expect("valid registry");
        assert_eq!(registry.list_supported_languages(), vec!["beta", "alpha"]);
        assert_eq!(registry.language_for_extension("B"), Some("beta"));
        assert_eq!(registry.get_rules("alpha").map(<[Rule]>::len), Some(1));
        assert!(registry.get_rules("gamma").is_none());
    }

    #[test]
    fn rules_match_case_insensitively() {
        let rule = Rule::new(r"\bSELECT\s+\w+", 1).expect("pattern");
        assert!(rule.is_match("select id from users"));
        assert_eq!(rule.pattern(), r"\bSELECT\s+\w+");
    }

    #[test]
    fn word_classes_are_ascii_only() {
        let import = Rule::new(r"\bimport\s+\w+", 1).expect("pattern");
        assert!(import.is_match("éimport os"));
        let def = Rule::new(r"\bdef\s+\w+\s*\(", 1).expect("pattern");
        assert!(!def.is_match("def ñ():"));
        assert!(def.is_match("def n():"));
    }

    #[test]
    fn dot_and_literal_non_ascii_patterns_compile() {
        let rule = Rule::new("fn.main", 1).expect("dot pattern");
        assert!(rule.is_match("fn main"));
        let rule = Rule::new("señal", 1).expect("literal pattern");
        assert!(rule.is_match("una señal"));
    }

    #[test]
    fn total_weight_saturates() {
        let registry = SignatureRegistry::builder()
            .rule("big", "alpha", u32::MAX)
            .rule("big", "beta", 2)
            .build()
            .expect("valid registry");
        assert_eq!(registry.signature("big").map(LanguageSignature::total_weight), Some(u32::MAX));
    }

    #[test]
    fn empty_registry_is_rejected() {
        let err = SignatureRegistry::builder().build().unwrap_err();
        assert!(matches!(err, RegistryError::Empty));
    }

    #[test]
    fn language_without_rules_or_extensions_is_rejected() {
        let err = SignatureRegistry::builder()
            .language("ghost", &[])
            .language("real", &["x"])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::Unreachable(ref id) if id == "ghost"));
    }

    #[test]
    fn extension_only_language_is_accepted() {
        let registry = SignatureRegistry::builder()
            .language("shell", &[])
            .extension("sh", "shell")
            .build()
            .expect("valid registry");
        assert_eq!(registry.language_for_extension(".sh"), Some("shell"));
        assert_eq!(registry.signature("shell").map(LanguageSignature::total_weight), Some(0));
    }

    #[test]
    fn duplicate_language_is_rejected() {
        let err = SignatureRegistry::builder()
            .language("go", &["package"])
            .language("go", &["func"])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateLanguage(ref id) if id == "go"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = SignatureRegistry::builder().language("broken", &["(unclosed"]).build().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { ref language, .. } if language == "broken"));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn zero_weight_is_rejected() {
        let err = SignatureRegistry::builder().rule("weightless", "x", 0).build().unwrap_err();
        assert!(matches!(err, RegistryError::ZeroWeight { .. }));
    }

    #[test]
    fn extension_to_undeclared_language_is_rejected() {
        let err = SignatureRegistry::builder()
            .language("python", &["def"])
            .extension(".rb", "ruby")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UndeclaredLanguage { ref extension, ref language }
                if extension == ".rb" && language == "ruby"
        ));
    }

    #[test]
    fn malformed_extension_is_rejected() {
        let err = SignatureRegistry::builder()
            .language("python", &["def"])
            .extension("src/.py", "python")
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::MalformedExtension(_)));
    }

    #[test]
    fn later_extension_mapping_wins() {
        let registry = SignatureRegistry::builder()
            .language("c", &["#include"])
            .language("cpp", &["std::"])
            .extension(".h", "c")
            .extension(".H", "cpp")
            .build()
            .expect("valid registry");
        assert_eq!(registry.language_for_extension(".h"), Some("cpp"));
    }

    #[test]
    fn config_appends_rules_and_new_languages_after_builtins() {
        let config = Config {
            languages: vec![
                CustomLanguage {
                    name: "python".to_string(),
                    rules: vec![CustomRule { pattern: r"\bprint\(".to_string(), weight: 2 }],
                    extensions: vec![".pyw".to_string()],
                },
                CustomLanguage {
                    name: "zig".to_string(),
                    rules: vec![CustomRule { pattern: r"@import\(".to_string(), weight: 1 }],
                    extensions: vec![".zig".to_string()],
                },
            ],
            ..Config::default()
        };

        let registry = SignatureRegistry::from_config(&config).expect("valid registry");
        let languages = registry.list_supported_languages();
        assert_eq!(languages.first(), Some(&"javascript"));
        assert_eq!(languages.last(), Some(&"zig"));
        assert_eq!(registry.get_rules("python").map(<[Rule]>::len), Some(6));
        assert_eq!(registry.signature("python").map(LanguageSignature::total_weight), Some(7));
        assert_eq!(registry.language_for_extension(".pyw"), Some("python"));
        assert_eq!(registry.language_for_extension(".zig"), Some("zig"));
    }

    #[test]
    fn config_with_bad_pattern_fails_to_build() {
        let config = Config {
            languages: vec![CustomLanguage {
                name: "bad".to_string(),
                rules: vec![CustomRule { pattern: "[".to_string(), weight: 1 }],
                extensions: Vec::new(),
            }],
            ..Config::default()
        };
        assert!(SignatureRegistry::from_config(&config).is_err());
    }
}

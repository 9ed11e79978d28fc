//! Language detection over a signature registry
//!
//! Detection checks the filename extension first and falls back to scoring
//! every rule of every language against the text. The arg-max language wins,
//! ties going to the first-declared language, and its score is turned into a
//! confidence by the detector's [`ConfidencePolicy`].

use crate::domain::{
    Config, DetectionResult, Profile, COMPACT_CONFIDENCE_CAP, EXTENSION_CONFIDENCE,
    STANDARD_CONFIDENCE_CAP,
};
use crate::registry::{RegistryError, SignatureRegistry};
use crate::utils::{decode_text, extension_of};
use std::sync::Arc;

pub mod scoreboard;

pub use scoreboard::{LanguageScore, Scoreboard};

/// How a winning score becomes a confidence value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidencePolicy {
    /// `min(winner / highest score on the board, cap)`
    RelativeToLeader { cap: f64 },
    /// `min(winner / total weight of the winner's rules, cap)`
    RuleCoverage { cap: f64 },
}

impl ConfidencePolicy {
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Standard => ConfidencePolicy::RelativeToLeader { cap: STANDARD_CONFIDENCE_CAP },
            Profile::Compact => ConfidencePolicy::RuleCoverage { cap: COMPACT_CONFIDENCE_CAP },
        }
    }

    fn confidence(self, winner: u32, leader: u32, winner_total: u32) -> f64 {
        let (ratio, cap) = match self {
            ConfidencePolicy::RelativeToLeader { cap } => (ratio(winner, leader), cap),
            ConfidencePolicy::RuleCoverage { cap } => (ratio(winner, winner_total), cap),
        };
        ratio.min(cap).clamp(0.0, 1.0)
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    f64::from(numerator) / f64::from(denominator)
}

/// Stateless language detector. Cheap to clone and safe to share across
/// threads; all clones read the same registry.
#[derive(Debug, Clone)]
pub struct Detector {
    registry: Arc<SignatureRegistry>,
    policy: ConfidencePolicy,
    extension_hint: bool,
}

impl Detector {
    pub fn new(registry: Arc<SignatureRegistry>, policy: ConfidencePolicy) -> Self {
        Self { registry, policy, extension_hint: true }
    }

    /// Detector over a built-in table with the profile's confidence policy.
    pub fn for_profile(profile: Profile) -> Result<Self, RegistryError> {
        let registry = SignatureRegistry::builtin(profile)?;
        Ok(Self::new(registry, ConfidencePolicy::for_profile(profile)))
    }

    /// Detector for a loaded configuration. Fails if the resulting signature
    /// set is invalid.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        let registry = SignatureRegistry::from_config(config)?;
        Ok(Self::new(registry, ConfidencePolicy::for_profile(config.profile))
            .with_extension_hint(config.extension_hint))
    }

    /// Whether filenames are consulted before pattern scoring.
    pub fn with_extension_hint(mut self, enabled: bool) -> Self {
        self.extension_hint = enabled;
        self
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    pub fn policy(&self) -> ConfidencePolicy {
        self.policy
    }

    /// Detect the language of `code`, using `filename`'s extension when it
    /// is mapped.
    pub fn detect(&self, code: &str, filename: Option<&str>) -> DetectionResult {
        if let Some(language) = self.language_from_filename(filename) {
            tracing::debug!(language, "language resolved from extension");
            return DetectionResult::new(language, EXTENSION_CONFIDENCE);
        }

        let board = self.score(code);
        let Some(leader) = board.leader() else {
            tracing::debug!(bytes = code.len(), "no rule matched");
            return DetectionResult::unknown();
        };

        let winner_total =
            self.registry.signature(leader.language).map(|s| s.total_weight()).unwrap_or(0);
        let confidence = self.policy.confidence(leader.score, board.max_score(), winner_total);
        tracing::debug!(language = leader.language, score = leader.score, confidence, "language scored");
        DetectionResult::new(leader.language, confidence)
    }

    /// Detect the language of raw bytes. Undecodable input is decoded
    /// lossily, so this never fails.
    pub fn detect_bytes(&self, bytes: &[u8], filename: Option<&str>) -> DetectionResult {
        let text = decode_text(bytes);
        self.detect(&text, filename)
    }

    /// Full scoreboard for `code`, ignoring any filename.
    pub fn score<'a>(&'a self, code: &str) -> Scoreboard<'a> {
        Scoreboard::tally(&self.registry, code)
    }

    fn language_from_filename(&self, filename: Option<&str>) -> Option<&str> {
        if !self.extension_hint {
            return None;
        }
        let extension = extension_of(filename?)?;
        self.registry.language_for_extension(&extension)
    }
}

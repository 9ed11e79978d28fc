//! Per-call tally of rule matches

use crate::registry::SignatureRegistry;

/// Score of one language within a single detection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageScore<'r> {
    pub language: &'r str,
    pub score: u32,
    /// Patterns of the rules that matched, in rule order
    pub matched: Vec<&'r str>,
}

/// Raw scores for every language of a registry, in declaration order.
#[derive(Debug, Clone)]
pub struct Scoreboard<'r> {
    entries: Vec<LanguageScore<'r>>,
}

impl<'r> Scoreboard<'r> {
    /// Evaluate every rule of every language against `code`.
    pub fn tally(registry: &'r SignatureRegistry, code: &str) -> Self {
        let entries = registry
            .signatures()
            .iter()
            .map(|signature| {
                let mut score = 0u32;
                let mut matched = Vec::new();
                for rule in signature.rules() {
                    if rule.is_match(code) {
                        score = score.saturating_add(rule.weight());
                        matched.push(rule.pattern());
                    }
                }
                LanguageScore { language: signature.id(), score, matched }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[LanguageScore<'r>] {
        &self.entries
    }

    pub fn score_of(&self, language: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.language == language).map(|e| e.score)
    }

    /// Highest score on the board (0 when nothing matched).
    pub fn max_score(&self) -> u32 {
        self.entries.iter().map(|e| e.score).max().unwrap_or(0)
    }

    /// First-declared language holding the strictly highest non-zero score.
    pub fn leader(&self) -> Option<&LanguageScore<'r>> {
        let mut best: Option<&LanguageScore<'r>> = None;
        for entry in &self.entries {
            if entry.score > best.map_or(0, |b| b.score) {
                best = Some(entry);
            }
        }
        best
    }
}

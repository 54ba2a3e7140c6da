//! `--suggest` の結果（入力を書き換えずに分類の根拠を示す）

use super::classifier::{Decision, PersonaScore};
use super::eligibility::Eligibility;
use super::persona::Persona;
use super::workflow::DetectedWorkflow;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Suggestion<'a> {
    pub persona: &'a Persona,
    pub decision: Decision,
    pub scores: Vec<PersonaScore>,
    pub workflow: Option<DetectedWorkflow>,
    pub eligibility: Eligibility,
}

impl Suggestion<'_> {
    /// いずれかのペルソナで一致したキーワード（重複なし、出現順）
    pub fn detected_keywords(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for k in self.scores.iter().flat_map(|s| s.matched.iter().copied()) {
            if !out.contains(&k) {
                out.push(k);
            }
        }
        out
    }
}

impl fmt::Display for Suggestion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Recommended persona: {} ({})",
            self.persona.title, self.persona.command
        )?;
        writeln!(f, "Description: {}", self.persona.summary)?;
        match self.decision.score() {
            Some(score) => writeln!(f, "Decided by: {} (score {:.1})", self.decision.label(), score)?,
            None => writeln!(f, "Decided by: {}", self.decision.label())?,
        }
        let keywords = self.detected_keywords();
        if !keywords.is_empty() {
            writeln!(f, "Detected keywords: {}", keywords.join(", "))?;
        }
        if !self.scores.is_empty() {
            let table: Vec<String> = self
                .scores
                .iter()
                .map(|s| format!("{}={:.1}", s.id, s.score))
                .collect();
            writeln!(f, "Scores: {}", table.join(" "))?;
        }
        if let Some(ref w) = self.workflow {
            writeln!(
                f,
                "Workflow: {} ({} -> {}; triggers: {})",
                w.pattern.description,
                w.pattern.sequence[0],
                w.pattern.sequence[1],
                w.found.join(", ")
            )?;
        }
        match self.eligibility {
            Eligibility::Eligible => Ok(()),
            Eligibility::TooShort { len, min_len } => writeln!(
                f,
                "Note: input is too short to enhance ({} < {} characters) and would pass through unchanged",
                len, min_len
            ),
            Eligibility::ReservedPrefix(prefix) => writeln!(
                f,
                "Note: input starts with '{}' and would pass through unchanged",
                prefix
            ),
        }
    }
}

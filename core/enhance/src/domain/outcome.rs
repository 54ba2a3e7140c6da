//! 1 回の呼び出しの終端状態
//!
//! どの終端でも出力はちょうど 1 つ（`text()`）。

use super::eligibility::Eligibility;
use super::persona::PersonaId;

/// そのまま返した理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassthroughReason {
    Ineligible(Eligibility),
    /// すべての戦略が失敗した
    Exhausted,
    /// 想定外の失敗（panic を含む）
    Unexpected(String),
}

impl PassthroughReason {
    pub fn kind(&self) -> &'static str {
        match self {
            PassthroughReason::Ineligible(_) => "ineligible",
            PassthroughReason::Exhausted => "exhausted",
            PassthroughReason::Unexpected(_) => "unexpected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhanceOutcome {
    Passthrough {
        text: String,
        reason: PassthroughReason,
    },
    Enhanced {
        text: String,
        /// 成功した戦略の名前
        strategy: &'static str,
        /// ローカルで組み立てた場合のペルソナ（リモート応答をそのまま使う場合は None）
        persona: Option<PersonaId>,
    },
}

impl EnhanceOutcome {
    pub fn text(&self) -> &str {
        match self {
            EnhanceOutcome::Passthrough { text, .. } | EnhanceOutcome::Enhanced { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            EnhanceOutcome::Passthrough { text, .. } | EnhanceOutcome::Enhanced { text, .. } => text,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, EnhanceOutcome::Passthrough { .. })
    }
}

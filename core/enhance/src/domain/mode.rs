//! 強化モード

use super::eligibility::EligibilityRule;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnhanceMode {
    /// ローカルのキーワード採点のみ
    #[default]
    Heuristic,
    /// リモート分類器のみ（使えなければ入力をそのまま返す）
    Remote,
    /// リモート分類器 → 失敗したらローカル採点
    Hybrid,
}

impl EnhanceMode {
    pub const NAMES: [&'static str; 3] = ["heuristic", "remote", "hybrid"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnhanceMode::Heuristic => "heuristic",
            EnhanceMode::Remote => "remote",
            EnhanceMode::Hybrid => "hybrid",
        }
    }

    /// リモート呼び出しを含むモードは下限を上げる
    pub fn eligibility(&self) -> EligibilityRule {
        match self {
            EnhanceMode::Heuristic => EligibilityRule::HEURISTIC,
            EnhanceMode::Remote | EnhanceMode::Hybrid => EligibilityRule::REMOTE,
        }
    }

    /// リモート呼び出しの既定の待ち時間
    pub fn default_timeout(&self) -> Duration {
        match self {
            EnhanceMode::Heuristic | EnhanceMode::Remote => Duration::from_secs(15),
            EnhanceMode::Hybrid => Duration::from_secs(30),
        }
    }

    pub fn uses_remote(&self) -> bool {
        !matches!(self, EnhanceMode::Heuristic)
    }
}

impl fmt::Display for EnhanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnhanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(EnhanceMode::Heuristic),
            "remote" => Ok(EnhanceMode::Remote),
            "hybrid" => Ok(EnhanceMode::Hybrid),
            other => Err(format!(
                "Unknown mode: '{}'. Use one of: {}",
                other,
                EnhanceMode::NAMES.join(", ")
            )),
        }
    }
}

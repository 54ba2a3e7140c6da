//! リモート分類器が使えなかった理由
//!
//! 呼び出し側から見た扱いはどれも同じ（使えない → 次の戦略へ）。区別は診断ログのため。

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unavailable {
    #[error("{0} is not configured")]
    MissingCredential(String),
    #[error("no response within {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("classifier command not found: {0}")]
    NotInstalled(String),
    #[error("rate limit reached: {0}")]
    RateLimited(String),
    #[error("authentication failed: {0}")]
    Unauthorized(String),
    #[error("classifier exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },
    #[error("transport error: {0}")]
    Transport(String),
}

impl Unavailable {
    /// ログ用の短い種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Unavailable::MissingCredential(_) => "missing_credential",
            Unavailable::Timeout(_) => "timeout",
            Unavailable::NotInstalled(_) => "not_installed",
            Unavailable::RateLimited(_) => "rate_limited",
            Unavailable::Unauthorized(_) => "unauthorized",
            Unavailable::Failed { .. } => "failed",
            Unavailable::Transport(_) => "transport",
        }
    }

    /// 非ゼロ終了を stderr の内容で分類する（429 / quota → レート制限、401 / api key → 認証）
    pub fn from_failed_exit(status: Option<i32>, stderr: &str) -> Self {
        let lower = stderr.to_lowercase();
        let detail = stderr.trim().to_string();
        if lower.contains("429") || lower.contains("quota") {
            Unavailable::RateLimited(detail)
        } else if lower.contains("401") || lower.contains("api key") {
            Unavailable::Unauthorized(detail)
        } else {
            Unavailable::Failed {
                status,
                stderr: detail,
            }
        }
    }
}

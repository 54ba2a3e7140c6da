//! リモート応答の妥当性判定
//!
//! 空・短すぎる・拒否/エラー文で始まる応答は自信のない答えとして捨て、元の入力を使う。

/// この語で始まる応答は拒否・エラーとみなす
pub const REFUSAL_PREFIXES: [&str; 4] = ["error", "Error", "I cannot", "I can"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseVerdict {
    Valid,
    Empty,
    /// 元の入力より長くない
    NotLonger { response_len: usize, original_len: usize },
    Refusal(&'static str),
}

impl ResponseVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ResponseVerdict::Valid)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResponseVerdict::Valid => "valid",
            ResponseVerdict::Empty => "empty",
            ResponseVerdict::NotLonger { .. } => "not_longer",
            ResponseVerdict::Refusal(_) => "refusal",
        }
    }
}

/// 応答（trim 済み）を元の入力と比べて判定する
pub fn judge(response: &str, original: &str) -> ResponseVerdict {
    if response.is_empty() {
        return ResponseVerdict::Empty;
    }
    let response_len = response.chars().count();
    let original_len = original.chars().count();
    if response_len <= original_len {
        return ResponseVerdict::NotLonger {
            response_len,
            original_len,
        };
    }
    let refusal = REFUSAL_PREFIXES
        .iter()
        .copied()
        .find(|p| response.starts_with(*p));
    match refusal {
        Some(prefix) => ResponseVerdict::Refusal(prefix),
        None => ResponseVerdict::Valid,
    }
}

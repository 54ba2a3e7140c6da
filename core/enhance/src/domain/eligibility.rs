//! 強化対象かどうかの判定（純粋関数）
//!
//! 短すぎる入力と、既にコマンドとして構造化された入力はそのまま通す。

/// 予約済みの前置き（スラッシュコマンド・メンション・help）
pub const RESERVED_PREFIXES: [&str; 3] = ["/", "@", "help"];

/// 判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// trim 後の文字数が下限未満
    TooShort { len: usize, min_len: usize },
    /// 予約済みの前置きで始まる
    ReservedPrefix(&'static str),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "eligible",
            Eligibility::TooShort { .. } => "too_short",
            Eligibility::ReservedPrefix(_) => "reserved_prefix",
        }
    }
}

/// 判定ルール（モードごとに下限文字数が異なる）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRule {
    min_len: usize,
}

impl EligibilityRule {
    /// ヒューリスティックモード: 5 文字
    pub const HEURISTIC: Self = Self { min_len: 5 };
    /// リモートモード: 10 文字（外部呼び出しは高いので早めに諦める）
    pub const REMOTE: Self = Self { min_len: 10 };

    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn check(&self, input: &str) -> Eligibility {
        let len = input.trim().chars().count();
        if len < self.min_len {
            return Eligibility::TooShort {
                len,
                min_len: self.min_len,
            };
        }
        let reserved = RESERVED_PREFIXES
            .iter()
            .copied()
            .find(|p| input.starts_with(*p));
        if let Some(prefix) = reserved {
            return Eligibility::ReservedPrefix(prefix);
        }
        Eligibility::Eligible
    }
}

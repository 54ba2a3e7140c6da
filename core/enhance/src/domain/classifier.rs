//! ヒューリスティック分類器
//!
//! 2 段階で、どちらも小文字化した入力に対する部分文字列照合のみ（副作用なし）。
//! 1. 優先ルール: 複数語の手がかりを持つ分野を、スコア計算より先に固定順で拾う
//! 2. スコア: 各ペルソナのキーワード一致を長さで重み付けして合計し、最高点を選ぶ

use super::catalog::PersonaCatalog;
use super::persona::{Persona, PersonaId};

/// これより長いキーワードは重みを上げる
pub const LONG_KEYWORD_LEN: usize = 5;
pub const LONG_KEYWORD_WEIGHT: f64 = 1.5;
/// 勝者のスコアがこれ以下なら既定ペルソナに倒す
pub const MIN_WINNING_SCORE: f64 = 3.0;

/// 優先ルール（`ORDER` の順に評価し、最初に一致したものを採用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideRule {
    /// "prd" / "product requirement"
    ProductRequirements,
    /// "review" かつ ("code" / "pr")
    CodeReview,
    /// "security" / "vulnerability"
    Security,
    /// "deploy" / "ci/cd"
    Deployment,
    /// "document" / "readme"
    Documentation,
}

impl OverrideRule {
    pub const ORDER: [OverrideRule; 5] = [
        OverrideRule::ProductRequirements,
        OverrideRule::CodeReview,
        OverrideRule::Security,
        OverrideRule::Deployment,
        OverrideRule::Documentation,
    ];

    pub fn persona(&self) -> PersonaId {
        match self {
            OverrideRule::ProductRequirements => PersonaId::BusinessAnalyst,
            OverrideRule::CodeReview => PersonaId::CodeReviewer,
            OverrideRule::Security => PersonaId::Security,
            OverrideRule::Deployment => PersonaId::Devops,
            OverrideRule::Documentation => PersonaId::TechWriter,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OverrideRule::ProductRequirements => "product-requirements",
            OverrideRule::CodeReview => "code-review",
            OverrideRule::Security => "security",
            OverrideRule::Deployment => "deployment",
            OverrideRule::Documentation => "documentation",
        }
    }

    /// `lower` は小文字化済みの入力
    pub fn matches(&self, lower: &str) -> bool {
        let has = |needle: &str| lower.contains(needle);
        match self {
            OverrideRule::ProductRequirements => has("prd") || has("product requirement"),
            OverrideRule::CodeReview => has("review") && (has("code") || has("pr")),
            OverrideRule::Security => has("security") || has("vulnerability"),
            OverrideRule::Deployment => has("deploy") || has("ci/cd"),
            OverrideRule::Documentation => has("document") || has("readme"),
        }
    }
}

/// 第 1 段: 最初に一致した優先ルール
pub fn priority_override(lower: &str) -> Option<OverrideRule> {
    OverrideRule::ORDER.iter().copied().find(|r| r.matches(lower))
}

/// キーワード 1 つ分の点数
pub fn keyword_weight(keyword: &str) -> f64 {
    let len = keyword.chars().count();
    if len > LONG_KEYWORD_LEN {
        len as f64 * LONG_KEYWORD_WEIGHT
    } else {
        len as f64
    }
}

/// 1 ペルソナ分のスコア
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaScore {
    pub id: PersonaId,
    pub score: f64,
    /// 一致したキーワード（カタログ上の順）
    pub matched: Vec<&'static str>,
}

/// 第 2 段: 全ペルソナのスコア表（カタログの反復順）
pub fn score_personas(catalog: &PersonaCatalog, lower: &str) -> Vec<PersonaScore> {
    catalog
        .iter()
        .map(|persona| {
            let matched: Vec<&'static str> = persona
                .keywords
                .iter()
                .copied()
                .filter(|k| lower.contains(k))
                .collect();
            PersonaScore {
                id: persona.id,
                score: matched.iter().map(|k| keyword_weight(k)).sum(),
                matched,
            }
        })
        .collect()
}

/// 最高点のエントリ。同点なら先に現れたもの。
pub fn best_score(scores: &[PersonaScore]) -> Option<&PersonaScore> {
    let mut best: Option<&PersonaScore> = None;
    for s in scores {
        if best.map_or(true, |b| s.score > b.score) {
            best = Some(s);
        }
    }
    best
}

/// どうやって決まったか
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Override(OverrideRule),
    Scored { score: f64 },
    /// 最高点がしきい値以下だったので既定ペルソナ
    Fallback { best_score: f64 },
}

impl Decision {
    pub fn label(&self) -> String {
        match self {
            Decision::Override(rule) => format!("override:{}", rule.name()),
            Decision::Scored { .. } => "scoring".to_string(),
            Decision::Fallback { .. } => "fallback".to_string(),
        }
    }

    /// 勝ったスコア（優先ルールの場合は採点していないので None）
    pub fn score(&self) -> Option<f64> {
        match self {
            Decision::Override(_) => None,
            Decision::Scored { score } => Some(*score),
            Decision::Fallback { best_score } => Some(*best_score),
        }
    }
}

/// 分類結果
#[derive(Debug, Clone)]
pub struct ClassificationResult<'a> {
    pub persona: &'a Persona,
    pub decision: Decision,
    /// 診断用のスコア表（優先ルールで決まった場合は空）
    pub scores: Vec<PersonaScore>,
}

/// 入力を分類する
pub fn classify<'a>(catalog: &'a PersonaCatalog, input: &str) -> ClassificationResult<'a> {
    let lower = input.to_lowercase();

    if let Some(rule) = priority_override(&lower) {
        if let Some(persona) = catalog.get(rule.persona()) {
            return ClassificationResult {
                persona,
                decision: Decision::Override(rule),
                scores: Vec::new(),
            };
        }
    }

    let scores = score_personas(catalog, &lower);
    let (persona, decision) = match best_score(&scores) {
        Some(best) if best.score > MIN_WINNING_SCORE => (
            catalog.get(best.id).unwrap_or_else(|| catalog.default_persona()),
            Decision::Scored { score: best.score },
        ),
        best => (
            catalog.default_persona(),
            Decision::Fallback {
                best_score: best.map_or(0.0, |b| b.score),
            },
        ),
    };
    ClassificationResult {
        persona,
        decision,
        scores,
    }
}

//! 強化戦略
//!
//! 戦略は名前付きで順に試され、最初に成功したものの出力を使う。
//! どの戦略も panic せず、失敗は `StrategyMiss` で返す。

use std::sync::Arc;

use common::ports::outbound::{Log, LogLevel, LogRecord};

use crate::domain::remote_response::judge;
use crate::domain::{
    classify, EnhanceConfig, EnhanceMode, EnhancedPrompt, PersonaCatalog, PersonaId,
    ResponseVerdict, Unavailable,
};
use crate::ports::outbound::RemoteClassifier;

/// 戦略が成功したときの出力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhancement {
    pub text: String,
    /// ローカルで組み立てたときのペルソナ
    pub persona: Option<PersonaId>,
}

/// 戦略が出力を出せなかった理由
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyMiss {
    #[error(transparent)]
    Unavailable(#[from] Unavailable),
    #[error("low-confidence response ({})", .0.kind())]
    LowConfidence(ResponseVerdict),
}

impl StrategyMiss {
    pub fn kind(&self) -> &'static str {
        match self {
            StrategyMiss::Unavailable(u) => u.kind(),
            StrategyMiss::LowConfidence(_) => "low_confidence",
        }
    }
}

pub trait EnhanceStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn attempt(&self, prompt: &str) -> Result<Enhancement, StrategyMiss>;
}

/// キーワード採点でペルソナを選び、ローカルで組み立てる
pub struct HeuristicStrategy {
    catalog: Arc<PersonaCatalog>,
    log: Arc<dyn Log>,
}

impl HeuristicStrategy {
    pub fn new(catalog: Arc<PersonaCatalog>, log: Arc<dyn Log>) -> Self {
        Self { catalog, log }
    }
}

impl EnhanceStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn attempt(&self, prompt: &str) -> Result<Enhancement, StrategyMiss> {
        let result = classify(&self.catalog, prompt);
        let table: Vec<String> = result
            .scores
            .iter()
            .filter(|s| s.score > 0.0)
            .map(|s| format!("{}={:.1}", s.id, s.score))
            .collect();
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "persona selected")
                .layer("usecase")
                .kind("classify")
                .field("persona", result.persona.id.as_str())
                .field("decision", result.decision.label())
                .field("scores", table.join(" ")),
        );
        Ok(Enhancement {
            text: EnhancedPrompt::render(result.persona, prompt).into_string(),
            persona: Some(result.persona.id),
        })
    }
}

/// 分類せず指定のペルソナで組み立てる
pub struct ForcedPersonaStrategy {
    catalog: Arc<PersonaCatalog>,
    persona: PersonaId,
}

impl ForcedPersonaStrategy {
    pub fn new(catalog: Arc<PersonaCatalog>, persona: PersonaId) -> Self {
        Self { catalog, persona }
    }
}

impl EnhanceStrategy for ForcedPersonaStrategy {
    fn name(&self) -> &'static str {
        "forced"
    }

    fn attempt(&self, prompt: &str) -> Result<Enhancement, StrategyMiss> {
        let persona = self
            .catalog
            .get(self.persona)
            .unwrap_or_else(|| self.catalog.default_persona());
        Ok(Enhancement {
            text: EnhancedPrompt::render(persona, prompt).into_string(),
            persona: Some(persona.id),
        })
    }
}

/// リモート分類器の応答を検査してそのまま使う
pub struct RemoteStrategy {
    classifier: Arc<dyn RemoteClassifier>,
}

impl RemoteStrategy {
    pub fn new(classifier: Arc<dyn RemoteClassifier>) -> Self {
        Self { classifier }
    }
}

impl EnhanceStrategy for RemoteStrategy {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn attempt(&self, prompt: &str) -> Result<Enhancement, StrategyMiss> {
        let response = self.classifier.classify(prompt)?;
        let verdict = judge(&response, prompt);
        if !verdict.is_valid() {
            return Err(StrategyMiss::LowConfidence(verdict));
        }
        Ok(Enhancement {
            text: response,
            persona: None,
        })
    }
}

/// 設定から試す順の戦略列を組み立てる
///
/// ペルソナ指定があればそれだけ。リモートのみのモードは失敗時にそのまま返す。
pub fn strategies_for(
    config: &EnhanceConfig,
    catalog: &Arc<PersonaCatalog>,
    remote: &Arc<dyn RemoteClassifier>,
    log: &Arc<dyn Log>,
) -> Vec<Box<dyn EnhanceStrategy>> {
    let heuristic = || -> Box<dyn EnhanceStrategy> {
        Box::new(HeuristicStrategy::new(Arc::clone(catalog), Arc::clone(log)))
    };
    let remote_strategy = || -> Box<dyn EnhanceStrategy> {
        Box::new(RemoteStrategy::new(Arc::clone(remote)))
    };

    if let Some(persona) = config.forced_persona {
        return vec![Box::new(ForcedPersonaStrategy::new(Arc::clone(catalog), persona))];
    }
    match config.mode {
        EnhanceMode::Heuristic => vec![heuristic()],
        EnhanceMode::Remote => vec![remote_strategy()],
        EnhanceMode::Hybrid => vec![remote_strategy(), heuristic()],
    }
}

//! 強化ユースケース
//!
//! 判定 → 戦略を順に試す → 最初の成功を出力。すべて失敗したら入力をそのまま返す。

use std::sync::Arc;

use common::ports::outbound::{Log, LogLevel, LogRecord};

use super::strategy::{strategies_for, EnhanceStrategy};
use crate::domain::workflow;
use crate::domain::{
    classify, EnhanceConfig, EnhanceOutcome, PassthroughReason, PersonaCatalog, Suggestion,
};
use crate::ports::inbound::EnhancePrompt;
use crate::ports::outbound::RemoteClassifier;

pub struct EnhanceUseCase {
    config: EnhanceConfig,
    catalog: Arc<PersonaCatalog>,
    strategies: Vec<Box<dyn EnhanceStrategy>>,
    log: Arc<dyn Log>,
}

impl EnhanceUseCase {
    pub fn new(
        config: EnhanceConfig,
        catalog: Arc<PersonaCatalog>,
        remote: Arc<dyn RemoteClassifier>,
        log: Arc<dyn Log>,
    ) -> Self {
        let strategies = strategies_for(&config, &catalog, &remote, &log);
        Self {
            config,
            catalog,
            strategies,
            log,
        }
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    /// 試す順の戦略名
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// 書き換えずに分類の根拠を返す（--suggest）
    ///
    /// ペルソナ指定の有無に関係なく、キーワード分類の結果を示す。
    pub fn suggest(&self, prompt: &str) -> Suggestion<'_> {
        let result = classify(&self.catalog, prompt);
        Suggestion {
            persona: result.persona,
            decision: result.decision,
            scores: result.scores,
            workflow: workflow::detect(prompt),
            eligibility: self.config.mode.eligibility().check(prompt),
        }
    }

    fn record(&self, record: LogRecord) {
        let _ = self.log.log(&record.layer("usecase"));
    }
}

impl EnhancePrompt for EnhanceUseCase {
    fn enhance(&self, prompt: &str) -> EnhanceOutcome {
        let eligibility = self.config.mode.eligibility().check(prompt);
        if !eligibility.is_eligible() {
            self.record(
                LogRecord::new(LogLevel::Debug, "prompt passed through")
                    .kind("passthrough")
                    .field("reason", eligibility.kind()),
            );
            return EnhanceOutcome::Passthrough {
                text: prompt.to_string(),
                reason: PassthroughReason::Ineligible(eligibility),
            };
        }

        if let Some(found) = workflow::detect(prompt) {
            self.record(
                LogRecord::new(LogLevel::Debug, "workflow detected")
                    .kind("classify")
                    .field("workflow", found.pattern.description)
                    .field("triggers", found.found.join(",")),
            );
        }

        for strategy in &self.strategies {
            match strategy.attempt(prompt) {
                Ok(enhancement) => {
                    self.record(
                        LogRecord::new(LogLevel::Info, "prompt enhanced")
                            .kind("enhance")
                            .field("mode", self.config.mode.as_str())
                            .field("strategy", strategy.name())
                            .field("persona", enhancement.persona.map(|p| p.as_str())),
                    );
                    return EnhanceOutcome::Enhanced {
                        text: enhancement.text,
                        strategy: strategy.name(),
                        persona: enhancement.persona,
                    };
                }
                Err(miss) => self.record(
                    LogRecord::new(LogLevel::Warn, format!("{} strategy failed: {}", strategy.name(), miss))
                        .kind("strategy")
                        .field("strategy", strategy.name())
                        .field("reason", miss.kind()),
                ),
            }
        }

        self.record(
            LogRecord::new(LogLevel::Info, "no strategy succeeded, using original prompt")
                .kind("passthrough")
                .field("mode", self.config.mode.as_str()),
        );
        EnhanceOutcome::Passthrough {
            text: prompt.to_string(),
            reason: PassthroughReason::Exhausted,
        }
    }
}

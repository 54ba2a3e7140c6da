//! 複数ペルソナを順に使うワークフローの検出
//!
//! 3 つのトリガー語のうち 2 つ以上が入力に含まれたらそのパターンとみなす。
//! 出力の組み立てには使わず、診断と `--suggest` の表示にだけ使う。

use super::persona::PersonaId;

/// ワークフローパターン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowPattern {
    pub description: &'static str,
    pub triggers: [&'static str; 3],
    pub sequence: [PersonaId; 2],
}

/// 必要なトリガー語の数
pub const MIN_TRIGGERS: usize = 2;

pub static PATTERNS: [WorkflowPattern; 5] = [
    WorkflowPattern {
        description: "Analysis followed by implementation",
        triggers: ["analyze", "then", "implement"],
        sequence: [PersonaId::DataAnalyst, PersonaId::SeniorDev],
    },
    WorkflowPattern {
        description: "Code review followed by fixes",
        triggers: ["review", "and", "fix"],
        sequence: [PersonaId::CodeReviewer, PersonaId::SeniorDev],
    },
    WorkflowPattern {
        description: "Debugging followed by documentation",
        triggers: ["debug", "and", "document"],
        sequence: [PersonaId::ProblemSolver, PersonaId::TechWriter],
    },
    WorkflowPattern {
        description: "Architecture design followed by implementation",
        triggers: ["design", "and", "implement"],
        sequence: [PersonaId::Architect, PersonaId::SeniorDev],
    },
    WorkflowPattern {
        description: "Security analysis followed by code review",
        triggers: ["secure", "and", "review"],
        sequence: [PersonaId::Security, PersonaId::CodeReviewer],
    },
];

/// 検出結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedWorkflow {
    pub pattern: &'static WorkflowPattern,
    pub found: Vec<&'static str>,
}

/// 最初に成立したパターンを返す
pub fn detect(input: &str) -> Option<DetectedWorkflow> {
    let lower = input.to_lowercase();
    PATTERNS.iter().find_map(|pattern| {
        let found: Vec<&'static str> = pattern
            .triggers
            .iter()
            .copied()
            .filter(|t| lower.contains(t))
            .collect();
        (found.len() >= MIN_TRIGGERS).then(|| DetectedWorkflow { pattern, found })
    })
}

//! ペルソナ（職能ロールのテンプレート）

use std::fmt;
use std::str::FromStr;

/// ペルソナ識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersonaId {
    SeniorDev,
    CodeReviewer,
    BusinessAnalyst,
    Architect,
    Devops,
    DataAnalyst,
    TechWriter,
    Security,
    ProblemSolver,
    CreativeWriter,
}

impl PersonaId {
    pub const ALL: [PersonaId; 10] = [
        PersonaId::SeniorDev,
        PersonaId::CodeReviewer,
        PersonaId::BusinessAnalyst,
        PersonaId::Architect,
        PersonaId::Devops,
        PersonaId::DataAnalyst,
        PersonaId::TechWriter,
        PersonaId::Security,
        PersonaId::ProblemSolver,
        PersonaId::CreativeWriter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::SeniorDev => "senior-dev",
            PersonaId::CodeReviewer => "code-reviewer",
            PersonaId::BusinessAnalyst => "business-analyst",
            PersonaId::Architect => "architect",
            PersonaId::Devops => "devops",
            PersonaId::DataAnalyst => "data-analyst",
            PersonaId::TechWriter => "tech-writer",
            PersonaId::Security => "security",
            PersonaId::ProblemSolver => "problem-solver",
            PersonaId::CreativeWriter => "creative-writer",
        }
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonaId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown persona: '{}'", s))
    }
}

/// ペルソナ定義（プロセス起動時に一度だけ作られ、以後変更されない）
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub id: PersonaId,
    /// 表示名（例: "DevOps Engineer"）
    pub title: &'static str,
    /// 先頭に付けるコマンドトークン（例: "/devops"）
    pub command: &'static str,
    /// 一覧やリモート分類器への説明に使う一行要約
    pub summary: &'static str,
    /// ロール文脈の一文
    pub context: &'static str,
    /// 照合に使うキーワード（小文字、順序つき）
    pub keywords: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_id_names_parse() {
        for id in PersonaId::ALL {
            assert_eq!(id.as_str().parse::<PersonaId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_persona_id() {
        let err = "wizard".parse::<PersonaId>().unwrap_err();
        assert!(err.contains("wizard"));
    }
}

//! ペルソナカタログ
//!
//! 識別子 → ペルソナの読み取り専用マップ。反復順は登録順で固定（スコア同点時の勝者を決める）。

use super::persona::{Persona, PersonaId};

/// カタログ構築時の不変条件違反
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate persona id: {0}")]
    Duplicate(PersonaId),
    #[error("persona {0} has no keywords")]
    NoKeywords(PersonaId),
    #[error("persona {0} has an empty command token")]
    EmptyCommand(PersonaId),
    #[error("catalog must contain the problem-solver persona")]
    MissingDefault,
}

/// ペルソナカタログ（不変）
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    /// 既定ペルソナ（どのペルソナにも決まらない場合の行き先）
    pub const DEFAULT: PersonaId = PersonaId::ProblemSolver;

    /// 不変条件を検査してカタログを作る
    pub fn new(personas: Vec<Persona>) -> Result<Self, CatalogError> {
        for (i, p) in personas.iter().enumerate() {
            if personas[..i].iter().any(|q| q.id == p.id) {
                return Err(CatalogError::Duplicate(p.id));
            }
            if p.keywords.is_empty() {
                return Err(CatalogError::NoKeywords(p.id));
            }
            if p.command.trim().is_empty() {
                return Err(CatalogError::EmptyCommand(p.id));
            }
        }
        if !personas.iter().any(|p| p.id == Self::DEFAULT) {
            return Err(CatalogError::MissingDefault);
        }
        Ok(Self { personas })
    }

    /// 標準の 10 ペルソナ（new と同じ検査を通す）
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(STANDARD.to_vec())
    }

    pub fn get(&self, id: PersonaId) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// 既定ペルソナ（new で存在を保証済み）
    pub fn default_persona(&self) -> &Persona {
        self.personas
            .iter()
            .find(|p| p.id == Self::DEFAULT)
            .unwrap_or(&self.personas[0])
    }

    /// 登録順に反復する
    pub fn iter(&self) -> std::slice::Iter<'_, Persona> {
        self.personas.iter()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl<'a> IntoIterator for &'a PersonaCatalog {
    type Item = &'a Persona;
    type IntoIter = std::slice::Iter<'a, Persona>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const STANDARD: [Persona; 10] = [
    Persona {
        id: PersonaId::SeniorDev,
        title: "Senior Developer",
        command: "/dev",
        summary: "coding, programming, debugging, implementation tasks",
        context: "You are a Senior Developer with expertise in software development, debugging, and implementation. Focus on clean, efficient, well-documented code following best practices.",
        keywords: &[
            "code", "coding", "program", "function", "class", "algorithm", "debug", "implement",
            "build", "create", "fix", "bug", "develop", "script", "api", "method",
        ],
    },
    Persona {
        id: PersonaId::CodeReviewer,
        title: "Code Reviewer",
        command: "/review",
        summary: "code quality assessment, security analysis, best practices",
        context: "You are a Code Reviewer focused on code quality, security, performance, and best practices. Provide detailed feedback with specific improvement suggestions.",
        keywords: &[
            "review", "audit", "quality", "security", "performance", "analyze code", "check",
            "validate", "inspect",
        ],
    },
    Persona {
        id: PersonaId::BusinessAnalyst,
        title: "Business Analyst",
        command: "/business",
        summary: "requirements, PRDs, specifications, processes",
        context: "You are a Business Analyst expert in requirements gathering, process documentation, and creating comprehensive specifications that bridge business needs and technical implementation.",
        keywords: &[
            "prd", "requirement", "specification", "business", "process", "workflow",
            "user story", "stakeholder", "document",
        ],
    },
    Persona {
        id: PersonaId::Architect,
        title: "Software Architect",
        command: "/architect",
        summary: "system design, architecture patterns, scalability",
        context: "You are a Software Architect who designs scalable, maintainable systems. Consider high-level structure, design patterns, and long-term system evolution.",
        keywords: &[
            "architecture", "design", "system", "structure", "pattern", "scalability",
            "microservice", "database", "infrastructure",
        ],
    },
    Persona {
        id: PersonaId::Devops,
        title: "DevOps Engineer",
        command: "/devops",
        summary: "deployment, CI/CD, infrastructure, automation",
        context: "You are a DevOps Engineer expert in CI/CD, containerization, cloud platforms, and infrastructure automation.",
        keywords: &[
            "deploy", "deployment", "ci/cd", "docker", "kubernetes", "aws", "cloud", "pipeline",
            "automation",
        ],
    },
    Persona {
        id: PersonaId::DataAnalyst,
        title: "Data Analyst",
        command: "/analyze",
        summary: "data analysis, statistics, visualization, insights",
        context: "You are a Data Analyst expert in statistical analysis, data visualization, and extracting actionable insights from data.",
        keywords: &[
            "data", "analysis", "statistics", "visualization", "insights", "metrics", "csv",
            "query", "chart", "report",
        ],
    },
    Persona {
        id: PersonaId::TechWriter,
        title: "Technical Writer",
        command: "/doc",
        summary: "documentation, guides, tutorials, explanations",
        context: "You are a Technical Writer who creates clear, comprehensive documentation. Structure information logically for the target audience.",
        keywords: &[
            "documentation", "manual", "guide", "tutorial", "explain", "readme", "how-to",
            "instructions",
        ],
    },
    Persona {
        id: PersonaId::Security,
        title: "Security Expert",
        command: "/security",
        summary: "security assessment, vulnerabilities, threats",
        context: "You are a Security Expert focused on identifying vulnerabilities and implementing robust security measures.",
        keywords: &[
            "security", "vulnerability", "penetration", "encryption", "authentication", "threat",
            "secure", "exploit",
        ],
    },
    Persona {
        id: PersonaId::ProblemSolver,
        title: "Problem Solver",
        command: "/solve",
        summary: "troubleshooting, debugging, general problem solving",
        context: "You are a Problem Solver who approaches challenges systematically, breaking down complex problems and providing clear solutions.",
        keywords: &[
            "problem", "solve", "issue", "troubleshoot", "error", "help", "fix issue",
            "debug error",
        ],
    },
    Persona {
        id: PersonaId::CreativeWriter,
        title: "Creative Writer",
        command: "/write",
        summary: "content creation, storytelling, marketing copy",
        context: "You are a Creative Writer with expertise in storytelling, content creation, and engaging writing. Adapt tone and style to the target audience and purpose.",
        keywords: &[
            "write", "story", "content", "creative", "narrative", "blog", "article", "copy",
            "marketing",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = PersonaCatalog::standard().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.default_persona().id, PersonaId::ProblemSolver);
        for id in PersonaId::ALL {
            let p = catalog.get(id).expect("every id is registered");
            assert!(p.command.starts_with('/'));
            assert!(p.keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }

    #[test]
    fn test_iteration_follows_registration_order() {
        let catalog = PersonaCatalog::standard().unwrap();
        let ids: Vec<PersonaId> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids, PersonaId::ALL.to_vec());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut personas = STANDARD.to_vec();
        personas.push(STANDARD[0].clone());
        assert_eq!(
            PersonaCatalog::new(personas).unwrap_err(),
            CatalogError::Duplicate(PersonaId::SeniorDev)
        );
    }

    #[test]
    fn test_rejects_missing_default() {
        let personas: Vec<Persona> = STANDARD
            .iter()
            .filter(|p| p.id != PersonaId::ProblemSolver)
            .cloned()
            .collect();
        assert_eq!(
            PersonaCatalog::new(personas).unwrap_err(),
            CatalogError::MissingDefault
        );
    }

    #[test]
    fn test_rejects_empty_keywords_and_command() {
        let mut p = STANDARD[3].clone();
        p.keywords = &[];
        assert_eq!(
            PersonaCatalog::new(vec![STANDARD[8].clone(), p]).unwrap_err(),
            CatalogError::NoKeywords(PersonaId::Architect)
        );

        let mut p = STANDARD[3].clone();
        p.command = " ";
        assert_eq!(
            PersonaCatalog::new(vec![STANDARD[8].clone(), p]).unwrap_err(),
            CatalogError::EmptyCommand(PersonaId::Architect)
        );
    }
}

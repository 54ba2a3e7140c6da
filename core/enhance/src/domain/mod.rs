//! enhance 固有のドメイン型（型と不変条件、純粋関数）

pub mod catalog;
pub mod classifier;
pub mod command;
pub mod eligibility;
pub mod enhance_config;
pub mod enhanced_prompt;
pub mod hook_input;
pub mod mode;
pub mod outcome;
pub mod persona;
pub mod remote_request;
pub mod remote_response;
pub mod suggestion;
pub mod unavailable;
pub mod workflow;

pub use catalog::{CatalogError, PersonaCatalog};
pub use classifier::{classify, ClassificationResult, Decision, OverrideRule, PersonaScore};
pub use command::EnhanceCommand;
pub use eligibility::{Eligibility, EligibilityRule};
pub use enhance_config::{ApiKey, EnhanceConfig, RemoteSettings};
pub use enhanced_prompt::{EnhancedPrompt, TASK_MARKER};
pub use hook_input::{HookInput, InputSource};
pub use mode::EnhanceMode;
pub use outcome::{EnhanceOutcome, PassthroughReason};
pub use persona::{Persona, PersonaId};
pub use remote_response::ResponseVerdict;
pub use suggestion::Suggestion;
pub use unavailable::Unavailable;
pub use workflow::DetectedWorkflow;

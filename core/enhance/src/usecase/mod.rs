//! ユースケース層（強化の流れと戦略）

pub mod enhance;
pub mod strategy;

pub use enhance::EnhanceUseCase;

//! 強化済みプロンプト
//!
//! `<コマンド> <ロール文脈>\n\n**Task**: <元の入力>` の形に組み立てる。
//! 元の入力はバイト単位でそのまま末尾に入る（下流で取り出せるように）。

use super::persona::Persona;

/// タスク本体の前に置くマーカー
pub const TASK_MARKER: &str = "**Task**:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedPrompt(String);

impl EnhancedPrompt {
    pub fn render(persona: &Persona, original: &str) -> Self {
        Self(format!(
            "{} {}\n\n{} {}",
            persona.command, persona.context, TASK_MARKER, original
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::ops::Deref for EnhancedPrompt {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

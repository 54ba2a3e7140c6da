//! フック入力（生テキスト、または `prompt` フィールドを持つ JSON）

use serde::Deserialize;

/// 入力をどう解釈したか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// JSON の `prompt` フィールド
    Structured,
    /// JSON ではない生テキスト
    PlainText,
    /// JSON らしいが解釈できなかった（生テキスト全体を使う）
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct HookPayload {
    prompt: Option<String>,
}

/// 解釈済みのフック入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInput {
    prompt: String,
    source: InputSource,
}

impl HookInput {
    /// stdin の内容を解釈する。失敗しても必ず何らかのプロンプトを返す。
    ///
    /// - `{"prompt": "..."}` → prompt の値をそのまま（他のフィールドは無視）
    /// - それ以外 → 生テキストを trim したもの
    pub fn parse(raw: &str) -> Self {
        let fallback = |source| Self {
            prompt: raw.trim().to_string(),
            source,
        };
        if !raw.trim_start().starts_with('{') {
            return fallback(InputSource::PlainText);
        }
        match serde_json::from_str::<HookPayload>(raw) {
            Ok(HookPayload {
                prompt: Some(prompt),
            }) => Self {
                prompt,
                source: InputSource::Structured,
            },
            Ok(HookPayload { prompt: None }) => {
                fallback(InputSource::Malformed("missing 'prompt' field".to_string()))
            }
            Err(e) => fallback(InputSource::Malformed(e.to_string())),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn source(&self) -> &InputSource {
        &self.source
    }

    pub fn into_prompt(self) -> String {
        self.prompt
    }
}

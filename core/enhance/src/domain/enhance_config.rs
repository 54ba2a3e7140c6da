//! 起動時に一度だけ組み立てる不変の設定
//!
//! CLI 引数・環境変数・環境ファイルから wiring が解決し、以後は読み取りのみ。

use super::mode::EnhanceMode;
use super::persona::PersonaId;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// 雛形のまま置かれがちなダミー値
pub const PLACEHOLDER_API_KEYS: [&str; 2] = ["your-gemini-api-key-here", "your-api-key-here"];

/// API キー（Debug では値を出さない）
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// 空白のみ・雛形の値は None
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() || PLACEHOLDER_API_KEYS.contains(&value.as_str()) {
            return None;
        }
        Some(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// リモート分類器（gemini CLI）の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    /// 実行ファイル（PATH から探索）
    pub program: PathBuf,
    pub model: String,
    pub timeout: Duration,
    /// 資格情報を渡す環境変数名
    pub credential_var: String,
    pub api_key: Option<ApiKey>,
}

impl RemoteSettings {
    pub const DEFAULT_PROGRAM: &'static str = "gemini";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-pro";
    pub const CREDENTIAL_VAR: &'static str = "GEMINI_API_KEY";

    pub fn for_mode(mode: EnhanceMode) -> Self {
        Self {
            program: PathBuf::from(Self::DEFAULT_PROGRAM),
            model: Self::DEFAULT_MODEL.to_string(),
            timeout: mode.default_timeout(),
            credential_var: Self::CREDENTIAL_VAR.to_string(),
            api_key: None,
        }
    }
}

/// 強化エンジンの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceConfig {
    pub mode: EnhanceMode,
    /// 指定時は分類せずこのペルソナで組み立てる
    pub forced_persona: Option<PersonaId>,
    pub remote: RemoteSettings,
}

impl EnhanceConfig {
    pub fn new(mode: EnhanceMode) -> Self {
        Self {
            mode,
            forced_persona: None,
            remote: RemoteSettings::for_mode(mode),
        }
    }
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self::new(EnhanceMode::default())
    }
}

//! アダプター（ポートの標準実装と、外界からの設定解決）

pub(crate) mod gemini_cli;
pub(crate) mod settings;

pub(crate) use gemini_cli::GeminiCliClassifier;
pub(crate) use settings::{env_file_path, resolve_enhance_config, SettingsSource};

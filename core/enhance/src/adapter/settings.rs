//! 起動時の設定解決
//!
//! 優先順位: CLI 引数 > 環境変数 > 環境ファイル > 既定値。
//! 環境ファイルの内容はプロセスの環境変数に書き戻さない。

use std::path::PathBuf;
use std::time::Duration;

use common::env_file::EnvVars;
use common::error::Error;
use common::ports::outbound::EnvResolver;

use crate::cli::Config;
use crate::domain::{ApiKey, EnhanceConfig, EnhanceMode, RemoteSettings};

pub const MODE_VAR: &str = "PROMPT_ENHANCE_MODE";
pub const MODEL_VAR: &str = "PROMPT_ENHANCE_MODEL";
pub const TIMEOUT_VAR: &str = "PROMPT_ENHANCE_TIMEOUT";
pub const GEMINI_BIN_VAR: &str = "PROMPT_ENHANCE_GEMINI_BIN";
/// JSONL ログの出力先
pub const LOG_VAR: &str = "PROMPT_ENHANCE_LOG";
pub const ENV_FILE_NAME: &str = ".env";

/// 環境変数 → 環境ファイル の順に値を引く
pub struct SettingsSource<'a> {
    env: &'a dyn EnvResolver,
    file: &'a EnvVars,
}

impl<'a> SettingsSource<'a> {
    pub fn new(env: &'a dyn EnvResolver, file: &'a EnvVars) -> Self {
        Self { env, file }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.env.var(key).or_else(|| {
            self.file
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
    }
}

/// --env-file 未指定時はカレントディレクトリの .env
pub fn env_file_path(config: &Config, env: &dyn EnvResolver) -> Result<PathBuf, Error> {
    match config.env_file {
        Some(ref path) => Ok(path.clone()),
        None => Ok(env.current_dir()?.join(ENV_FILE_NAME)),
    }
}

fn parse_timeout(raw: &str, origin: &str) -> Result<Duration, Error> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::invalid_argument(format!(
            "{}: timeout must be a positive number of seconds, got '{}'",
            origin, raw
        ))),
    }
}

pub fn resolve_enhance_config(
    config: &Config,
    source: &SettingsSource<'_>,
) -> Result<EnhanceConfig, Error> {
    let mode = match (config.mode, source.get(MODE_VAR)) {
        (Some(mode), _) => mode,
        (None, Some(raw)) => raw
            .parse::<EnhanceMode>()
            .map_err(|e| Error::invalid_argument(format!("{}: {}", MODE_VAR, e)))?,
        (None, None) => EnhanceMode::default(),
    };

    let mut resolved = EnhanceConfig::new(mode);
    resolved.forced_persona = config.persona;

    let remote = &mut resolved.remote;
    if let Some(model) = config.model.clone().or_else(|| source.get(MODEL_VAR)) {
        remote.model = model;
    }
    if let Some(secs) = config.timeout_secs {
        remote.timeout = parse_timeout(&secs.to_string(), "--timeout")?;
    } else if let Some(raw) = source.get(TIMEOUT_VAR) {
        remote.timeout = parse_timeout(&raw, TIMEOUT_VAR)?;
    }
    if let Some(program) = config
        .gemini_bin
        .clone()
        .or_else(|| source.get(GEMINI_BIN_VAR).map(PathBuf::from))
    {
        remote.program = program;
    }
    remote.api_key = source
        .get(RemoteSettings::CREDENTIAL_VAR)
        .and_then(ApiKey::new);

    Ok(resolved)
}

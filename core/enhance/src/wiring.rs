//! 配線: 標準アダプタで App を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{
    CompositeLog, EnvResolver, FileJsonLog, FileSystem, Log, Process, StderrLog, StdEnvResolver,
    StdFileSystem, StdProcess,
};
use common::env_file::{self, EnvVars};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};

use crate::adapter::settings::LOG_VAR;
use crate::adapter::{env_file_path, resolve_enhance_config, GeminiCliClassifier, SettingsSource};
use crate::cli::Config;
use crate::domain::{EnhanceConfig, PersonaCatalog};
use crate::ports::outbound::RemoteClassifier;
use crate::usecase::EnhanceUseCase;

/// main の Runner が使う組み立て済みの依存
pub struct App {
    pub log: Arc<dyn Log>,
    pub catalog: Arc<PersonaCatalog>,
    pub enhance: EnhanceUseCase,
}

/// stderr（--verbose で debug まで）と、指定があれば JSONL ファイル
fn build_log(verbose: bool, log_path: Option<PathBuf>, fs: &Arc<dyn FileSystem>) -> Arc<dyn Log> {
    let min_level = if verbose { LogLevel::Debug } else { LogLevel::Info };
    let mut logs: Vec<Arc<dyn Log>> = vec![Arc::new(StderrLog::new(min_level))];
    if let Some(path) = log_path {
        logs.push(Arc::new(FileJsonLog::new(Arc::clone(fs), path)));
    }
    Arc::new(CompositeLog::new(logs))
}

/// 配線: CLI 設定・環境変数・環境ファイルから App を組み立てる
pub fn wire_enhance(config: &Config) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);

    let env_path = env_file_path(config, env.as_ref())?;
    let (file_vars, load_error) = match env_file::load(fs.as_ref(), &env_path) {
        Ok(vars) => (vars, None),
        Err(e) => (EnvVars::new(), Some(e)),
    };
    let source = SettingsSource::new(env.as_ref(), &file_vars);

    let log = build_log(config.verbose, source.get(LOG_VAR).map(PathBuf::from), &fs);
    if let Some(e) = load_error {
        let _ = log.log(
            &LogRecord::new(LogLevel::Warn, format!("env file ignored: {}", e))
                .layer("wiring")
                .field("path", env_path.display().to_string()),
        );
    }

    let enhance_config = resolve_enhance_config(config, &source)?;
    let _ = log.log(
        &LogRecord::new(LogLevel::Debug, "configuration resolved")
            .layer("wiring")
            .kind("config")
            .field("mode", enhance_config.mode.as_str())
            .field("model", enhance_config.remote.model.as_str())
            .field("timeout_secs", enhance_config.remote.timeout.as_secs())
            .field("credential", enhance_config.remote.api_key.is_some())
            .field("forced_persona", enhance_config.forced_persona.map(|p| p.as_str())),
    );
    wire_with(enhance_config, Arc::new(StdProcess), log)
}

/// 設定・外部プロセス・ログを注入して組み立てる
pub fn wire_with(
    config: EnhanceConfig,
    process: Arc<dyn Process>,
    log: Arc<dyn Log>,
) -> Result<App, Error> {
    let catalog = Arc::new(
        PersonaCatalog::standard()
            .map_err(|e| Error::system(format!("invalid persona catalog: {}", e)))?,
    );
    let remote: Arc<dyn RemoteClassifier> = Arc::new(GeminiCliClassifier::new(
        process,
        Arc::clone(&catalog),
        config.remote.clone(),
        Arc::clone(&log),
    ));
    let enhance = EnhanceUseCase::new(config, Arc::clone(&catalog), remote, Arc::clone(&log));
    Ok(App {
        log,
        catalog,
        enhance,
    })
}

//! gemini CLI を使うリモート分類器（adapter 層）
//!
//! `gemini -m <model> -p @<依頼文ファイル>` を上限時間つきで実行する。
//! 依頼文はシェルのエスケープを避けるため一時ファイルで渡し、ファイルは drop 時に必ず消える。

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord, Process};
use tempfile::NamedTempFile;

use crate::domain::remote_request::build_request;
use crate::domain::{PersonaCatalog, RemoteSettings, Unavailable};
use crate::ports::outbound::RemoteClassifier;

pub struct GeminiCliClassifier {
    process: Arc<dyn Process>,
    catalog: Arc<PersonaCatalog>,
    settings: RemoteSettings,
    log: Arc<dyn Log>,
}

impl GeminiCliClassifier {
    pub fn new(
        process: Arc<dyn Process>,
        catalog: Arc<PersonaCatalog>,
        settings: RemoteSettings,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            process,
            catalog,
            settings,
            log,
        }
    }
}

fn write_scratch(request: &str) -> Result<NamedTempFile, Unavailable> {
    let mut file = tempfile::Builder::new()
        .prefix("prompt-enhance-")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| Unavailable::Transport(format!("failed to create scratch file: {}", e)))?;
    file.write_all(request.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| Unavailable::Transport(format!("failed to write scratch file: {}", e)))?;
    Ok(file)
}

impl RemoteClassifier for GeminiCliClassifier {
    fn classify(&self, instruction: &str) -> Result<String, Unavailable> {
        let settings = &self.settings;
        let api_key = settings
            .api_key
            .as_ref()
            .ok_or_else(|| Unavailable::MissingCredential(settings.credential_var.clone()))?;

        let scratch = write_scratch(&build_request(&self.catalog, instruction))?;
        let args = vec![
            "-m".to_string(),
            settings.model.clone(),
            "-p".to_string(),
            format!("@{}", scratch.path().display()),
        ];
        let envs = vec![(settings.credential_var.clone(), api_key.expose().to_string())];

        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "calling remote classifier")
                .layer("adapter")
                .kind("remote")
                .field("program", settings.program.display().to_string())
                .field("model", settings.model.as_str())
                .field("timeout_secs", settings.timeout.as_secs()),
        );
        let started = Instant::now();
        let output = self
            .process
            .output_with_timeout(&settings.program, &args, &envs, settings.timeout)
            .map_err(|e| match e {
                Error::NotFound(_) => {
                    Unavailable::NotInstalled(settings.program.display().to_string())
                }
                Error::Timeout(_) => Unavailable::Timeout(settings.timeout),
                other => Unavailable::Transport(other.to_string()),
            })?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "remote classifier finished")
                .layer("adapter")
                .kind("remote")
                .field("elapsed_ms", started.elapsed().as_millis() as u64)
                .field("status", output.status),
        );

        if !output.success() {
            return Err(Unavailable::from_failed_exit(output.status, &output.stderr));
        }
        Ok(output.stdout.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiKey, EnhanceMode};
    use common::adapter::NoopLog;
    use common::ports::outbound::ProcessOutput;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use std::time::Duration;

    /// 呼び出し内容と、その時点の依頼文ファイルを記録するスタブ
    struct StubProcess {
        result: Result<ProcessOutput, Error>,
        seen: Mutex<Option<Seen>>,
    }

    struct Seen {
        program: PathBuf,
        args: Vec<String>,
        envs: Vec<(String, String)>,
        scratch: PathBuf,
        request: String,
    }

    impl StubProcess {
        fn new(result: Result<ProcessOutput, Error>) -> Arc<Self> {
            Arc::new(Self {
                result,
                seen: Mutex::new(None),
            })
        }

        fn exited(status: i32, stdout: &str, stderr: &str) -> Arc<Self> {
            Self::new(Ok(ProcessOutput {
                status: Some(status),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }))
        }
    }

    impl Process for StubProcess {
        fn output_with_timeout(
            &self,
            program: &Path,
            args: &[String],
            envs: &[(String, String)],
            _timeout: Duration,
        ) -> Result<ProcessOutput, Error> {
            let scratch = PathBuf::from(args[3].trim_start_matches('@'));
            let request = std::fs::read_to_string(&scratch).unwrap_or_default();
            *self.seen.lock().unwrap() = Some(Seen {
                program: program.to_path_buf(),
                args: args.to_vec(),
                envs: envs.to_vec(),
                scratch,
                request,
            });
            self.result.clone()
        }
    }

    fn settings(api_key: Option<&str>) -> RemoteSettings {
        let mut s = RemoteSettings::for_mode(EnhanceMode::Remote);
        s.api_key = api_key.and_then(ApiKey::new);
        s
    }

    fn classifier(process: Arc<StubProcess>, api_key: Option<&str>) -> GeminiCliClassifier {
        GeminiCliClassifier::new(
            process,
            Arc::new(PersonaCatalog::standard().unwrap()),
            settings(api_key),
            Arc::new(NoopLog),
        )
    }

    #[test]
    fn test_success_returns_trimmed_stdout_and_removes_scratch() {
        let process = StubProcess::exited(0, "\n/dev You are a Senior Developer.\n\n**Task**: add caching\n", "");
        let c = classifier(process.clone(), Some("key-123"));
        let out = c.classify("add caching").unwrap();
        assert_eq!(out, "/dev You are a Senior Developer.\n\n**Task**: add caching");

        let seen = process.seen.lock().unwrap();
        let seen = seen.as_ref().unwrap();
        assert_eq!(seen.program, PathBuf::from("gemini"));
        assert_eq!(&seen.args[..3], ["-m", "gemini-2.5-pro", "-p"]);
        assert_eq!(seen.envs, vec![("GEMINI_API_KEY".to_string(), "key-123".to_string())]);
        assert!(seen.request.contains("User prompt: \"add caching\""));
        assert!(!seen.scratch.exists(), "scratch file must be removed");
    }

    #[test]
    fn test_missing_credential_skips_process() {
        let process = StubProcess::exited(0, "unused", "");
        let c = classifier(process.clone(), None);
        assert_eq!(
            c.classify("add caching to the api").unwrap_err(),
            Unavailable::MissingCredential("GEMINI_API_KEY".to_string())
        );
        assert!(process.seen.lock().unwrap().is_none());

        let c = classifier(process.clone(), Some("your-gemini-api-key-here"));
        assert_eq!(c.classify("add caching to the api").unwrap_err().kind(), "missing_credential");
    }

    #[test]
    fn test_timeout_maps_to_unavailable_and_removes_scratch() {
        let process = StubProcess::new(Err(Error::timeout("slow")));
        let c = classifier(process.clone(), Some("key"));
        assert_eq!(
            c.classify("add caching to the api").unwrap_err(),
            Unavailable::Timeout(Duration::from_secs(15))
        );
        let seen = process.seen.lock().unwrap();
        assert!(!seen.as_ref().unwrap().scratch.exists());
    }

    #[test]
    fn test_not_installed_and_transport_errors() {
        let c = classifier(StubProcess::new(Err(Error::not_found("gone"))), Some("key"));
        assert_eq!(
            c.classify("add caching to the api").unwrap_err(),
            Unavailable::NotInstalled("gemini".to_string())
        );

        let c = classifier(StubProcess::new(Err(Error::process("EPERM"))), Some("key"));
        assert_eq!(c.classify("add caching to the api").unwrap_err().kind(), "transport");
    }

    #[test]
    fn test_non_zero_exit_is_classified() {
        let c = classifier(StubProcess::exited(1, "", "429 Too Many Requests"), Some("key"));
        assert_eq!(c.classify("add caching to the api").unwrap_err().kind(), "rate_limited");

        let c = classifier(StubProcess::exited(1, "", "401 Unauthorized"), Some("key"));
        assert_eq!(c.classify("add caching to the api").unwrap_err().kind(), "unauthorized");

        let c = classifier(StubProcess::exited(7, "partial", "boom"), Some("key"));
        assert_eq!(
            c.classify("add caching to the api").unwrap_err(),
            Unavailable::Failed {
                status: Some(7),
                stderr: "boom".to_string()
            }
        );
    }
}

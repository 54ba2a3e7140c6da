//! 標準サブプロセス実行（std::process::Command を委譲）
//!
//! stdout / stderr はパイプ詰まりを避けるため別スレッドで読む。
//! 待機は try_wait のポーリングで、timeout を超えたら kill して回収する。
//! 子の終了後も孫プロセスがパイプを握っていることがあるので、読み取りの待ちも timeout 内に収める。

use crate::error::Error;
use crate::ports::outbound::{Process, ProcessOutput};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);
/// 子が timeout 直前に終わった場合でも、残りの出力を拾うために待つ最小時間
const DRAIN_GRACE: Duration = Duration::from_millis(100);
const READ_CHUNK: usize = 8192;

/// 標準ライブラリの Command を使う Process 実装
#[derive(Debug, Clone, Default)]
pub struct StdProcess;

/// 別スレッドで読み続けるパイプ。読めた分は随時 buf に溜まる。
struct Drain {
    buf: Arc<Mutex<Vec<u8>>>,
    done: mpsc::Receiver<()>,
}

impl Drain {
    fn spawn<R: Read + Send + 'static>(pipe: Option<R>) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let (tx, done) = mpsc::channel();
        let sink = Arc::clone(&buf);
        thread::spawn(move || {
            if let Some(mut p) = pipe {
                let mut chunk = [0u8; READ_CHUNK];
                loop {
                    match p.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => match sink.lock() {
                            Ok(mut b) => b.extend_from_slice(&chunk[..n]),
                            Err(poisoned) => poisoned.into_inner().extend_from_slice(&chunk[..n]),
                        },
                    }
                }
            }
            let _ = tx.send(());
        });
        Self { buf, done }
    }

    /// EOF か deadline まで待ち、それまでに読めた分を返す
    fn collect(self, deadline: Instant) -> String {
        let _ = self
            .done
            .recv_timeout(deadline.saturating_duration_since(Instant::now()));
        let buf = match self.buf.lock() {
            Ok(b) => b,
            Err(poisoned) => poisoned.into_inner(),
        };
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Process for StdProcess {
    fn output_with_timeout(
        &self,
        program: &Path,
        args: &[String],
        envs: &[(String, String)],
        timeout: Duration,
    ) -> Result<ProcessOutput, Error> {
        let mut child = Command::new(program)
            .args(args)
            .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::not_found(format!("'{}' not found", program.display()))
                } else {
                    Error::process(format!("Failed to execute '{}': {}", program.display(), e))
                }
            })?;

        let stdout = Drain::spawn(child.stdout.take());
        let stderr = Drain::spawn(child.stderr.take());

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    let elapsed = started.elapsed();
                    if elapsed >= timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        // 読み取りスレッドは待たない（孫がパイプを握っていると終わらない）
                        return Err(Error::timeout(format!(
                            "'{}' did not finish within {:.1}s",
                            program.display(),
                            timeout.as_secs_f64()
                        )));
                    }
                    thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::process(format!(
                        "Failed to wait for '{}': {}",
                        program.display(),
                        e
                    )));
                }
            }
        };

        let deadline = (started + timeout).max(Instant::now() + DRAIN_GRACE);
        Ok(ProcessOutput {
            status: status.code(),
            stdout: stdout.collect(deadline),
            stderr: stderr.collect(deadline),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str, timeout: Duration) -> Result<ProcessOutput, Error> {
        StdProcess.output_with_timeout(
            Path::new("sh"),
            &["-c".to_string(), script.to_string()],
            &[("PE_TEST_VALUE".to_string(), "from-env".to_string())],
            timeout,
        )
    }

    #[test]
    fn test_captures_stdout_and_env() {
        let out = sh("printf '%s' \"$PE_TEST_VALUE\"", Duration::from_secs(10)).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "from-env");
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_non_zero_exit_keeps_stderr() {
        let out = sh("echo 'quota exceeded' >&2; exit 3", Duration::from_secs(10)).unwrap();
        assert!(!out.success());
        assert_eq!(out.status, Some(3));
        assert!(out.stderr.contains("quota exceeded"));
    }

    #[test]
    fn test_timeout_kills_child() {
        let started = Instant::now();
        let err = sh("sleep 5", Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_background_grandchild_does_not_extend_wait() {
        let started = Instant::now();
        let out = sh("sleep 5 & echo answer", Duration::from_secs(1)).unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed < Duration::from_secs(3), "took {:?} with a 1s timeout", elapsed);
        assert!(out.success());
        assert_eq!(out.stdout, "answer\n");
    }

    #[test]
    fn test_output_written_before_exit_is_complete() {
        let script = "i=0; while [ $i -lt 2000 ]; do echo line$i; i=$((i+1)); done";
        let out = sh(script, Duration::from_secs(10)).unwrap();
        assert_eq!(out.stdout.lines().count(), 2000);
        assert!(out.stdout.ends_with("line1999\n"));
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let err = StdProcess
            .output_with_timeout(
                Path::new("/nonexistent/prompt-enhance-no-such-binary"),
                &[],
                &[],
                Duration::from_secs(1),
            )
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}

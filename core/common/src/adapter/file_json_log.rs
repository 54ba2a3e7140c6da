//! ファイルへ JSONL で追記する Log 実装
//!
//! ログの出力先はファイルのみ。stderr への人間向け表示（StderrLog）とは別。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                self.fs.create_dir_all(parent)?;
            }
        }
        let mut w = self.fs.open_append(&self.path)?;
        let line = serde_json::to_string(record)?;
        use std::io::Write;
        w.write_all(line.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.write_all(b"\n")
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// 何も出力しない Log 実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use crate::ports::outbound::LogLevel;

    #[test]
    fn test_noop_log() {
        let log = NoopLog;
        assert!(log.log(&LogRecord::new(LogLevel::Info, "test")).is_ok());
    }

    #[test]
    fn test_file_json_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("enhance.jsonl");
        let log = FileJsonLog::new(Arc::new(StdFileSystem), &path);
        log.log(&LogRecord::new(LogLevel::Info, "first").layer("cli"))
            .unwrap();
        log.log(&LogRecord::new(LogLevel::Warn, "second").field("reason", "timeout"))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["message"], "first");
        assert_eq!(first["layer"], "cli");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "warn");
        assert_eq!(second["fields"]["reason"], "timeout");
    }
}

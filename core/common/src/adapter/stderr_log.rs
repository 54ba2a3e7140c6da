//! 人間向けログ（LogRecord → stderr に 1 行で出力）
//!
//! フックの標準出力に混ざらないよう、出力先は常に stderr。
//! fields は要点のみ（巨大化防止のため値を切り詰める）。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use serde_json::Value;
use std::io::Write;

const FIELD_VALUE_MAX: usize = 200;

/// 行頭に付けるタグ
const TAG: &str = "[prompt-enhance]";

fn field_value(v: &Value) -> String {
    let s = match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if s.chars().count() <= FIELD_VALUE_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELD_VALUE_MAX).collect::<String>();
    format!("{}...", truncated)
}

/// 1 レコードを 1 行に整形する
pub fn format_line(record: &LogRecord) -> String {
    let mut line = format!("{} {}: {}", TAG, record.level.as_str(), record.message);
    if let Some(ref fields) = record.fields {
        for (k, v) in fields {
            line.push_str(&format!(" {}={}", k, field_value(v)));
        }
    }
    line
}

/// stderr に整形して出力する Log 実装
pub struct StderrLog {
    min_level: LogLevel,
}

impl StderrLog {
    /// `min_level` 以上に重要なレコードだけを出す
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Default for StderrLog {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level > self.min_level {
            return Ok(());
        }
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", format_line(record)).map_err(|e| Error::io_msg(e.to_string()))
    }
}

//! 構造化ログ Outbound ポート
//!
//! 診断メッセージ（モード選択・スコア・失敗理由）はすべてこの trait に流す。
//! 標準出力（フックの出力）とは別チャネルで、stderr や JSONL ファイルにのみ書き出す。

use crate::error::Error;
use serde::Serialize;
use std::collections::BTreeMap;

/// 現在時刻を ISO8601 (RFC3339) で返す。LogRecord の `ts` に使う。
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// ログレベル（宣言順が重要度順。`level <= min` なら出力対象）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// 1 行分のログレコード（JSONL の 1 行に対応）
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// ISO8601 形式のタイムスタンプ
    pub ts: String,
    pub level: LogLevel,
    pub message: String,
    /// 例: cli, usecase, adapter, wiring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    /// 例: lifecycle, input, classify, remote, error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// 追加のキー・値（オブジェクトとして出力）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, serde_json::Value>>,
}

impl LogRecord {
    /// 現在時刻でレコードを作る
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            ts: now_iso8601(),
            level,
            message: message.into(),
            layer: None,
            kind: None,
            fields: None,
        }
    }

    pub fn layer(mut self, layer: &str) -> Self {
        self.layer = Some(layer.to_string());
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }
}

/// 構造化ログを出力する Outbound ポート
///
/// 実装は common::adapter::StderrLog（人間向け 1 行）や FileJsonLog（JSONL 追記）、NoopLog（テスト用）など。
pub trait Log: Send + Sync {
    /// 1 レコードをログに書き出す
    fn log(&self, record: &LogRecord) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_record_serialize() {
        let rec = LogRecord {
            ts: "2026-02-07T12:00:00Z".to_string(),
            level: LogLevel::Info,
            message: "hook started".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = BTreeMap::new();
                m.insert("mode".to_string(), serde_json::json!("heuristic"));
                Some(m)
            },
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"ts\":\"2026-02-07T12:00:00Z\""));
        assert!(json.contains("\"level\":\"info\""));
        assert!(json.contains("\"message\":\"hook started\""));
        assert!(json.contains("\"layer\":\"cli\""));
        assert!(json.contains("\"kind\":\"lifecycle\""));
        assert!(json.contains("\"mode\":\"heuristic\""));
    }

    #[test]
    fn test_log_record_builder_skips_empty_fields() {
        let rec = LogRecord::new(LogLevel::Debug, "scores");
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("\"layer\""));
        assert!(!json.contains("\"fields\""));

        let rec = rec.layer("usecase").field("winner", "devops").field("score", 12.0);
        let fields = rec.fields.as_ref().unwrap();
        assert_eq!(fields["winner"], serde_json::json!("devops"));
        assert_eq!(fields["score"], serde_json::json!(12.0));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Info < LogLevel::Debug);
    }
}

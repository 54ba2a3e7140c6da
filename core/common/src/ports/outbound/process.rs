//! サブプロセス実行 Outbound ポート
//!
//! 外部コマンド（リモート分類器の CLI など）の起動を trait で抽象化する。

use crate::error::Error;
use std::path::Path;
use std::time::Duration;

/// 捕捉したサブプロセスの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// 終了コード（シグナル終了時は None）
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// サブプロセス実行の抽象
///
/// 実装は `common::adapter::StdProcess`（std::process::Command）やテスト用のスタブなど。
pub trait Process: Send + Sync {
    /// stdout / stderr を捕捉して実行する。
    ///
    /// - 実行ファイルが無い: `Error::NotFound`
    /// - `timeout` 超過: 子プロセスを kill して `Error::Timeout`
    fn output_with_timeout(
        &self,
        program: &Path,
        args: &[String],
        envs: &[(String, String)],
        timeout: Duration,
    ) -> Result<ProcessOutput, Error>;
}

//! 環境変数解決 Outbound ポート
//!
//! usecase / adapter はこの trait 経由でのみ環境変数にアクセスする。

use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を取得する。未設定・空文字はどちらも None。
    fn var(&self, key: &str) -> Option<String>;

    /// カレントディレクトリ（環境ファイルの既定位置の解決用）
    fn current_dir(&self) -> Result<PathBuf, Error>;
}

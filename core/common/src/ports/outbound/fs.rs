//! ファイルシステム Outbound ポート
//!
//! usecase / adapter はこの trait 経由でのみファイル I/O を行う。

use crate::error::Error;
use std::path::Path;

/// ファイルメタデータ（通常ファイルかどうか）
#[derive(Debug, Clone)]
pub struct FileMetadata {
    is_file: bool,
}

impl FileMetadata {
    pub fn new(is_file: bool) -> Self {
        Self { is_file }
    }

    pub fn is_file(&self) -> bool {
        self.is_file
    }
}

/// ファイルシステム抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdFileSystem` やテスト用のメモリ FS など。
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    fn metadata(&self, path: &Path) -> Result<FileMetadata, Error>;
    /// 追記用に開く（存在しなければ作成）。返した Writer を drop すると閉じる。
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;
}

//! エラーハンドリング
//!
//! 終了コードは sysexits に揃える（64: 引数不正, 65: データ不正, 69: 外部コマンド不可, 70: 内部エラー, 74: I/O, 78: 設定）。

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Env(String),
    #[error("{0}")]
    Json(String),
    /// 実行ファイルが見つからない（spawn 時の NotFound）
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Process(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    System(String),
}

impl Error {
    /// 引数不正エラー
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn process(msg: impl Into<String>) -> Self {
        Self::Process(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// システムエラー
    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// 使い方を表示すべきエラーか（引数不正）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) => 65,
            Self::NotFound(_) | Self::Process(_) | Self::Timeout(_) => 69,
            Self::System(_) => 70,
            Self::Io(_) => 74,
            Self::Env(_) => 78,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

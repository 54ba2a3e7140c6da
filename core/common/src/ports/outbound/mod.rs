//! Outbound ポート: アプリが外界（FS・環境変数・プロセス・ログ）を使うための trait

pub mod env_resolver;
pub mod fs;
pub mod log;
pub mod process;

pub use env_resolver::EnvResolver;
pub use fs::{FileMetadata, FileSystem};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use process::{Process, ProcessOutput};

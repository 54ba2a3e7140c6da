//! アダプター（外界の I/O を trait で抽象化した標準実装）
//!
//! usecase はポートの trait 経由でのみファイル・環境変数・プロセス・ログに触れる。
//! 実装は標準実装（Std*）やテスト用のモックを注入する。

pub mod composite_log;
pub mod file_json_log;
pub mod stderr_log;
pub mod std_env_resolver;
pub mod std_fs;
pub mod std_process;

pub use crate::ports::outbound::{EnvResolver, FileMetadata, FileSystem, Log, Process};
pub use composite_log::CompositeLog;
pub use file_json_log::{FileJsonLog, NoopLog};
pub use stderr_log::StderrLog;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use std_process::StdProcess;

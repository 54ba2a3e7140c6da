//! Ports & Adapters のポート定義
//!
//! - outbound: アプリが外界（FS・環境変数・プロセス・ログ）を使うための trait

pub mod outbound;

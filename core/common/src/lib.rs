//! prompt-enhance 共通ライブラリ
//!
//! フック本体（`enhance`）で使うエラー型・Outbound ポート・標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// Ports & Adapters のポート定義
pub mod ports;

/// 標準アダプタ（Std*）とログ出力
pub mod adapter;

/// key=value 形式の環境ファイル
pub mod env_file;

//! リモート分類器の Outbound ポート

use crate::domain::Unavailable;

/// 外部の AI 支援分類器
///
/// 生の指示を渡し、強化済みプロンプトの生テキスト（trim 済み）を受け取る。
/// 失敗はすべて `Unavailable` として返し、呼び出し側に例外は上げない。
/// 実装は adapter::GeminiCliClassifier やテスト用のスタブなど。
pub trait RemoteClassifier: Send + Sync {
    fn classify(&self, instruction: &str) -> Result<String, Unavailable>;
}

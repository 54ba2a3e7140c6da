//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Config;
use crate::domain::EnhanceOutcome;
use common::error::Error;

/// CLI の設定を受けて 1 コマンドを実行する（main の Runner が実装）
pub trait UseCaseRunner {
    fn run(&self, config: Config) -> Result<i32, Error>;
}

/// 1 つのプロンプトを強化する
///
/// 実装（EnhanceUseCase）はエラーを返さない。どの終端でも出力文字列がちょうど 1 つ決まる。
pub trait EnhancePrompt: Send + Sync {
    fn enhance(&self, prompt: &str) -> EnhanceOutcome;
}

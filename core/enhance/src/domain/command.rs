//! CLI から解釈したコマンド（ディスパッチは main に集約）

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceCommand {
    Help,
    ListPersonas,
    /// 入力を分類して根拠を表示する（書き換えない）
    Suggest,
    /// フック本体: 入力を強化して 1 つ出力する
    Enhance,
}

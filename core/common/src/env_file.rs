//! key=value 形式の環境ファイル（.env）
//!
//! 解釈は dotenvy に任せる。プロセス環境は書き換えず、読み込んだ値をマップで返す。
//! 値の優先順位（環境変数 > ファイル）は呼び出し側で決める。

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::collections::BTreeMap;
use std::path::Path;

/// 環境ファイルから読み込んだ変数
pub type EnvVars = BTreeMap<String, String>;

/// 内容をパースする。後に出た同じキーが優先。
pub fn parse(content: &str) -> Result<EnvVars, Error> {
    dotenvy::from_read_iter(content.as_bytes())
        .map(|item| item.map_err(|e| Error::env(format!("invalid env file: {}", e))))
        .collect()
}

/// ファイルを読み込んでパースする。ファイルが無ければ空。
pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<EnvVars, Error> {
    match fs.metadata(path) {
        Err(_) => return Ok(EnvVars::new()),
        Ok(meta) if !meta.is_file() => {
            return Err(Error::env(format!(
                "env file '{}' is not a regular file",
                path.display()
            )))
        }
        Ok(_) => {}
    }
    let content = fs.read_to_string(path)?;
    parse(&content)
}

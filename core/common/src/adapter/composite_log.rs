//! 複数の Log へ順に書き出すコンポジット

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::sync::Arc;

/// 登録された Log すべてに書き出す。途中で失敗しても残りには書き、最初のエラーを返す。
pub struct CompositeLog {
    logs: Vec<Arc<dyn Log>>,
}

impl CompositeLog {
    pub fn new(logs: Vec<Arc<dyn Log>>) -> Self {
        Self { logs }
    }
}

impl Log for CompositeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for l in &self.logs {
            if let Err(e) = l.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

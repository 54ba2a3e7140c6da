//! テスト用のダブル

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::adapter::NoopLog;
use common::error::Error;
use common::ports::outbound::{Log, LogRecord};

use crate::domain::{EnhanceConfig, EnhanceMode, PersonaCatalog, Unavailable};
use crate::ports::outbound::RemoteClassifier;
use crate::usecase::EnhanceUseCase;
use crate::wiring::App;

/// 決まった応答を返し、呼ばれた回数を数える分類器
pub struct StubClassifier {
    response: Result<String, Unavailable>,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(reason: Unavailable) -> Arc<Self> {
        Arc::new(Self {
            response: Err(reason),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteClassifier for StubClassifier {
    fn classify(&self, _instruction: &str) -> Result<String, Unavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// 呼ばれると panic する分類器
pub struct PanickingClassifier;

impl RemoteClassifier for PanickingClassifier {
    fn classify(&self, _instruction: &str) -> Result<String, Unavailable> {
        panic!("classifier exploded");
    }
}

/// 受け取ったレコードを保持する Log
#[derive(Default)]
pub struct RecordingLog {
    pub records: Mutex<Vec<LogRecord>>,
}

impl RecordingLog {
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub fn use_case(config: EnhanceConfig, remote: Arc<dyn RemoteClassifier>) -> EnhanceUseCase {
    EnhanceUseCase::new(
        config,
        Arc::new(PersonaCatalog::standard().unwrap()),
        remote,
        Arc::new(NoopLog),
    )
}

pub fn mode(mode: EnhanceMode) -> EnhanceConfig {
    EnhanceConfig::new(mode)
}

pub fn app(config: EnhanceConfig, remote: Arc<dyn RemoteClassifier>, log: Arc<dyn Log>) -> App {
    let catalog = Arc::new(PersonaCatalog::standard().unwrap());
    App {
        log: Arc::clone(&log),
        catalog: Arc::clone(&catalog),
        enhance: EnhanceUseCase::new(config, catalog, remote, log),
    }
}

//! Outbound ポート: アプリが外界（リモート分類器）を使うための trait

pub mod remote_classifier;

pub use remote_classifier::RemoteClassifier;

//! Core session-state management for sesskit
//!
//! このクレートは以下を提供します:
//! - セッションのライフサイクル管理 (登録、失効判定、ID再生成、破棄)
//! - 永続データと読み捨てフラッシュ値の2つの名前空間
//! - 差し替え可能なセッションストア境界とインメモリ実装
//! - TOMLファイルと環境変数による設定

pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use config::{SessionConfig, SlotKeys};
pub use error::{Error, Result};
pub use session::{SessionManager, SessionRecord};
pub use store::{MemoryStore, SessionStore, SessionValue};

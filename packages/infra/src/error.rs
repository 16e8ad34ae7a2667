//! # インフラ層エラー定義
//!
//! ストアの内部状態に起因するエラー。クライアントの入力とは無関係のため、
//! API 層では 500 Internal Server Error として扱う。

use thiserror::Error;

/// インフラ層で発生するエラー
#[derive(Debug, Error)]
pub enum InfraError {
    /// ロック保持中に別スレッドがパニックし、ストアの整合性が保証できない
    #[error("ストアのロックが汚染されています: {0}")]
    LockPoisoned(&'static str),
}

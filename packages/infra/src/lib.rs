//! # Usersvc インフラ層
//!
//! ドメインモデルの保存先を提供する。
//!
//! ## モジュール構成
//!
//! - [`repository`] - リポジトリトレイトとインメモリ実装
//! - [`error`] - インフラ層エラー
//!
//! 永続化は行わない。ストアはプロセスの起動時に空で作られ、終了時に破棄される。

pub mod error;
pub mod repository;

pub use error::InfraError;

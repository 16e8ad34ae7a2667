//! # Usersvc ドメイン層
//!
//! ユーザーリソースのドメインモデルと入力検証ルールを定義する。
//!
//! ## モジュール構成
//!
//! - [`user`] - ユーザーエンティティと値オブジェクト
//! - [`error`] - ドメイン層エラー
//!
//! このクレートは HTTP やストレージに依存しない。

pub mod error;
pub mod user;

pub use error::DomainError;

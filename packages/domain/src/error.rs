//! # ドメイン層エラー定義
//!
//! 入力値がビジネスルールに違反した場合のエラー型。
//! API 層でこのエラーを受け取り、400 Bad Request に変換する。
//!
//! ## 使用例
//!
//! ```rust
//! use usersvc_domain::DomainError;
//!
//! fn validate_name(name: &str) -> Result<(), DomainError> {
//!     if name.trim().is_empty() {
//!         return Err(DomainError::Validation("name is required".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_name("  ").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// メッセージはそのままクライアントに返せる内容にする。
    #[error("{0}")]
    Validation(String),
}

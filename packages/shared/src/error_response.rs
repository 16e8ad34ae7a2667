//! # エラーレスポンス
//!
//! すべてのエラーレスポンスで共通の JSON 形状を提供する。
//!
//! ```json
//! { "error": "invalid min_age" }
//! ```

use serde::{Deserialize, Serialize};

/// 500 系レスポンスで返す固定メッセージ
///
/// 内部エラーの詳細はクライアントに返さない。
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error: String,
}

impl ErrorResponse {
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         error: message.into(),
      }
   }

   /// 500 Internal Server Error
   ///
   /// メッセージは固定値（内部情報を漏らさないため）。
   pub fn internal_error() -> Self {
      Self::new(INTERNAL_ERROR_MESSAGE)
   }
}

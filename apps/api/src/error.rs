//! # API エラーハンドリング
//!
//! ハンドラが返すエラーの定義と、HTTP レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **直和型**: クライアント向けのエラーと予期しないエラーを列挙型で区別し、
//!   変換処理では網羅的な `match` で分岐する
//! - **変換は 1 箇所**: ステータスコードの決定は [`IntoResponse`] 実装だけが行う。
//!   ハンドラが直接エラーレスポンスを組み立てることはない
//! - **thiserror + anyhow**: 予期しないエラーは `anyhow::Error` として `?` で伝播する
//!
//! ## レスポンス形式
//!
//! ```json
//! { "error": "invalid json" }
//! ```
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError ──────────┐
//!                       ├──▶ AppError::Application ──▶ 4xx + { "error": message }
//! JsonRejection 等 ─────┘
//! InfraError / その他 ──────▶ AppError::Unexpected ───▶ 500 + 固定メッセージ
//! ```

use std::any::Any;

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use usersvc_domain::DomainError;
use usersvc_infra::InfraError;
use usersvc_shared::ErrorResponse;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum AppError {
   /// クライアントに返すアプリケーションエラー
   ///
   /// `message` はそのままレスポンスボディに含まれる。
   /// 内部情報を含めてはならない。
   #[error("{message}")]
   Application { status: StatusCode, message: String },

   /// 予期しないエラー（500 Internal Server Error）
   ///
   /// 詳細はサーバーサイドのログにのみ出力する。
   #[error("予期しないエラー: {0}")]
   Unexpected(#[from] anyhow::Error),
}

impl AppError {
   pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
      Self::Application {
         status,
         message: message.into(),
      }
   }

   /// 400 Bad Request
   pub fn bad_request(message: impl Into<String>) -> Self {
      Self::new(StatusCode::BAD_REQUEST, message)
   }

   /// レスポンスに使うステータスコード
   pub fn status(&self) -> StatusCode {
      match self {
         Self::Application { status, .. } => *status,
         Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }
}

impl From<DomainError> for AppError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(message) => Self::bad_request(message),
      }
   }
}

impl From<InfraError> for AppError {
   fn from(err: InfraError) -> Self {
      Self::Unexpected(err.into())
   }
}

impl IntoResponse for AppError {
   fn into_response(self) -> Response {
      match self {
         Self::Application { status, message } => {
            (status, Json(ErrorResponse::new(message))).into_response()
         }
         Self::Unexpected(err) => {
            // 内部エラーの詳細はログにのみ出力（セキュリティ考慮）
            tracing::error!("内部エラー: {:?}", err);
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               Json(ErrorResponse::internal_error()),
            )
               .into_response()
         }
      }
   }
}

/// ハンドラ内のパニックを 500 レスポンスに変換する
///
/// `CatchPanicLayer::custom` に渡す。パニックも予期しないエラーとして
/// [`AppError::Unexpected`] と同じ経路でレスポンスを作る。
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
   let detail = if let Some(s) = payload.downcast_ref::<String>() {
      s.clone()
   } else if let Some(s) = payload.downcast_ref::<&str>() {
      (*s).to_string()
   } else {
      "不明なパニック".to_string()
   };

   AppError::Unexpected(anyhow::anyhow!("ハンドラがパニックしました: {detail}")).into_response()
}

/// 未定義のルート（404 Not Found）
pub async fn not_found() -> AppError {
   AppError::new(StatusCode::NOT_FOUND, "not found")
}

/// 定義済みパスに対する未対応のメソッド（405 Method Not Allowed）
pub async fn method_not_allowed() -> AppError {
   AppError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

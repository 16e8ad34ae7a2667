//! # アプリケーション構築
//!
//! State の注入とルーター構築を担当する。
//! バイナリはインフラ初期化とサーバー起動に集中し、テストは同じルーターを直接叩く。
//!
//! ## ルート
//!
//! | メソッド | パス | ハンドラ |
//! |---------|------|---------|
//! | GET | `/healthz` | [`health_check`] |
//! | GET | `/hello` | [`hello`] |
//! | GET | `/users` | [`list_users`] |
//! | POST | `/users` | [`create_user`] |
//!
//! ## レイヤー（外側から）
//!
//! 1. `TraceLayer`: アクセスログ
//! 2. `CatchPanicLayer`: パニックを 500 レスポンスに変換
//! 3. `CorsLayer`: すべてのオリジンを許可
//! 4. `CompressionLayer`: `Accept-Encoding` に応じて gzip 圧縮

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
   catch_panic::CatchPanicLayer,
   compression::CompressionLayer,
   cors::CorsLayer,
   trace::TraceLayer,
};

use crate::{
   error::{handle_panic, method_not_allowed, not_found},
   handler::{UserState, create_user, health_check, hello, list_users},
};

/// ルーターを構築する
pub fn build_app(user_state: Arc<UserState>) -> Router {
   Router::new()
      .route("/healthz", get(health_check))
      .route("/hello", get(hello))
      .route("/users", get(list_users).post(create_user))
      .with_state(user_state)
      .fallback(not_found)
      .method_not_allowed_fallback(method_not_allowed)
      .layer(CompressionLayer::new())
      .layer(CorsLayer::permissive())
      .layer(CatchPanicLayer::custom(handle_panic))
      .layer(TraceLayer::new_for_http())
}

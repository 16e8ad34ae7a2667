//! # ヘルスチェックハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! GET /healthz
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! { "status": "ok" }
//! ```

use axum::Json;
use usersvc_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// ストアの状態は確認せず、常に 200 OK を返す。
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::ok())
}

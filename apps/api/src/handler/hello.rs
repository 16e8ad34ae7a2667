//! # 挨拶ハンドラ
//!
//! ```text
//! GET /hello?name=Ann  →  { "hello": "Ann" }
//! GET /hello           →  { "hello": "world" }
//! ```

use axum::{
   Json,
   extract::{Query, rejection::QueryRejection},
};
use serde::Serialize;

use super::query::{QueryPairs, first_value};

/// `name` が省略・空白のみの場合に使う名前
pub const DEFAULT_NAME: &str = "world";

#[derive(Debug, Serialize)]
pub struct HelloResponse {
   pub hello: String,
}

/// GET /hello
///
/// 失敗しない。クエリが解釈できない場合もデフォルト名で応答する。
/// `name` が複数ある場合は最初の値を使い、トリミングせずそのまま返す。
pub async fn hello(query: Result<Query<QueryPairs>, QueryRejection>) -> Json<HelloResponse> {
   let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
   let name = first_value(&pairs, "name")
      .filter(|name| !name.trim().is_empty())
      .unwrap_or(DEFAULT_NAME)
      .to_string();

   Json(HelloResponse { hello: name })
}

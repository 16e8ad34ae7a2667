//! # ユーザーハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /users` - ユーザーを作成する
//! - `GET /users` - ユーザー一覧を取得する（`min_age` で年齢の下限を指定可能）
//!
//! ## ボディのデコード
//!
//! | ボディ | 扱い |
//! |--------|------|
//! | 空 | 全フィールド未指定 |
//! | `null` | 全フィールド未指定 |
//! | JSON オブジェクト | フィールド名は大文字小文字を区別しない。未知のフィールドは無視 |
//! | それ以外、または `Content-Type` が `application/json` でない | `invalid json` |
//!
//! ## エラー
//!
//! | 条件 | ステータス | メッセージ |
//! |------|-----------|-----------|
//! | ボディが JSON として解釈できない | 400 | `invalid json` |
//! | 名前が空白のみ、または年齢が 0 以下 | 400 | `name and age are required` |
//! | `min_age` が 0 以上の整数でない | 400 | `invalid min_age` |

use std::sync::Arc;

use axum::{
   Json,
   body::Bytes,
   extract::{
      Query,
      State,
      rejection::{BytesRejection, QueryRejection},
   },
   http::{HeaderMap, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use usersvc_domain::user::{INVALID_MIN_AGE_MESSAGE, MinAge, NewUser, User};
use usersvc_infra::repository::UserRepository;

use super::query::{QueryPairs, first_value};
use crate::error::AppError;

/// ボディをデコードできない場合のメッセージ
pub const INVALID_JSON_MESSAGE: &str = "invalid json";

/// ユーザー API の共有状態
pub struct UserState {
   pub repository: Arc<dyn UserRepository>,
}

impl UserState {
   pub fn new(repository: Arc<dyn UserRepository>) -> Self {
      Self { repository }
   }
}

// --- リクエスト/レスポンス型 ---

/// ユーザー作成リクエスト
///
/// フィールドの欠落や `null` はデコードエラーにせず、
/// 空文字列・0 として検証に回す。
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
   pub name: Option<String>,
   pub age:  Option<i64>,
}

impl CreateUserRequest {
   /// JSON ボディをデコードする
   ///
   /// `null` は空のリクエストになる。フィールドの値が `null` の場合は
   /// 同名の別フィールドで設定済みの値を上書きしない。
   pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
      let mut req = Self::default();
      let Some(fields) = serde_json::from_slice::<Option<Map<String, Value>>>(bytes)? else {
         return Ok(req);
      };

      for (key, value) in fields {
         if key.eq_ignore_ascii_case("name") {
            if let Some(name) = serde_json::from_value(value)? {
               req.name = Some(name);
            }
         } else if key.eq_ignore_ascii_case("age") {
            if let Some(age) = serde_json::from_value(value)? {
               req.age = Some(age);
            }
         }
      }
      Ok(req)
   }

   /// リクエストボディからデコードする
   ///
   /// 空のボディは `Content-Type` を問わず空のリクエストとして扱う。
   fn from_body(headers: &HeaderMap, body: &[u8]) -> Result<Self, AppError> {
      if body.is_empty() {
         return Ok(Self::default());
      }

      let is_json = headers
         .get(header::CONTENT_TYPE)
         .and_then(|value| value.to_str().ok())
         .is_some_and(|value| value.starts_with("application/json"));
      if !is_json {
         tracing::debug!("Content-Type が application/json ではありません");
         return Err(AppError::bad_request(INVALID_JSON_MESSAGE));
      }

      Self::from_json(body).map_err(|err| {
         tracing::debug!("リクエストボディのデコードに失敗: {err}");
         AppError::bad_request(INVALID_JSON_MESSAGE)
      })
   }
}

/// ユーザー情報レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
   pub id:   i64,
   pub name: String,
   pub age:  i64,
}

impl From<&User> for UserResponse {
   fn from(user: &User) -> Self {
      Self {
         id:   user.id().as_i64(),
         name: user.name().as_str().to_string(),
         age:  user.age().as_i64(),
      }
   }
}

// --- ハンドラ ---

/// POST /users
///
/// ## レスポンス
///
/// - `201 Created`: 作成したユーザー
/// - `400 Bad Request`: デコード失敗または検証失敗
#[tracing::instrument(skip_all)]
pub async fn create_user(
   State(state): State<Arc<UserState>>,
   headers: HeaderMap,
   body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
   let body = body.map_err(|rejection| {
      tracing::debug!("リクエストボディの読み込みに失敗: {}", rejection.body_text());
      AppError::bad_request(INVALID_JSON_MESSAGE)
   })?;
   let req = CreateUserRequest::from_body(&headers, &body)?;

   let new_user = NewUser::new(req.name.unwrap_or_default(), req.age.unwrap_or_default())?;
   let user = state.repository.insert(new_user)?;

   tracing::info!(user_id = %user.id(), "ユーザーを作成しました");
   Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users
///
/// ## クエリパラメータ
///
/// - `min_age`: 年齢の下限（省略時と `0` は全件。複数指定時は最初の値）
///
/// ## レスポンス
///
/// - `200 OK`: ユーザー一覧（該当なしの場合は空配列）
/// - `400 Bad Request`: `min_age` が不正
#[tracing::instrument(skip_all)]
pub async fn list_users(
   State(state): State<Arc<UserState>>,
   query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
   let Query(pairs) = query.map_err(|_| AppError::bad_request(INVALID_MIN_AGE_MESSAGE))?;
   let min_age = MinAge::parse(first_value(&pairs, "min_age"))?;

   let users = state.repository.find_all(min_age)?;

   Ok(Json(users.iter().map(UserResponse::from).collect()))
}

//! # Usersvc API サーバー
//!
//! ユーザーリソースを JSON で公開する HTTP API。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 成功時 |
//! |---------|------|--------|
//! | GET | `/healthz` | 200 `{"status":"ok"}` |
//! | GET | `/hello` | 200 `{"hello":"<name>"}` |
//! | GET | `/users` | 200 `[User...]` |
//! | POST | `/users` | 201 `User` |
//!
//! ## モジュール構成
//!
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`app_builder`] - ルーター構築
//! - [`lifecycle`] - 起動と Graceful shutdown
//!
//! ## 依存関係
//!
//! - `usersvc_domain`: ユーザーモデル、入力検証
//! - `usersvc_infra`: インメモリストア
//! - `usersvc_shared`: レスポンス型、トレーシング初期化

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod lifecycle;

//! # リポジトリ
//!
//! ドメインモデルの保存と取得を担うトレイトと、その実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: ハンドラはトレイトオブジェクト経由でストアを受け取る
//! - **同期 API**: ロックは短時間しか保持せず、`await` をまたがない
//! - **テスタビリティ**: トレイト経由でスタブに差し替え可能

pub mod user_repository;

pub use user_repository::{InMemoryUserRepository, UserRepository};

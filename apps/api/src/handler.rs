//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - 失敗時は [`AppError`](crate::error::AppError) を返し、ステータスコードの決定は任せる
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── health.rs   # GET /healthz
//!     ├── hello.rs    # GET /hello
//!     ├── query.rs    # クエリパラメータの取り出し
//!     └── user.rs     # GET /users, POST /users
//! ```

pub mod health;
pub mod hello;
pub mod query;
pub mod user;

pub use health::health_check;
pub use hello::hello;
pub use user::{UserState, create_user, list_users};

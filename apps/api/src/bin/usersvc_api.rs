//! # Usersvc API サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `SHUTDOWN_TIMEOUT_SECS` | No | Graceful shutdown の待機上限（デフォルト: `5`） |
//! | `RUST_LOG` | No | ログレベル |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p usersvc-api
//!
//! # 本番環境
//! API_PORT=8080 LOG_FORMAT=json cargo run -p usersvc-api --release
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use tokio::net::TcpListener;
use usersvc_api::{
   app_builder::build_app,
   config::ServerConfig,
   handler::UserState,
   lifecycle::{Lifecycle, shutdown_signal},
};
use usersvc_infra::repository::InMemoryUserRepository;
use usersvc_shared::observability::{LogConfig, init_tracing};

/// サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ストアの作成とルーターの構築
/// 5. ポートのバインド（失敗時は終了コード 1 で終了）
/// 6. シャットダウンシグナルまで稼働
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   init_tracing(&LogConfig::from_env());

   let config = ServerConfig::from_env().context("設定の読み込みに失敗しました")?;

   let user_state = Arc::new(UserState::new(Arc::new(InMemoryUserRepository::new())));
   let app = build_app(user_state);

   let addr = config.bind_address();
   let listener = match TcpListener::bind(addr.as_str()).await {
      Ok(listener) => listener,
      Err(err) => {
         tracing::error!("ポートのバインドに失敗しました: {addr}: {err}");
         return Err(err).context(format!("{addr} にバインドできません"));
      }
   };
   tracing::info!("サーバーが起動しました: {}", addr);

   if let Err(err) = Lifecycle::new(config.shutdown_timeout)
      .run(listener, app, shutdown_signal())
      .await
   {
      tracing::error!("サーバーが異常終了しました: {err}");
      return Err(err.into());
   }

   tracing::info!("サーバーを停止しました");
   Ok(())
}

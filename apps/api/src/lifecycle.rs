//! # サーバーライフサイクル
//!
//! サーバーの起動からシャットダウン完了までを管理する。
//!
//! ## 状態遷移
//!
//! ```text
//! Starting ──▶ Running ──▶ ShuttingDown ──▶ Stopped
//!               │ シグナル受信     │ 全リクエスト完了 or タイムアウト
//! ```
//!
//! ## タスク構成
//!
//! - **受け付けタスク**: `axum::serve` を別タスクで実行する
//! - **呼び出し元タスク**: シャットダウンシグナルを待ち、受け付けタスクに
//!   `oneshot` で停止を通知したうえで、上限時間付きで終了を待つ
//!
//! シャットダウン開始後は新規接続を受け付けない。上限時間を過ぎても
//! 処理中のリクエストが残っている場合は受け付けタスクを中断し、
//! [`LifecycleError::ShutdownTimedOut`] を返す。シャットダウンは一度しか試みない。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! let listener = TcpListener::bind("0.0.0.0:8080").await?;
//! Lifecycle::new(Duration::from_secs(5))
//!     .run(listener, app, shutdown_signal())
//!     .await?;
//! ```

use std::{future::Future, io, time::Duration};

use axum::Router;
use thiserror::Error;
use tokio::{
   net::TcpListener,
   sync::{oneshot, watch},
   task::JoinError,
};

/// ライフサイクルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
   /// 初期化中（まだ接続を受け付けていない）
   Starting,
   /// 接続を受け付けている
   Running,
   /// 新規接続を拒否し、処理中のリクエストの完了を待っている
   ShuttingDown,
   /// 停止済み
   Stopped,
}

/// ライフサイクルのエラー
///
/// いずれもプロセスを継続できない致命的なエラー。
#[derive(Debug, Error)]
pub enum LifecycleError {
   /// 接続の受け付け中に I/O エラーが発生した
   #[error("サーバーが異常終了しました: {0}")]
   Serve(#[from] io::Error),

   /// 受け付けタスクがパニックした
   #[error("サーバータスクが異常終了しました: {0}")]
   Join(#[from] JoinError),

   /// シャットダウンシグナルを受信する前にサーバーが停止した
   #[error("シャットダウンシグナルを受信する前にサーバーが停止しました")]
   UnexpectedStop,

   /// 上限時間内に処理中のリクエストが完了しなかった
   #[error("Graceful shutdown が {0:?} 以内に完了しませんでした")]
   ShutdownTimedOut(Duration),
}

/// サーバーのライフサイクル管理
///
/// 状態は [`watch`] チャネルで公開し、[`Lifecycle::subscribe`] で監視できる。
#[derive(Debug)]
pub struct Lifecycle {
   state:            watch::Sender<LifecycleState>,
   shutdown_timeout: Duration,
}

impl Lifecycle {
   /// `Starting` 状態で作成する
   pub fn new(shutdown_timeout: Duration) -> Self {
      let (state, _) = watch::channel(LifecycleState::Starting);
      Self {
         state,
         shutdown_timeout,
      }
   }

   /// 状態の変化を監視するレシーバーを返す
   pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
      self.state.subscribe()
   }

   /// 現在の状態
   pub fn state(&self) -> LifecycleState {
      *self.state.borrow()
   }

   fn transition(&self, next: LifecycleState) {
      tracing::info!(state = ?next, "ライフサイクル状態が遷移しました");
      self.state.send_replace(next);
   }

   /// サーバーを起動し、`signal` の完了をもってシャットダウンする
   ///
   /// バインド済みの `listener` を受け取る。バインドの失敗は呼び出し元で扱う。
   ///
   /// # 戻り値
   ///
   /// - `Ok(())`: 処理中のリクエストがすべて完了して停止した
   /// - `Err(ShutdownTimedOut)`: 上限時間を過ぎたため強制停止した
   /// - `Err(Serve | Join | UnexpectedStop)`: シグナル受信前にサーバーが停止した
   pub async fn run<F>(
      self,
      listener: TcpListener,
      app: Router,
      signal: F,
   ) -> Result<(), LifecycleError>
   where
      F: Future<Output = ()>,
   {
      let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

      let mut server = tokio::spawn(async move {
         axum::serve(listener, app)
            .with_graceful_shutdown(async move {
               // 送信側が破棄された場合も停止する
               let _ = shutdown_rx.await;
            })
            .await
      });
      self.transition(LifecycleState::Running);

      tokio::select! {
         () = signal => {}
         result = &mut server => {
            self.transition(LifecycleState::Stopped);
            return Err(match result {
               Ok(Ok(())) => LifecycleError::UnexpectedStop,
               Ok(Err(err)) => LifecycleError::Serve(err),
               Err(err) => LifecycleError::Join(err),
            });
         }
      }

      self.transition(LifecycleState::ShuttingDown);
      let _ = shutdown_tx.send(());

      let joined = tokio::time::timeout(self.shutdown_timeout, &mut server).await;
      self.transition(LifecycleState::Stopped);

      match joined {
         Ok(result) => {
            result??;
            tracing::info!("処理中のリクエストがすべて完了しました");
            Ok(())
         }
         Err(_) => {
            server.abort();
            tracing::error!(
               timeout = ?self.shutdown_timeout,
               "シャットダウンがタイムアウトしました。処理中のリクエストを破棄します"
            );
            Err(LifecycleError::ShutdownTimedOut(self.shutdown_timeout))
         }
      }
   }
}

/// OS のシャットダウンシグナルを待つ
///
/// SIGINT（Ctrl+C）、Unix では加えて SIGTERM で完了する。
/// ハンドラの登録に失敗したシグナルは待たない。
pub async fn shutdown_signal() {
   let ctrl_c = async {
      match tokio::signal::ctrl_c().await {
         Ok(()) => tracing::info!("SIGINT を受信しました。Graceful shutdown を開始します"),
         Err(err) => {
            tracing::error!("SIGINT ハンドラの登録に失敗しました: {err}");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(unix)]
   let terminate = async {
      use tokio::signal::unix::{SignalKind, signal};

      match signal(SignalKind::terminate()) {
         Ok(mut sigterm) => {
            sigterm.recv().await;
            tracing::info!("SIGTERM を受信しました。Graceful shutdown を開始します");
         }
         Err(err) => {
            tracing::error!("SIGTERM ハンドラの登録に失敗しました: {err}");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => {}
      () = terminate => {}
   }
}

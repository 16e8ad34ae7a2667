//! # ライフサイクルの結合テスト
//!
//! 実際にポートをバインドしてサーバーを起動し、`reqwest` でリクエストを送る。
//! シャットダウンシグナルは `oneshot` チャネルで代用する。

use std::{
   net::SocketAddr,
   sync::Arc,
   time::{Duration, Instant},
};

use axum::{Router, routing::get};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::{
   net::TcpListener,
   sync::{Notify, oneshot, watch},
   task::JoinHandle,
};
use usersvc_api::{
   app_builder::build_app,
   handler::UserState,
   lifecycle::{Lifecycle, LifecycleError, LifecycleState},
};
use usersvc_infra::repository::InMemoryUserRepository;

struct RunningServer {
   addr:     SocketAddr,
   shutdown: oneshot::Sender<()>,
   handle:   JoinHandle<Result<(), LifecycleError>>,
   state:    watch::Receiver<LifecycleState>,
}

async fn start(app: Router, shutdown_timeout: Duration) -> RunningServer {
   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
   let addr = listener.local_addr().unwrap();

   let lifecycle = Lifecycle::new(shutdown_timeout);
   let mut state = lifecycle.subscribe();
   let (shutdown, rx) = oneshot::channel::<()>();

   let handle = tokio::spawn(lifecycle.run(listener, app, async move {
      let _ = rx.await;
   }));
   state
      .wait_for(|s| *s == LifecycleState::Running)
      .await
      .unwrap();

   RunningServer {
      addr,
      shutdown,
      handle,
      state,
   }
}

/// ハンドラに入ったことを通知してから `delay` だけ待って応答するルーター
fn slow_app(entered: Arc<Notify>, delay: Duration) -> Router {
   Router::new().route(
      "/slow",
      get(move || {
         let entered = Arc::clone(&entered);
         async move {
            entered.notify_one();
            tokio::time::sleep(delay).await;
            "done"
         }
      }),
   )
}

#[tokio::test]
async fn test_処理中のリクエストは完了してから停止する() {
   let entered = Arc::new(Notify::new());
   let server = start(
      slow_app(Arc::clone(&entered), Duration::from_millis(500)),
      Duration::from_secs(5),
   )
   .await;
   let RunningServer {
      addr,
      shutdown,
      handle,
      mut state,
   } = server;

   let url = format!("http://{addr}/slow");
   let request = tokio::spawn(async move { reqwest::get(url).await?.text().await });

   entered.notified().await;
   shutdown.send(()).unwrap();

   // リクエストの処理中は ShuttingDown に留まる
   state
      .wait_for(|s| *s == LifecycleState::ShuttingDown)
      .await
      .unwrap();
   assert!(!request.is_finished());
   assert!(!handle.is_finished());

   handle.await.unwrap().unwrap();
   assert_eq!(request.await.unwrap().unwrap(), "done");
   assert_eq!(*state.borrow(), LifecycleState::Stopped);
}

#[tokio::test]
async fn test_上限時間を過ぎるとタイムアウトエラーで停止する() {
   let entered = Arc::new(Notify::new());
   let server = start(
      slow_app(Arc::clone(&entered), Duration::from_secs(30)),
      Duration::from_millis(200),
   )
   .await;

   let url = format!("http://{}/slow", server.addr);
   let _request = tokio::spawn(async move { reqwest::get(url).await });

   entered.notified().await;
   let started = Instant::now();
   server.shutdown.send(()).unwrap();

   let result = server.handle.await.unwrap();

   assert!(matches!(
      result,
      Err(LifecycleError::ShutdownTimedOut(timeout)) if timeout == Duration::from_millis(200)
   ));
   assert!(started.elapsed() < Duration::from_secs(5));
   assert_eq!(*server.state.borrow(), LifecycleState::Stopped);
}

#[tokio::test]
async fn test_停止後は新しい接続を受け付けない() {
   let server = start(
      Router::new().route("/", get(|| async { "ok" })),
      Duration::from_secs(5),
   )
   .await;
   let url = format!("http://{}/", server.addr);

   assert_eq!(reqwest::get(&url).await.unwrap().text().await.unwrap(), "ok");

   server.shutdown.send(()).unwrap();
   server.handle.await.unwrap().unwrap();

   assert!(reqwest::get(&url).await.is_err());
}

#[tokio::test]
async fn test_実サーバー経由でユーザーを作成して一覧できる() {
   let app = build_app(Arc::new(UserState::new(Arc::new(
      InMemoryUserRepository::new(),
   ))));
   let server = start(app, Duration::from_secs(5)).await;
   let client = reqwest::Client::new();
   let base = format!("http://{}", server.addr);

   let created = client
      .post(format!("{base}/users"))
      .json(&json!({ "name": "Ann", "age": 30 }))
      .send()
      .await
      .unwrap();
   assert_eq!(created.status(), reqwest::StatusCode::CREATED);
   assert_eq!(
      created.json::<Value>().await.unwrap(),
      json!({ "id": 1, "name": "Ann", "age": 30 })
   );

   let listed: Value = client
      .get(format!("{base}/users?min_age=30"))
      .send()
      .await
      .unwrap()
      .json()
      .await
      .unwrap();
   assert_eq!(listed, json!([{ "id": 1, "name": "Ann", "age": 30 }]));

   server.shutdown.send(()).unwrap();
   server.handle.await.unwrap().unwrap();
}

//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。必須の変数はなく、
//! 未設定の場合はデフォルト値を使う。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `API_PORT` | No | `8080` | ポート番号 |
//! | `SHUTDOWN_TIMEOUT_SECS` | No | `5` | Graceful shutdown の待機上限（秒） |
//!
//! ログ関連（`RUST_LOG`, `LOG_FORMAT`）は `usersvc_shared::observability` が読む。

use std::{env, time::Duration};

use thiserror::Error;

/// デフォルトのポート番号
pub const DEFAULT_PORT: u16 = 8080;

/// デフォルトの Graceful shutdown 待機上限
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 値が期待する形式でない
   #[error("環境変数 {name} の値が不正です: {value:?}")]
   InvalidValue { name: &'static str, value: String },
}

/// HTTP サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
   /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
   pub host:             String,
   /// ポート番号
   pub port:             u16,
   /// シャットダウンシグナル受信後、処理中のリクエストを待つ上限
   pub shutdown_timeout: Duration,
}

impl ServerConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の取得関数から設定を組み立てる
   ///
   /// テストでプロセスの環境変数を書き換えずに済むよう分離している。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

      let port = match lookup("API_PORT") {
         Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: "API_PORT",
            value,
         })?,
         None => DEFAULT_PORT,
      };

      let shutdown_timeout = match lookup("SHUTDOWN_TIMEOUT_SECS") {
         Some(value) => value
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidValue {
               name: "SHUTDOWN_TIMEOUT_SECS",
               value,
            })?,
         None => DEFAULT_SHUTDOWN_TIMEOUT,
      };

      Ok(Self {
         host,
         port,
         shutdown_timeout,
      })
   }

   /// `host:port` 形式のバインドアドレス
   pub fn bind_address(&self) -> String {
      format!("{}:{}", self.host, self.port)
   }
}

#[cfg(test)]
mod tests {
   use std::collections::HashMap;

   use pretty_assertions::assert_eq;

   use super::*;

   fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
      let map: HashMap<String, String> = pairs
         .iter()
         .map(|(k, v)| (k.to_string(), v.to_string()))
         .collect();
      move |name| map.get(name).cloned()
   }

   #[test]
   fn test_未設定の場合はデフォルト値を使う() {
      let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

      assert_eq!(
         config,
         ServerConfig {
            host:             "0.0.0.0".to_string(),
            port:             8080,
            shutdown_timeout: Duration::from_secs(5),
         }
      );
      assert_eq!(config.bind_address(), "0.0.0.0:8080");
   }

   #[test]
   fn test_環境変数の値で上書きできる() {
      let config = ServerConfig::from_lookup(lookup_from(&[
         ("API_HOST", "127.0.0.1"),
         ("API_PORT", "3000"),
         ("SHUTDOWN_TIMEOUT_SECS", "10"),
      ]))
      .unwrap();

      assert_eq!(config.host, "127.0.0.1");
      assert_eq!(config.port, 3000);
      assert_eq!(config.shutdown_timeout, Duration::from_secs(10));
   }

   #[test]
   fn test_不正なポート番号はエラーになる() {
      let err = ServerConfig::from_lookup(lookup_from(&[("API_PORT", "99999")])).unwrap_err();

      assert_eq!(
         err,
         ConfigError::InvalidValue {
            name:  "API_PORT",
            value: "99999".to_string(),
         }
      );
   }

   #[test]
   fn test_不正なタイムアウトはエラーになる() {
      let err = ServerConfig::from_lookup(lookup_from(&[("SHUTDOWN_TIMEOUT_SECS", "-1")]))
         .unwrap_err();

      assert!(matches!(
         err,
         ConfigError::InvalidValue {
            name: "SHUTDOWN_TIMEOUT_SECS",
            ..
         }
      ));
   }
}

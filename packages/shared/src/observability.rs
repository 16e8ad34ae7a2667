//! # ログ出力の初期化
//!
//! `tracing-subscriber` のレジストリに `EnvFilter` とフォーマッタを積む。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `RUST_LOG` | [`DEFAULT_LOG_FILTER`] | フィルタ指定 |
//! | `LOG_FORMAT` | `pretty` | `json` または `pretty`（大文字小文字は区別しない） |
//!
//! 不正な値は起動を止めずにデフォルトへ戻す。サブスクライバが立ち上がる前に
//! ログは出せないため、戻した事実は [`LogConfig`] に残して初期化後に警告する。

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` が未設定または不正な場合のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,usersvc=debug,tower_http=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON
    Json,
    /// 端末向けの整形出力
    #[default]
    Pretty,
}

/// `LOG_FORMAT` に未知の値が指定された
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("未知の LOG_FORMAT です: {0:?}")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        })
    }
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format:   LogFormat,
    /// `EnvFilter` のディレクティブ
    pub filter:   String,
    /// デフォルトに戻した `LOG_FORMAT` の値
    pub rejected: Option<UnknownLogFormat>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format:   LogFormat::default(),
            filter:   DEFAULT_LOG_FILTER.to_string(),
            rejected: None,
        }
    }
}

impl LogConfig {
    /// プロセスの環境変数から読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の取得関数から組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = lookup("RUST_LOG").filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }

        if let Some(raw) = lookup("LOG_FORMAT") {
            match raw.parse() {
                Ok(format) => config.format = format,
                Err(err) => config.rejected = Some(err),
            }
        }

        config
    }
}

/// グローバルサブスクライバを登録する
///
/// プロセスで一度だけ呼び出すこと。
pub fn init_tracing(config: &LogConfig) {
    let (env_filter, filter_error) = match EnvFilter::try_new(&config.filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(err)),
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    if let Some(rejected) = &config.rejected {
        tracing::warn!("{rejected}。{} で出力します", config.format);
    }
    if let Some(err) = filter_error {
        tracing::warn!(filter = %config.filter, "RUST_LOG を解釈できません: {err}");
    }
    tracing::debug!(format = %config.format, "ログ出力を初期化しました");
}

//! アプリケーション設定管理モジュール
//! サーバーとセッション管理の設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

/// サーバーの設定を管理する構造体
/// ポート番号、ホスト名、CORS設定などを含む
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub enable_cors: bool,
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            enable_cors: true,
            enable_logging: true,
        }
    }
}

/// ゲームセッションの設定を管理する構造体
/// セッション数制限、タイムアウト、クリーンアップ設定など
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub max_sessions: usize,
    pub session_timeout_minutes: i64,
    pub enable_session_cleanup: bool,
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 100,
            session_timeout_minutes: 30,
            enable_session_cleanup: true,
            cleanup_interval_minutes: 5,
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
/// 各サブシステムの設定をまとめて管理する
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(port) = env::var("SERVER_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::EnvVarError {
                name: "SERVER_PORT".to_string(),
                value: port,
            })?;
        }

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server.host = host;
        }

        if let Ok(max_sessions) = env::var("MAX_SESSIONS") {
            config.session.max_sessions =
                max_sessions.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "MAX_SESSIONS".to_string(),
                    value: max_sessions,
                })?;
        }

        if let Ok(session_timeout) = env::var("SESSION_TIMEOUT_MINUTES") {
            config.session.session_timeout_minutes =
                session_timeout
                    .parse()
                    .map_err(|_| ConfigError::EnvVarError {
                        name: "SESSION_TIMEOUT_MINUTES".to_string(),
                        value: session_timeout,
                    })?;
        }

        if let Ok(enable_cleanup) = env::var("ENABLE_SESSION_CLEANUP") {
            config.session.enable_session_cleanup =
                enable_cleanup
                    .parse()
                    .map_err(|_| ConfigError::EnvVarError {
                        name: "ENABLE_SESSION_CLEANUP".to_string(),
                        value: enable_cleanup,
                    })?;
        }

        Ok(config)
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Ok(file_config) = Self::from_file("config.json") {
            config = file_config;
        } else if let Ok(file_config) = Self::from_file("config/app.json") {
            config = file_config;
        } else if let Ok(file_config) = Self::from_file("/etc/tictactoe/config.json") {
            config = file_config;
        }

        // 環境変数で設定を上書き
        if let Ok(env_config) = Self::from_env() {
            config.server.port = env_config.server.port;
            config.server.host = env_config.server.host;
            config.session.max_sessions = env_config.session.max_sessions;
            config.session.session_timeout_minutes = env_config.session.session_timeout_minutes;
            config.session.enable_session_cleanup = env_config.session.enable_session_cleanup;
        }

        config
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    /// 不正な値がある場合はConfigErrorを返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: self.server.port.to_string(),
            });
        }

        if self.session.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.max_sessions".to_string(),
                value: self.session.max_sessions.to_string(),
            });
        }

        if self.session.enable_session_cleanup && self.session.cleanup_interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.cleanup_interval_minutes".to_string(),
                value: self.session.cleanup_interval_minutes.to_string(),
            });
        }

        Ok(())
    }
}

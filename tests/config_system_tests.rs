//! 設定システム統合テスト

use std::{env, fs};
use tempfile::TempDir;

use TicTacToe::config::{Config, ConfigError, ServerConfig, SessionConfig};

fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            port: 4000,
            host: "127.0.0.1".to_string(),
            enable_cors: false,
            enable_logging: false,
        },
        session: SessionConfig {
            max_sessions: 50,
            session_timeout_minutes: 15,
            enable_session_cleanup: false,
            cleanup_interval_minutes: 10,
        },
    }
}

#[test]
fn test_config_serialization_deserialization() {
    let config = create_test_config();

    let json_str = serde_json::to_string_pretty(&config).unwrap();
    assert!(json_str.contains("4000"));
    assert!(json_str.contains("127.0.0.1"));

    let deserialized: Config = serde_json::from_str(&json_str).unwrap();
    assert_eq!(deserialized.server.port, 4000);
    assert_eq!(deserialized.server.host, "127.0.0.1");
    assert_eq!(deserialized.session.max_sessions, 50);
    assert_eq!(deserialized.session.session_timeout_minutes, 15);
}

#[test]
fn test_config_file_operations() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("test_config.json");

    let original_config = create_test_config();

    // ファイルに保存
    original_config.save_to_file(&config_path).unwrap();
    assert!(config_path.exists());

    // ファイルから読み込み
    let loaded_config = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded_config.server.port, original_config.server.port);
    assert_eq!(
        loaded_config.session.max_sessions,
        original_config.session.max_sessions
    );
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // 有効な設定
    assert!(config.validate().is_ok());

    // 無効なポート
    config.server.port = 0;
    assert!(config.validate().is_err());

    // 無効なセッション数
    config.server.port = 3000;
    config.session.max_sessions = 0;
    assert!(config.validate().is_err());

    // クリーンアップ有効時の無効な間隔
    config.session.max_sessions = 10;
    config.session.cleanup_interval_minutes = 0;
    assert!(config.validate().is_err());

    // クリーンアップ無効なら間隔0でも許容される
    config.session.enable_session_cleanup = false;
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_var_config_loading() {
    env::set_var("SERVER_PORT", "5000");
    env::set_var("SERVER_HOST", "192.168.1.100");
    env::set_var("MAX_SESSIONS", "200");
    env::set_var("SESSION_TIMEOUT_MINUTES", "45");

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.host, "192.168.1.100");
    assert_eq!(config.session.max_sessions, 200);
    assert_eq!(config.session.session_timeout_minutes, 45);

    // 不正な値はEnvVarErrorになる
    env::set_var("SERVER_PORT", "invalid_port");
    let result = Config::from_env();
    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), ConfigError::EnvVarError { .. }));

    env::remove_var("SERVER_PORT");
    env::remove_var("SERVER_HOST");
    env::remove_var("MAX_SESSIONS");
    env::remove_var("SESSION_TIMEOUT_MINUTES");
}

#[test]
fn test_config_error_handling() {
    // 存在しないファイルからの読み込み
    let result = Config::from_file("nonexistent_file.json");
    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), ConfigError::FileReadError(_)));

    // 無効なJSONファイル
    let temp_dir = TempDir::new().unwrap();
    let invalid_json_path = temp_dir.path().join("invalid.json");
    fs::write(&invalid_json_path, "invalid json content").unwrap();

    let result = Config::from_file(&invalid_json_path);
    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
}

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.session.max_sessions, 100);
    assert!(config.session.enable_session_cleanup);
}

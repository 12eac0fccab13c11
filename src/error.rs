//! アプリケーション全体のエラー定義モジュール
//! ゲームロジックとセッション管理のエラーを統一管理。

use thiserror::Error;
use uuid::Uuid;

/// ゲームロジックに関連するエラー
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid move: {reason}")]
    InvalidMove { reason: String },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: Uuid },

    #[error("Game already finished")]
    GameFinished,

    #[error("Invalid step {step}: history has {history_len} entries")]
    InvalidStep { step: usize, history_len: usize },

    #[error("Session limit exceeded: maximum {max} sessions")]
    SessionLimitExceeded { max: usize },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;

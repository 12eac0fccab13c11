//! ゲームセッション管理モジュール
//! 同時にプレイするユーザーのゲームセッションを管理し、
//! セッション数制限、タイムアウト処理、クリーンアップを担当する。

use chrono::{Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{GameError, Result};
use crate::game::GameState;

/// ゲームセッションの管理を行うメイン構造体
/// スレッドセーフなDashMapで同時アクセスを効率的に処理
#[derive(Debug, Clone)]
pub struct GameSessionManager {
    /// アクティブセッションのコレクション
    sessions: Arc<DashMap<Uuid, GameState>>,
    /// 同時存在可能な最大セッション数
    max_sessions: usize,
    /// セッションのタイムアウト時間（分）
    session_timeout_minutes: i64,
}

impl GameSessionManager {
    /// デフォルトタイムアウト（30分）でセッションマネージャーを作成
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            max_sessions,
            session_timeout_minutes: 30,
        }
    }

    /// カスタムタイムアウトでセッションマネージャーを作成
    pub fn with_timeout(max_sessions: usize, timeout_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            max_sessions,
            session_timeout_minutes: timeout_minutes,
        }
    }

    /// 新しいゲームセッションを作成する
    /// 最大セッション数に達している場合はエラーを返す
    pub fn create_session(&self) -> Result<GameState> {
        // セッション数制限をチェック
        if self.sessions.len() >= self.max_sessions {
            return Err(GameError::SessionLimitExceeded {
                max: self.max_sessions,
            });
        }

        let game_state = GameState::new();
        let game_id = game_state.id;

        self.sessions.insert(game_id, game_state.clone());

        Ok(game_state)
    }

    /// 指定したIDのセッションを取得する
    pub fn get_session(&self, game_id: &Uuid) -> Result<GameState> {
        match self.sessions.get(game_id) {
            Some(session) => Ok(session.clone()),
            None => Err(GameError::GameNotFound { game_id: *game_id }),
        }
    }

    /// セッションの状態を更新する
    /// 着手やタイムトラベルの結果を反映するために使用される
    pub fn update_session(&self, session: GameState) -> Result<()> {
        let game_id = session.id;

        match self.sessions.get_mut(&game_id) {
            Some(mut existing_session) => {
                *existing_session = session;
                Ok(())
            }
            None => Err(GameError::GameNotFound { game_id }),
        }
    }

    /// セッションを削除する
    pub fn remove_session(&self, game_id: &Uuid) -> Result<GameState> {
        match self.sessions.remove(game_id) {
            Some((_, session)) => Ok(session),
            None => Err(GameError::GameNotFound { game_id: *game_id }),
        }
    }

    /// 全アクティブセッションの一覧を取得する
    pub fn list_sessions(&self) -> Vec<GameState> {
        self.sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// 現在のセッション数を取得する
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// タイムアウトしたセッションを削除する
    /// 最終更新時刻がカットオフより古いセッションが対象
    pub async fn cleanup_inactive_sessions(&self) -> usize {
        let cutoff_time = Utc::now() - Duration::minutes(self.session_timeout_minutes);
        let mut removed_count = 0;

        let expired_ids: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().last_updated < cutoff_time)
            .map(|entry| *entry.key())
            .collect();

        for game_id in expired_ids {
            if self.sessions.remove(&game_id).is_some() {
                removed_count += 1;
            }
        }

        removed_count
    }

    /// 指定したIDのセッションが存在するかチェックする
    pub fn session_exists(&self, game_id: &Uuid) -> bool {
        self.sessions.contains_key(game_id)
    }

    /// セッション全体の統計情報を取得する
    pub fn get_stats(&self) -> SessionStats {
        let total_sessions = self.sessions.len();
        let terminal_count = self
            .sessions
            .iter()
            .filter(|entry| entry.value().is_terminal())
            .count();

        SessionStats {
            total_sessions,
            max_sessions: self.max_sessions,
            in_progress_count: total_sessions - terminal_count,
            terminal_count,
        }
    }
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new(100)
    }
}

/// セッション統計情報
#[derive(Debug)]
pub struct SessionStats {
    pub total_sessions: usize,
    pub max_sessions: usize,
    pub in_progress_count: usize,
    pub terminal_count: usize,
}

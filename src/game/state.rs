//! ゲーム状態管理モジュール
//! 三目並べの追記専用履歴、現在ステップのポインタ、
//! 手番の導出とタイムトラベル操作を管理する。

use super::board::Board;
use super::rules::{TicTacToeRules, WinLine};
use super::types::{HistoryEntry, Player};
use crate::error::{GameError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ゲームの進行状態を表すenum
/// 履歴とポインタから毎回導出され、保存はされない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// ゲーム進行中（次の手番を記録）
    InProgress { next_player: Player },
    /// 勝利ライン成立（勝者とラインを記録）
    Won { winner: Player, line: [usize; 3] },
    /// 引き分け（9手目まで到達し勝者なし）
    Draw,
}

/// 三目並べゲームの全体状態を保持する構造体
/// 追記専用の履歴と現在表示中のステップを指すポインタを含む。
/// 履歴の先頭は常に空盤面で、巻き戻しはポインタの移動のみで行う。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub id: Uuid,
    history: Vec<HistoryEntry>,
    current_step: usize,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl GameState {
    /// 新しいゲーム状態を作成する
    /// 初期状態：空盤面1件のみの履歴、ポインタ0、Xの手番
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            history: vec![HistoryEntry::initial()],
            current_step: 0,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    /// 指定IDで新しいゲーム状態を作成する
    /// テストや特定のIDが必要な場合に使用
    pub fn new_with_id(id: Uuid) -> Self {
        Self {
            id,
            ..Self::new()
        }
    }

    /// 履歴全体を取得する
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// 現在のポインタ位置を取得する
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// 現在のポインタ位置の盤面を取得する
    pub fn current_board(&self) -> &Board {
        &self.history[self.current_step].board
    }

    /// 次に着手するプレイヤーを手数の偶奇から導出する
    /// 偶数ステップならX、奇数ステップならO
    pub fn next_player(&self) -> Player {
        if self.current_step % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// これまでの着手数（初期レコードを除く履歴長）を取得する
    pub fn move_count(&self) -> usize {
        self.history.len() - 1
    }

    /// ポインタより先の履歴を破棄する
    /// 巻き戻し後の新規着手で別の未来を捨てるために使用される
    pub fn truncate_future(&mut self) {
        self.history.truncate(self.current_step + 1);
    }

    /// 履歴に新しいレコードを追記し、ポインタを末尾に進める
    pub fn push_entry(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        self.current_step = self.history.len() - 1;
        self.last_updated = Utc::now();
    }

    /// ポインタを指定ステップに移動する（タイムトラベル）
    /// 履歴は変更されず、手番はステップの偶奇から再導出される。
    /// 範囲外のステップは状態を変更せずにエラーを返す。
    pub fn jump_to(&mut self, step: usize) -> Result<()> {
        if step >= self.history.len() {
            return Err(GameError::InvalidStep {
                step,
                history_len: self.history.len(),
            });
        }

        self.current_step = step;
        self.last_updated = Utc::now();
        Ok(())
    }

    /// 現在のポインタ位置の勝利ラインを取得する
    pub fn winning_line(&self) -> Option<WinLine> {
        TicTacToeRules::calculate_winner(self.current_board())
    }

    /// 現在の進行状態を導出する
    /// 勝者がいれば勝利、ポインタが9手目で勝者なしなら引き分け、
    /// それ以外は進行中として次の手番を返す
    pub fn status(&self) -> GameStatus {
        if let Some(win) = self.winning_line() {
            return GameStatus::Won {
                winner: win.winner,
                line: win.line,
            };
        }

        if self.current_step == 9 {
            return GameStatus::Draw;
        }

        GameStatus::InProgress {
            next_player: self.next_player(),
        }
    }

    /// ゲームが終了状態（勝利または引き分け）かチェックする
    /// jump_toによる巻き戻しでは再び進行中に戻りうる
    pub fn is_terminal(&self) -> bool {
        !matches!(self.status(), GameStatus::InProgress { .. })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

//! ゲームの基本型定義モジュール
//! 三目並べゲームで使用される基本的な型とenum、構造体を定義する。

use serde::{Deserialize, Serialize};

/// 盤面の各マスの状態を表現するenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

/// ゲームのプレイヤー（マーク）を表すenum
/// 先手はX、後手はO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// 相手プレイヤーを返す
    pub fn opposite(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// プレイヤーを対応するセル状態に変換する
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// 表示用のマーク文字を返す
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// 3x3盤面上のマス位置を表す構造体
/// 行優先の0-8のインデックスで有効
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub index: usize,
}

impl Position {
    /// 範囲チェック付きのコンストラクタ
    /// 3x3盤面の範囲外のインデックスの場合はNoneを返す
    pub fn new(index: usize) -> Option<Position> {
        if index < 9 {
            Some(Position { index })
        } else {
            None
        }
    }

    /// インデックスが有効範囲内かチェックする
    pub fn is_valid(&self) -> bool {
        self.index < 9
    }

    /// 表示用の1始まり列番号を返す（列 = index % 3 + 1）
    pub fn col(&self) -> usize {
        self.index % 3 + 1
    }

    /// 表示用の1始まり行番号を返す（行 = index / 3 + 1）
    pub fn row(&self) -> usize {
        self.index / 3 + 1
    }
}

/// 履歴の1レコードを表現する構造体
/// 着手後の盤面スナップショットと着手位置、マーク、タイムスタンプを保持する。
/// 初期レコード（空盤面）はpositionとmarkがNoneになる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub board: super::board::Board,
    pub position: Option<Position>,
    pub mark: Option<Player>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HistoryEntry {
    /// 着手レコードを作成する
    /// タイムスタンプは現在時刻で自動設定される
    pub fn new(board: super::board::Board, position: Position, mark: Player) -> Self {
        Self {
            board,
            position: Some(position),
            mark: Some(mark),
            timestamp: chrono::Utc::now(),
        }
    }

    /// ゲーム開始時の初期レコード（空盤面、着手なし）を作成する
    pub fn initial() -> Self {
        Self {
            board: super::board::Board::new(),
            position: None,
            mark: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

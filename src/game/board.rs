//! 三目並べの盤面状態を管理するモジュール
//! 3x3グリッド（行優先9マス）の盤面とマークの配置、操作を担当する。

use super::types::{Cell, Position};
use serde::{Deserialize, Serialize};

/// 3x3三目並べ盤面を表現する構造体
/// 行優先9要素の配列で各マスのCell状態を保持し、盤面操作を提供する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// 新しい空の盤面を作成する
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// 指定した位置のセル状態を取得する
    /// 範囲外の場合はNoneを返す
    pub fn get_cell(&self, position: Position) -> Option<Cell> {
        if position.is_valid() {
            Some(self.cells[position.index])
        } else {
            None
        }
    }

    /// 指定した位置にセル状態を設定する
    /// 範囲外の場合はfalseを返す
    pub fn set_cell(&mut self, position: Position, cell: Cell) -> bool {
        if position.is_valid() {
            self.cells[position.index] = cell;
            true
        } else {
            false
        }
    }

    /// 指定した位置が空かチェックする
    pub fn is_empty(&self, position: Position) -> bool {
        matches!(self.get_cell(position), Some(Cell::Empty))
    }

    /// 全マスが空かチェックする
    pub fn is_all_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Cell::Empty)
    }

    /// 全マスが埋まっているかチェックする
    /// 引き分け判定の材料として使用される
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// 盤面上のXとOのマーク数を数える
    /// 戻り値: (X数, O数)
    pub fn count_marks(&self) -> (u8, u8) {
        let mut x_count = 0;
        let mut o_count = 0;

        for &cell in &self.cells {
            match cell {
                Cell::X => x_count += 1,
                Cell::O => o_count += 1,
                Cell::Empty => {}
            }
        }

        (x_count, o_count)
    }

    /// デバッグ用の盤面表示文字列を生成する
    /// XとOのマーク、.で空マスを表現
    pub fn display(&self) -> String {
        let mut result = String::new();
        result.push_str("  1 2 3\n");

        // 各行を処理して表示文字列を構築
        for row in 0..3 {
            result.push_str(&format!("{} ", row + 1));
            // 各セルをシンボルに変換
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Cell::Empty => ".",
                    Cell::X => "X",
                    Cell::O => "O",
                };
                result.push_str(&format!("{} ", symbol));
            }
            result.push('\n');
        }

        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

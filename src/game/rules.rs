//! 三目並べのルールとゲームロジック実装モジュール
//! 勝利ライン判定、着手の適用、履歴の分岐破棄処理などを担当する。

use super::board::Board;
use super::state::GameState;
use super::types::{Cell, HistoryEntry, Player, Position};
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// 8本の固定勝利ライン（行3本、列3本、斜め2本）
/// 複数ラインが同時に成立した場合はこの順序の先頭が優先される
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 勝利判定の結果を表現する構造体
/// 勝者のマークと成立した3マスのラインを保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    pub winner: Player,
    pub line: [usize; 3],
}

/// 三目並べのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct TicTacToeRules;

impl TicTacToeRules {
    /// 盤面から勝者を判定する純粋関数
    /// 8本の固定ラインを順にチェックし、3マスが同一の非空マークで
    /// 揃った最初のラインを返す。勝者がいなければNoneを返す。
    pub fn calculate_winner(board: &Board) -> Option<WinLine> {
        for line in WINNING_LINES {
            let [a, b, c] = line;
            let cell_a = board.get_cell(Position { index: a })?;

            if cell_a == Cell::Empty {
                continue;
            }

            if board.get_cell(Position { index: b }) == Some(cell_a)
                && board.get_cell(Position { index: c }) == Some(cell_a)
            {
                let winner = match cell_a {
                    Cell::X => Player::X,
                    Cell::O => Player::O,
                    Cell::Empty => unreachable!(),
                };
                return Some(WinLine { winner, line });
            }
        }

        None
    }

    /// 指定した位置に着手できるかチェックする
    /// 対象マスが空である必要がある
    pub fn is_valid_move(board: &Board, position: Position) -> bool {
        board.is_empty(position)
    }

    /// 現在のポインタ位置の盤面に対して着手を適用する
    ///
    /// ポインタ位置の盤面に勝者がいる場合、または対象マスが占有済みの
    /// 場合は状態を変更せずにエラーを返す。成功時はポインタより先の
    /// 履歴を破棄（分岐破棄）した上で新しいレコードを追記し、
    /// ポインタを末尾に進める。マークは手数の偶奇から決まる。
    pub fn apply_move(game_state: &mut GameState, position: Position) -> Result<()> {
        let current_board = game_state.current_board().clone();

        if Self::calculate_winner(&current_board).is_some() {
            return Err(GameError::GameFinished);
        }

        if !Self::is_valid_move(&current_board, position) {
            return Err(GameError::InvalidMove {
                reason: format!("Cell {} is already occupied", position.index),
            });
        }

        let mark = game_state.next_player();
        let mut board = current_board;
        board.set_cell(position, mark.to_cell());

        // 巻き戻し後の着手は別の未来を破棄してから追記する
        game_state.truncate_future();
        game_state.push_entry(HistoryEntry::new(board, position, mark));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: [(usize, Cell); 3]) -> Board {
        let mut board = Board::new();
        for (index, cell) in marks {
            board.set_cell(Position::new(index).unwrap(), cell);
        }
        board
    }

    #[test]
    fn test_calculate_winner_empty_board() {
        let board = Board::new();
        assert_eq!(TicTacToeRules::calculate_winner(&board), None);
    }

    #[test]
    fn test_calculate_winner_rows() {
        for row in 0..3 {
            let base = row * 3;
            let board = board_from([
                (base, Cell::X),
                (base + 1, Cell::X),
                (base + 2, Cell::X),
            ]);

            let result = TicTacToeRules::calculate_winner(&board).unwrap();
            assert_eq!(result.winner, Player::X);
            assert_eq!(result.line, [base, base + 1, base + 2]);
        }
    }

    #[test]
    fn test_calculate_winner_columns() {
        for col in 0..3 {
            let board = board_from([
                (col, Cell::O),
                (col + 3, Cell::O),
                (col + 6, Cell::O),
            ]);

            let result = TicTacToeRules::calculate_winner(&board).unwrap();
            assert_eq!(result.winner, Player::O);
            assert_eq!(result.line, [col, col + 3, col + 6]);
        }
    }

    #[test]
    fn test_calculate_winner_diagonals() {
        let board = board_from([(0, Cell::X), (4, Cell::X), (8, Cell::X)]);
        let result = TicTacToeRules::calculate_winner(&board).unwrap();
        assert_eq!(result.winner, Player::X);
        assert_eq!(result.line, [0, 4, 8]);

        let board = board_from([(2, Cell::O), (4, Cell::O), (6, Cell::O)]);
        let result = TicTacToeRules::calculate_winner(&board).unwrap();
        assert_eq!(result.winner, Player::O);
        assert_eq!(result.line, [2, 4, 6]);
    }

    #[test]
    fn test_calculate_winner_no_line_full_board() {
        // X O X / X O O / O X X -> 引き分け盤面
        let mut board = Board::new();
        let cells = [
            Cell::X,
            Cell::O,
            Cell::X,
            Cell::X,
            Cell::O,
            Cell::O,
            Cell::O,
            Cell::X,
            Cell::X,
        ];
        for (index, cell) in cells.into_iter().enumerate() {
            board.set_cell(Position::new(index).unwrap(), cell);
        }

        assert!(board.is_full());
        assert_eq!(TicTacToeRules::calculate_winner(&board), None);
    }

    #[test]
    fn test_calculate_winner_multiple_lines_first_match() {
        // X X X / . . . / X . X + 左列 X X X は到達不能だが
        // 同時成立時は固定順序の先頭ラインを返す
        let mut board = Board::new();
        for index in [0, 1, 2, 3, 6] {
            board.set_cell(Position::new(index).unwrap(), Cell::X);
        }

        let result = TicTacToeRules::calculate_winner(&board).unwrap();
        assert_eq!(result.line, [0, 1, 2]);
    }

    #[test]
    fn test_is_valid_move() {
        let mut board = Board::new();
        let pos = Position::new(4).unwrap();

        assert!(TicTacToeRules::is_valid_move(&board, pos));
        board.set_cell(pos, Cell::X);
        assert!(!TicTacToeRules::is_valid_move(&board, pos));
    }

    #[test]
    fn test_apply_move() {
        let mut game_state = GameState::new();
        let position = Position::new(4).unwrap();

        let result = TicTacToeRules::apply_move(&mut game_state, position);
        assert!(result.is_ok());

        assert_eq!(game_state.current_board().get_cell(position), Some(Cell::X));
        assert_eq!(game_state.current_step(), 1);
        assert_eq!(game_state.next_player(), Player::O);
    }

    #[test]
    fn test_apply_move_occupied_cell() {
        let mut game_state = GameState::new();
        let position = Position::new(0).unwrap();

        TicTacToeRules::apply_move(&mut game_state, position).unwrap();
        let history_len = game_state.history().len();

        let result = TicTacToeRules::apply_move(&mut game_state, position);
        assert!(result.is_err());

        if let Err(GameError::InvalidMove { reason }) = result {
            assert!(reason.contains("occupied"));
        } else {
            panic!("Expected InvalidMove error");
        }

        // State must be unchanged after a rejected move
        assert_eq!(game_state.history().len(), history_len);
        assert_eq!(game_state.current_step(), 1);
    }

    #[test]
    fn test_apply_move_after_win() {
        let mut game_state = GameState::new();

        // X: 0, 1, 2 / O: 4, 7 -> X wins with the top row
        for index in [0, 4, 1, 7, 2] {
            TicTacToeRules::apply_move(&mut game_state, Position::new(index).unwrap()).unwrap();
        }

        let history_len = game_state.history().len();
        let step = game_state.current_step();

        let result = TicTacToeRules::apply_move(&mut game_state, Position::new(5).unwrap());
        assert!(matches!(result, Err(GameError::GameFinished)));
        assert_eq!(game_state.history().len(), history_len);
        assert_eq!(game_state.current_step(), step);
    }

    #[test]
    fn test_apply_move_alternates_marks() {
        let mut game_state = GameState::new();

        TicTacToeRules::apply_move(&mut game_state, Position::new(0).unwrap()).unwrap();
        TicTacToeRules::apply_move(&mut game_state, Position::new(1).unwrap()).unwrap();

        let history = game_state.history();
        assert_eq!(history[1].mark, Some(Player::X));
        assert_eq!(history[2].mark, Some(Player::O));
    }

    #[test]
    fn test_apply_move_branch_and_discard() {
        let mut game_state = GameState::new();

        for index in [0, 4, 1] {
            TicTacToeRules::apply_move(&mut game_state, Position::new(index).unwrap()).unwrap();
        }
        assert_eq!(game_state.history().len(), 4);

        // Rewind to step 1 and play a different move
        game_state.jump_to(1).unwrap();
        TicTacToeRules::apply_move(&mut game_state, Position::new(8).unwrap()).unwrap();

        // History beyond the rewind point is discarded
        assert_eq!(game_state.history().len(), 3);
        assert_eq!(game_state.current_step(), 2);
        assert_eq!(
            game_state.history()[2].position,
            Some(Position::new(8).unwrap())
        );
        assert_eq!(game_state.history()[2].mark, Some(Player::O));
    }
}

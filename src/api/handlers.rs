use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::GameError,
    game::{Cell, GameState, GameStatus, Player, Position, TicTacToeRules},
    session::GameSessionManager,
};

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub id: Uuid,
    pub board: [u8; 9],              // 0: Empty, 1: X, 2: O
    pub current_step: usize,
    pub move_count: u32,
    pub next_player: u8,             // 1: X, 2: O
    pub game_status: String,
    pub winning_line: Option<[usize; 3]>,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub success: bool,
    pub game_state: GameResponse,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoveRecordResponse {
    pub step: usize,
    pub index: Option<usize>,
    pub col: Option<usize>,
    pub row: Option<usize>,
    pub mark: Option<char>,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub moves: Vec<MoveRecordResponse>,
    pub total_moves: u32,
    pub current_step: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MakeMoveRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub step: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub sessions: Arc<GameSessionManager>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(GameSessionManager::new(100)),
        }
    }

    pub fn new_with_manager(sessions: Arc<GameSessionManager>) -> Self {
        Self { sessions }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameResponse {
    pub fn from_game_state(game_state: &GameState) -> Self {
        let mut board = [0u8; 9];
        for index in 0..9 {
            if let Some(position) = Position::new(index) {
                if let Some(cell) = game_state.current_board().get_cell(position) {
                    board[index] = match cell {
                        Cell::Empty => 0,
                        Cell::X => 1,
                        Cell::O => 2,
                    };
                }
            }
        }

        let (game_status, winning_line) = match game_state.status() {
            GameStatus::InProgress { .. } => ("in_progress".to_string(), None),
            GameStatus::Draw => ("finished_draw".to_string(), None),
            GameStatus::Won { winner, line } => {
                let status = match winner {
                    Player::X => "finished_x_wins",
                    Player::O => "finished_o_wins",
                };
                (status.to_string(), Some(line))
            }
        };

        Self {
            id: game_state.id,
            board,
            current_step: game_state.current_step(),
            move_count: game_state.move_count() as u32,
            next_player: match game_state.next_player() {
                Player::X => 1,
                Player::O => 2,
            },
            game_status,
            winning_line,
        }
    }
}

impl MoveRecordResponse {
    /// 履歴レコードを着手一覧の表示用レコードに変換する
    /// ラベルは「Go to game start」または「Go to move #N [列-行-マーク]」形式
    pub fn from_history_entry(step: usize, entry: &crate::game::HistoryEntry) -> Self {
        let label = match (entry.position, entry.mark) {
            (Some(position), Some(mark)) => format!(
                "Go to move #{} [{}-{}-{}]",
                step,
                position.col(),
                position.row(),
                mark.symbol()
            ),
            _ => "Go to game start".to_string(),
        };

        Self {
            step,
            index: entry.position.map(|p| p.index),
            col: entry.position.map(|p| p.col()),
            row: entry.position.map(|p| p.row()),
            mark: entry.mark.map(|m| m.symbol()),
            label,
        }
    }
}

fn game_not_found(game_id: Uuid) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Game not found".to_string(),
            details: Some(format!("No game with ID {}", game_id)),
        }),
    )
}

pub async fn create_game(
    State(state): State<AppState>,
) -> std::result::Result<(StatusCode, Json<GameResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.sessions.create_session() {
        Ok(game_state) => {
            let response = GameResponse::from_game_state(&game_state);
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Could not create game".to_string(),
                details: Some(e.to_string()),
            }),
        )),
    }
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> std::result::Result<Json<GameResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.sessions.get_session(&game_id) {
        Ok(game_state) => {
            let response = GameResponse::from_game_state(&game_state);
            Ok(Json(response))
        }
        Err(_) => Err(game_not_found(game_id)),
    }
}

pub async fn make_move(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<MakeMoveRequest>,
) -> std::result::Result<Json<MoveResponse>, (StatusCode, Json<ErrorResponse>)> {
    let position = match Position::new(payload.index) {
        Some(pos) => pos,
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid position".to_string(),
                    details: Some(format!("Index {} is out of bounds", payload.index)),
                }),
            ));
        }
    };

    let mut game_state = match state.sessions.get_session(&game_id) {
        Ok(game_state) => game_state,
        Err(_) => return Err(game_not_found(game_id)),
    };

    match TicTacToeRules::apply_move(&mut game_state, position) {
        Ok(()) => {
            state
                .sessions
                .update_session(game_state.clone())
                .map_err(|_| game_not_found(game_id))?;

            let response = MoveResponse {
                success: true,
                game_state: GameResponse::from_game_state(&game_state),
                message: None,
            };

            Ok(Json(response))
        }
        Err(e) => {
            let error_msg = match e {
                GameError::InvalidMove { reason } => reason,
                GameError::GameFinished => "Game is already finished".to_string(),
                _ => "Move failed".to_string(),
            };

            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: error_msg,
                    details: None,
                }),
            ))
        }
    }
}

pub async fn jump_to_step(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<JumpRequest>,
) -> std::result::Result<Json<MoveResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut game_state = match state.sessions.get_session(&game_id) {
        Ok(game_state) => game_state,
        Err(_) => return Err(game_not_found(game_id)),
    };

    match game_state.jump_to(payload.step) {
        Ok(()) => {
            state
                .sessions
                .update_session(game_state.clone())
                .map_err(|_| game_not_found(game_id))?;

            let response = MoveResponse {
                success: true,
                game_state: GameResponse::from_game_state(&game_state),
                message: Some(format!("Jumped to step {}", payload.step)),
            };

            Ok(Json(response))
        }
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid step".to_string(),
                details: Some(e.to_string()),
            }),
        )),
    }
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> std::result::Result<Json<HistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let game_state = match state.sessions.get_session(&game_id) {
        Ok(game_state) => game_state,
        Err(_) => return Err(game_not_found(game_id)),
    };

    let moves = game_state
        .history()
        .iter()
        .enumerate()
        .map(|(step, entry)| MoveRecordResponse::from_history_entry(step, entry))
        .collect();

    let response = HistoryResponse {
        moves,
        total_moves: game_state.move_count() as u32,
        current_step: game_state.current_step(),
    };

    Ok(Json(response))
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> std::result::Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.sessions.remove_session(&game_id) {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(_) => Err(game_not_found(game_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_response_conversion() {
        let game_state = GameState::new();
        let response = GameResponse::from_game_state(&game_state);

        assert_eq!(response.id, game_state.id);
        assert_eq!(response.next_player, 1); // X
        assert_eq!(response.board, [0u8; 9]);
        assert_eq!(response.game_status, "in_progress");
        assert_eq!(response.current_step, 0);
        assert_eq!(response.winning_line, None);
    }

    #[test]
    fn test_game_response_with_winner() {
        let mut game_state = GameState::new();
        for index in [0, 4, 1, 7, 2] {
            TicTacToeRules::apply_move(&mut game_state, Position::new(index).unwrap()).unwrap();
        }

        let response = GameResponse::from_game_state(&game_state);
        assert_eq!(response.game_status, "finished_x_wins");
        assert_eq!(response.winning_line, Some([0, 1, 2]));
        assert_eq!(response.board[0], 1);
        assert_eq!(response.board[4], 2);
    }

    #[test]
    fn test_move_record_labels() {
        let mut game_state = GameState::new();
        TicTacToeRules::apply_move(&mut game_state, Position::new(5).unwrap()).unwrap();

        let start = MoveRecordResponse::from_history_entry(0, &game_state.history()[0]);
        assert_eq!(start.label, "Go to game start");
        assert_eq!(start.index, None);

        // index 5 = col 3, row 2
        let first = MoveRecordResponse::from_history_entry(1, &game_state.history()[1]);
        assert_eq!(first.label, "Go to move #1 [3-2-X]");
        assert_eq!(first.col, Some(3));
        assert_eq!(first.row, Some(2));
        assert_eq!(first.mark, Some('X'));
    }
}

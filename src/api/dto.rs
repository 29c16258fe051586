use serde::{Deserialize, Serialize};

use crate::domain::{GameId, LotoCard, Money, PlayerId, RowType, Timestamp};
use crate::engine::event_log::EventKind;
use crate::engine::session::GameStatus;

/// DTO игрока реестра.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: PlayerId,
    pub name: String,
    pub balance: Money,
    pub created_at: Timestamp,
}

/// DTO игрока в рамках сессии: состояние плюс разрешённое имя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayerDto {
    pub player_id: PlayerId,
    pub name: String,
    pub card: LotoCard,
    pub collected_rows: Vec<RowType>,
    pub contributions: Money,
}

/// DTO записи журнала событий.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntryDto {
    pub timestamp: Timestamp,
    pub kind: EventKind,
    pub player_name: Option<String>,
    pub description: String,
    pub amount: Option<Money>,
}

/// DTO игровой сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameViewDto {
    pub game_id: GameId,
    pub status: GameStatus,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub start_bet: Money,
    pub bank: Money,
    pub final_bank: Option<Money>,
    pub players: Vec<GamePlayerDto>,
    pub event_log: Vec<EventLogEntryDto>,
    /// Сколько шагов сейчас можно отменить.
    pub undo_depth: usize,
}

/// DTO сводных показателей игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsDto {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub earnings: Money,
}

/// DTO состояния текущей игры для панели статистики.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameStatsDto {
    pub game_id: GameId,
    pub start_date: Timestamp,
    pub start_bet: Money,
    pub bank: Money,
    pub players: Vec<GamePlayerDto>,
}

use serde::{Deserialize, Serialize};

use crate::domain::{GameId, LotoCard, Money, PlayerId, RowType, Timestamp};
use crate::engine::event_log::EventLog;
use crate::engine::snapshot::UndoStack;

/// Статус игровой сессии. Единственный переход: Active → Finished
/// (через сбор нижнего ряда); обратно — только восстановлением из снапшота.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Finished,
}

/// Состояние игрока в рамках одной сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayerState {
    /// Ссылка на игрока реестра, не владение.
    pub player_id: PlayerId,
    pub card: LotoCard,
    /// Верхний/средний ряд могут встречаться несколько раз: проверки
    /// на дубликат нет ни у Top, ни у Middle. У Bottom — есть.
    pub collected_rows: Vec<RowType>,
    /// Сколько всего игрок внёс в банк с начала игры.
    /// Аудитное поле, не единственный источник истины для `bank`.
    pub contributions: Money,
}

impl GamePlayerState {
    pub fn new(player_id: PlayerId, card: LotoCard, start_bet: Money) -> Self {
        Self {
            player_id,
            card,
            collected_rows: Vec::new(),
            contributions: start_bet,
        }
    }

    pub fn has_collected(&self, row: RowType) -> bool {
        self.collected_rows.contains(&row)
    }
}

/// Игровая сессия: банк, игроки, журнал, история undo.
///
/// После перехода в Finished сессия больше не изменяется движком
/// (её читает только статистика), за одним исключением: undo может
/// вернуть её в Active, восстановив снапшот.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: GameId,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub start_bet: Money,
    /// Неотрицателен, пока игра активна; ровно 0 после завершения.
    pub bank: Money,
    pub players: Vec<GamePlayerState>,
    pub status: GameStatus,
    /// Банк на момент завершения (фиксируется перед обнулением).
    #[serde(default)]
    pub final_bank: Option<Money>,
    pub event_log: EventLog,
    /// У старых сохранений истории может не быть — инициализируем пустой.
    #[serde(default)]
    pub history: UndoStack,
}

impl GameSession {
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn player_state(&self, id: &str) -> Option<&GamePlayerState> {
        self.players.iter().find(|p| p.player_id == id)
    }

    pub fn player_state_mut(&mut self, id: &str) -> Option<&mut GamePlayerState> {
        self.players.iter_mut().find(|p| p.player_id == id)
    }

    /// Сумма взносов всех игроков сессии.
    pub fn contributions_total(&self) -> Money {
        self.players.iter().map(|p| p.contributions).sum()
    }
}

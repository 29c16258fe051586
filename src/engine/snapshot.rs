use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Money, PlayerId, Timestamp};
use crate::engine::session::{GamePlayerState, GameStatus};

/// Сколько снапшотов держим в истории undo.
pub const MAX_ACTION_HISTORY: usize = 50;

/// Снимок состояния перед мутацией: ровно столько, сколько нужно,
/// чтобы точно отменить одно действие.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub bank: Money,
    /// Глубокая копия игроков сессии.
    pub players: Vec<GamePlayerState>,
    /// Балансы игроков сессии на момент снимка (свежие из реестра;
    /// игроки, не найденные в реестре, в снимок не попадают).
    pub player_balances: HashMap<PlayerId, Money>,
    pub status: GameStatus,
    pub end_date: Option<Timestamp>,
    /// Длина журнала событий на момент снимка — для защищённого удаления.
    pub event_log_length: usize,
}

/// Ограниченный стек снапшотов: при переполнении вытесняется старейший.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UndoStack {
    snapshots: Vec<Snapshot>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
        if self.snapshots.len() > MAX_ACTION_HISTORY {
            self.snapshots.remove(0);
        }
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

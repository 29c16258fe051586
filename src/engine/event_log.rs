use serde::{Deserialize, Serialize};

use crate::domain::{Money, PlayerId, RowType, Timestamp};

/// Тип записи журнала.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Игра началась.
    Start,
    /// Собран верхний ряд.
    Top,
    /// Собран средний ряд.
    Middle,
    /// Собран нижний ряд (игра завершена).
    Bottom,
}

impl EventKind {
    pub fn from_row(row: RowType) -> EventKind {
        match row {
            RowType::Top => EventKind::Top,
            RowType::Middle => EventKind::Middle,
            RowType::Bottom => EventKind::Bottom,
        }
    }

    /// Относится ли запись к сбору ряда (а не к старту игры).
    pub fn is_row_collection(self) -> bool {
        matches!(self, EventKind::Top | EventKind::Middle | EventKind::Bottom)
    }
}

/// Классификация движения денег в записи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TopCollected,
    Withdrawal,
}

/// Одна запись журнала. Записи никогда не изменяются и не переупорядочиваются.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub player_id: Option<PlayerId>,
    /// Имя игрока на момент события (денормализованный снимок).
    pub player_name: Option<String>,
    pub description: String,
    pub amount: Option<Money>,
    pub action_type: Option<ActionType>,
}

/// Журнал событий: растёт только в конец; укорачивается не больше чем
/// на одну запись за успешный undo, и только через защищённое удаление.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EventLog {
    entries: Vec<EventLogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: EventLogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&EventLogEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[EventLogEntry] {
        &self.entries
    }

    /// Убрать последнюю запись, только если журнал длиннее зафиксированной
    /// в снапшоте длины. Защита от двойного удаления.
    pub fn truncate_last_if_longer(&mut self, recorded_len: usize) -> bool {
        if self.entries.len() > recorded_len {
            self.entries.pop();
            true
        } else {
            false
        }
    }
}

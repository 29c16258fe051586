use serde::{Deserialize, Serialize};

use crate::domain::{Money, PlayerId, Timestamp};

/// Профиль игрока. Владеет им реестр (`PlayerLedger`);
/// сессии ссылаются на игрока только по id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Баланс знаковый: долги представимы, нижней границы нет.
    pub balance: Money,
    pub created_at: Timestamp,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, balance: Money, created_at: Timestamp) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            created_at,
        }
    }
}

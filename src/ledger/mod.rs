//! Реестр игроков: владеет профилями и балансами.
//!
//! Обычный геймплей двигает балансы только дельтами (`credit`);
//! точная установка значения (`set_balance`) нужна исключительно
//! механизму отмены, чтобы восстановить состояние бит-в-бит.

use thiserror::Error;

use crate::domain::{Money, Player, PlayerId, Timestamp};

/// Результат операции над конкретным игроком.
///
/// `Skipped` — игрок не найден в реестре. Это явный результат вместо
/// тихого no-op: вызывающий код и тесты могут на него опираться.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerOutcome {
    Applied,
    Skipped,
}

impl LedgerOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, LedgerOutcome::Applied)
    }
}

/// Ошибки реестра.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Игрок с именем «{0}» уже существует")]
    DuplicateName(String),

    #[error("Игрок {0} не найден")]
    PlayerNotFound(PlayerId),
}

/// Реестр игроков.
#[derive(Clone, Debug, Default)]
pub struct PlayerLedger {
    players: Vec<Player>,
}

impl PlayerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn balance(&self, id: &str) -> Option<Money> {
        self.player(id).map(|p| p.balance)
    }

    /// Добавить игрока. Имена уникальны без учёта регистра.
    pub fn add_player(
        &mut self,
        id: PlayerId,
        name: &str,
        balance: Money,
        created_at: Timestamp,
    ) -> Result<&Player, LedgerError> {
        let trimmed = name.trim();
        if self.name_taken(trimmed, None) {
            return Err(LedgerError::DuplicateName(trimmed.to_string()));
        }

        let idx = self.players.len();
        self.players.push(Player::new(id, trimmed, balance, created_at));
        Ok(&self.players[idx])
    }

    pub fn remove_player(&mut self, id: &str) -> LedgerOutcome {
        match self.players.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.players.remove(idx);
                LedgerOutcome::Applied
            }
            None => LedgerOutcome::Skipped,
        }
    }

    pub fn rename_player(&mut self, id: &str, new_name: &str) -> Result<(), LedgerError> {
        if self.player(id).is_none() {
            return Err(LedgerError::PlayerNotFound(id.to_string()));
        }

        let trimmed = new_name.trim();
        if self.name_taken(trimmed, Some(id)) {
            return Err(LedgerError::DuplicateName(trimmed.to_string()));
        }

        if let Some(player) = self.player_mut(id) {
            player.name = trimmed.to_string();
        }
        Ok(())
    }

    /// Прибавить знаковую дельту к балансу (дебет — отрицательная дельта).
    pub fn credit(&mut self, id: &str, delta: Money) -> LedgerOutcome {
        match self.player_mut(id) {
            Some(player) => {
                player.balance += delta;
                LedgerOutcome::Applied
            }
            None => LedgerOutcome::Skipped,
        }
    }

    /// Установить баланс в точное значение. Используется только отменой действий.
    pub fn set_balance(&mut self, id: &str, value: Money) -> LedgerOutcome {
        match self.player_mut(id) {
            Some(player) => {
                player.balance = value;
                LedgerOutcome::Applied
            }
            None => LedgerOutcome::Skipped,
        }
    }

    pub fn reset(&mut self) {
        self.players.clear();
    }

    fn name_taken(&self, name: &str, exclude_id: Option<&str>) -> bool {
        let lowered = name.to_lowercase();
        self.players.iter().any(|p| {
            exclude_id.map_or(true, |id| p.id != id) && p.name.to_lowercase() == lowered
        })
    }
}

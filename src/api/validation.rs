use thiserror::Error;

use crate::domain::{Money, PlayerId};

pub const MAX_PLAYER_NAME_LEN: usize = 50;
pub const MAX_ABS_BALANCE: i64 = 1_000_000;
pub const MAX_START_BET: i64 = 100_000;
pub const MIN_GAME_PLAYERS: usize = 2;
pub const MAX_GAME_PLAYERS: usize = 10;

/// Ошибки валидации входных данных. Проверки выполняются на границе API,
/// до вызова движка: сам движок правил отбора не навязывает.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Имя игрока не может быть пустым")]
    EmptyPlayerName,

    #[error("Имя игрока длиннее 50 символов")]
    PlayerNameTooLong,

    #[error("Баланс выходит за допустимые пределы (±1 000 000)")]
    BalanceOutOfRange,

    #[error("Стартовая ставка должна быть положительной")]
    StartBetNotPositive,

    #[error("Стартовая ставка слишком велика (максимум 100 000)")]
    StartBetTooLarge,

    #[error("Для игры нужно минимум 2 игрока")]
    TooFewPlayers,

    #[error("Слишком много игроков (максимум 10)")]
    TooManyPlayers,
}

pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyPlayerName);
    }
    if trimmed.chars().count() > MAX_PLAYER_NAME_LEN {
        return Err(ValidationError::PlayerNameTooLong);
    }
    Ok(())
}

pub fn validate_balance(balance: Money) -> Result<(), ValidationError> {
    if balance.0 < -MAX_ABS_BALANCE || balance.0 > MAX_ABS_BALANCE {
        return Err(ValidationError::BalanceOutOfRange);
    }
    Ok(())
}

pub fn validate_start_bet(bet: Money) -> Result<(), ValidationError> {
    if bet <= Money::ZERO {
        return Err(ValidationError::StartBetNotPositive);
    }
    if bet.0 > MAX_START_BET {
        return Err(ValidationError::StartBetTooLarge);
    }
    Ok(())
}

pub fn validate_player_selection(player_ids: &[PlayerId]) -> Result<(), ValidationError> {
    if player_ids.len() < MIN_GAME_PLAYERS {
        return Err(ValidationError::TooFewPlayers);
    }
    if player_ids.len() > MAX_GAME_PLAYERS {
        return Err(ValidationError::TooManyPlayers);
    }
    Ok(())
}

use thiserror::Error;

use crate::domain::PlayerId;

/// Ошибки движка лото.
///
/// Любая из них означает "действие не применено": ни сессия, ни балансы,
/// ни журнал событий при ошибке не меняются.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Нет активной игры")]
    NoActiveGame,

    #[error("Игрок {0} не участвует в текущей игре")]
    PlayerNotInGame(PlayerId),

    #[error("Игрок {0} не найден в реестре")]
    PlayerNotFound(PlayerId),

    #[error("Игрок {0} уже собрал нижний ряд")]
    BottomAlreadyCollected(PlayerId),

    #[error("Пустой список игроков для новой игры")]
    NoPlayers,

    #[error("Стартовая ставка не может быть отрицательной")]
    NegativeBet,

    #[error("История действий пуста – отменять нечего")]
    NothingToUndo,

    #[error("Последнее действие сделал не игрок {0}")]
    UndoNotAllowed(PlayerId),
}

//! Движок игровой сессии лото.
//!
//! Высокоуровневый объект: `LotoEngine`.
//! Основные операции:
//!   - `create_game` — создать сессию и списать стартовые ставки;
//!   - `collect_top` / `collect_middle` / `collect_bottom` — сбор рядов
//!     с соответствующим движением денег;
//!   - `undo` / `undo_player_last_action` — точная отмена последнего действия.

pub mod errors;
pub mod event_log;
pub mod loto_engine;
pub mod session;
pub mod snapshot;

pub use errors::EngineError;
pub use event_log::{ActionType, EventKind, EventLog, EventLogEntry};
pub use loto_engine::{Collected, EngineConfig, GameCreated, LotoEngine};
pub use session::{GamePlayerState, GameSession, GameStatus};
pub use snapshot::{Snapshot, UndoStack, MAX_ACTION_HISTORY};

/// RNG-интерфейс движка (реализации в infra).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

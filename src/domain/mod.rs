//! Доменная модель лото: деньги, карточки, профили игроков.

pub mod card;
pub mod money;
pub mod player;

/// Идентификатор игрока — непрозрачная строка, задаётся снаружи.
pub type PlayerId = String;
/// Идентификатор игровой сессии.
pub type GameId = String;
/// Момент времени: миллисекунды unix-эпохи.
pub type Timestamp = u64;

pub use card::*;
pub use money::*;
pub use player::*;

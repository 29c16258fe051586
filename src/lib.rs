//! Движок игровой сессии "Лото": общий банк, карточки игроков
//! и сбор рядов с точной отменой любого действия.
//!
//! Основные части:
//! - `domain` — деньги, карточки, профили игроков;
//! - `ledger` — реестр игроков и их балансов;
//! - `engine` — сессия, журнал событий, снапшоты/undo, `LotoEngine`;
//! - `stats` — статистика по завершённым играм;
//! - `api` — команды/запросы/DTO и валидация входных данных;
//! - `infra` — хранилище, часы, отложенная запись, ID, RNG.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod ledger;
pub mod stats;

pub use engine::{EngineError, LotoEngine};

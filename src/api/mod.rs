//! Внешний API движка лото.
//!
//! Здесь описываются:
//! - команды (commands.rs) — всё, что меняет состояние, и их диспетчер;
//! - запросы (queries.rs) — только чтение;
//! - DTO (dto.rs) — удобные структуры для фронта;
//! - ошибки (errors.rs) — то, что видит клиент;
//! - валидация входных данных (validation.rs) — проверки на границе,
//!   до вызова движка.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;
pub mod validation;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
pub use validation::*;

use serde::{Deserialize, Serialize};

use crate::api::validation::ValidationError;
use crate::engine::EngineError;
use crate::ledger::LedgerError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (валидация на границе).
    Validation(String),

    /// Ошибка реестра игроков (дубликат имени и т.п.).
    Ledger(String),

    /// Ошибка движка (предусловия операций).
    Engine(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err.to_string())
    }
}

//! Статистика по завершённым играм.
//!
//! Строго "ниже по течению" от движка: читает завершённые сессии и текущие
//! имена из реестра, обратно в движок ничего не пишет.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{GameId, Money, PlayerId, RowType, Timestamp};
use crate::engine::session::{GameSession, GameStatus};
use crate::infra::mapping::PlayerNameResolver;
use crate::infra::storage::LotoStorage;

/// Сколько сыгранных игр держим в истории (новые в начале).
pub const MAX_GAME_HISTORY: usize = 100;

/// Итог одного игрока в сыгранной игре.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayerSummary {
    pub player_id: PlayerId,
    /// Имя на момент записи; "Unknown", если игрок уже удалён из реестра.
    pub player_name: String,
    pub collected_rows: Vec<RowType>,
    pub contributions: Money,
}

/// Победитель игры (собравший нижний ряд).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameWinner {
    pub player_id: PlayerId,
    pub player_name: String,
}

/// Запись истории: одна завершённая игра.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameHistoryEntry {
    pub game_id: GameId,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub start_bet: Money,
    /// Банк на старте: ставка × число игроков сессии.
    pub initial_bank: Money,
    pub final_bank: Money,
    pub bank_change: Money,
    pub players: Vec<GamePlayerSummary>,
    pub winner: Option<GameWinner>,
}

/// Суммарные показатели одного игрока.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerTotals {
    pub wins: u32,
    pub earnings: Money,
}

/// Агрегированная статистика по завершённым играм.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_games: u32,
    pub total_wins: HashMap<PlayerId, u32>,
    pub total_earnings: HashMap<PlayerId, Money>,
    pub game_history: Vec<GameHistoryEntry>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Загрузить из хранилища; отсутствие или порча данных
    /// деградируют до пустой статистики.
    pub fn load(storage: &impl LotoStorage) -> Self {
        match storage.load_statistics() {
            Ok(Some(statistics)) => statistics,
            Ok(None) => Statistics::default(),
            Err(e) => {
                log::warn!("не удалось загрузить статистику, начинаем с пустой: {e}");
                Statistics::default()
            }
        }
    }

    /// Сохранить; ошибка записи логируется и глотается.
    pub fn save(&self, storage: &mut impl LotoStorage) {
        if let Err(e) = storage.save_statistics(self) {
            log::error!("не удалось сохранить статистику: {e}");
        }
    }

    /// Учесть завершённую игру. Активные сессии игнорируются.
    pub fn record_game(&mut self, game: &GameSession, names: &impl PlayerNameResolver) {
        if game.status != GameStatus::Finished {
            return;
        }

        self.total_games += 1;

        let initial_bank = game.start_bet * game.players.len() as i64;
        // Живой bank у завершённой игры всегда 0 — берём зафиксированный.
        let final_bank = game.final_bank.unwrap_or(initial_bank);

        let winner = game
            .players
            .iter()
            .find(|p| p.has_collected(RowType::Bottom));

        if let Some(w) = winner {
            *self.total_wins.entry(w.player_id.clone()).or_insert(0) += 1;
            let earnings = final_bank - game.start_bet;
            *self
                .total_earnings
                .entry(w.player_id.clone())
                .or_insert(Money::ZERO) += earnings;
        }

        let entry = GameHistoryEntry {
            game_id: game.id.clone(),
            start_date: game.start_date,
            end_date: game.end_date,
            start_bet: game.start_bet,
            initial_bank,
            final_bank,
            bank_change: final_bank - initial_bank,
            players: game
                .players
                .iter()
                .map(|p| GamePlayerSummary {
                    player_id: p.player_id.clone(),
                    player_name: names.resolve_name(&p.player_id),
                    collected_rows: p.collected_rows.clone(),
                    contributions: p.contributions,
                })
                .collect(),
            winner: winner.map(|w| GameWinner {
                player_id: w.player_id.clone(),
                player_name: names.resolve_name(&w.player_id),
            }),
        };

        self.game_history.insert(0, entry);
        self.game_history.truncate(MAX_GAME_HISTORY);
    }

    pub fn player_totals(&self, player_id: &str) -> PlayerTotals {
        PlayerTotals {
            wins: self.total_wins.get(player_id).copied().unwrap_or(0),
            earnings: self
                .total_earnings
                .get(player_id)
                .copied()
                .unwrap_or(Money::ZERO),
        }
    }

    pub fn reset(&mut self) {
        *self = Statistics::default();
    }
}

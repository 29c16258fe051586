use serde::{Deserialize, Serialize};

use crate::api::dto::{CurrentGameStatsDto, GameViewDto, PlayerDto, PlayerStatsDto};
use crate::domain::PlayerId;
use crate::engine::LotoEngine;
use crate::infra::clock::Clock;
use crate::infra::mapping::{
    map_current_game_stats, map_game_to_dto, map_player_to_dto, PlayerNameResolver,
};
use crate::infra::storage::LotoStorage;
use crate::stats::Statistics;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Текущая игра (если есть).
    GetCurrentGame,

    /// Все игры, включая завершённые.
    ListGames,

    /// Все игроки реестра.
    ListPlayers,

    /// Сводные показатели игрока.
    GetPlayerStats { player_id: PlayerId },

    /// Состояние текущей игры для панели статистики.
    GetCurrentGameStats,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    CurrentGame(Option<GameViewDto>),
    Games(Vec<GameViewDto>),
    Players(Vec<PlayerDto>),
    PlayerStats(PlayerStatsDto),
    CurrentGameStats(Option<CurrentGameStatsDto>),
}

/// Ответить на запрос по живому состоянию движка и статистике.
pub fn answer_query<S: LotoStorage, C: Clock>(
    engine: &LotoEngine<S, C>,
    statistics: &Statistics,
    query: Query,
) -> QueryResponse {
    match query {
        Query::GetCurrentGame => QueryResponse::CurrentGame(
            engine
                .current_game()
                .map(|g| map_game_to_dto(g, engine.ledger())),
        ),

        Query::ListGames => QueryResponse::Games(
            engine
                .games()
                .iter()
                .map(|g| map_game_to_dto(g, engine.ledger()))
                .collect(),
        ),

        Query::ListPlayers => QueryResponse::Players(
            engine.ledger().players().iter().map(map_player_to_dto).collect(),
        ),

        Query::GetPlayerStats { player_id } => {
            let totals = statistics.player_totals(&player_id);
            QueryResponse::PlayerStats(PlayerStatsDto {
                name: engine.ledger().resolve_name(&player_id),
                player_id,
                wins: totals.wins,
                earnings: totals.earnings,
            })
        }

        Query::GetCurrentGameStats => QueryResponse::CurrentGameStats(
            engine
                .current_game()
                .map(|g| map_current_game_stats(g, engine.ledger())),
        ),
    }
}

use crate::api::dto::{
    CurrentGameStatsDto, EventLogEntryDto, GamePlayerDto, GameViewDto, PlayerDto,
};
use crate::domain::Player;
use crate::engine::session::GameSession;
use crate::ledger::PlayerLedger;

/// Получение отображаемого имени игрока по id.
///
/// Сессии хранят только идентификаторы, имена живут в реестре;
/// для потерянных игроков резолвер обязан вернуть заглушку.
pub trait PlayerNameResolver {
    fn resolve_name(&self, player_id: &str) -> String;
}

impl PlayerNameResolver for PlayerLedger {
    fn resolve_name(&self, player_id: &str) -> String {
        self.player(player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

pub fn map_player_to_dto(player: &Player) -> PlayerDto {
    PlayerDto {
        id: player.id.clone(),
        name: player.name.clone(),
        balance: player.balance,
        created_at: player.created_at,
    }
}

/// Собрать DTO сессии с разрешёнными именами игроков.
pub fn map_game_to_dto(game: &GameSession, names: &impl PlayerNameResolver) -> GameViewDto {
    GameViewDto {
        game_id: game.id.clone(),
        status: game.status,
        start_date: game.start_date,
        end_date: game.end_date,
        start_bet: game.start_bet,
        bank: game.bank,
        final_bank: game.final_bank,
        players: map_game_players(game, names),
        event_log: game
            .event_log
            .entries()
            .iter()
            .map(|e| EventLogEntryDto {
                timestamp: e.timestamp,
                kind: e.kind,
                player_name: e.player_name.clone(),
                description: e.description.clone(),
                amount: e.amount,
            })
            .collect(),
        undo_depth: game.history.len(),
    }
}

/// Состояние текущей игры для панели статистики.
pub fn map_current_game_stats(
    game: &GameSession,
    names: &impl PlayerNameResolver,
) -> CurrentGameStatsDto {
    CurrentGameStatsDto {
        game_id: game.id.clone(),
        start_date: game.start_date,
        start_bet: game.start_bet,
        bank: game.bank,
        players: map_game_players(game, names),
    }
}

fn map_game_players(game: &GameSession, names: &impl PlayerNameResolver) -> Vec<GamePlayerDto> {
    game.players
        .iter()
        .map(|p| GamePlayerDto {
            player_id: p.player_id.clone(),
            name: names.resolve_name(&p.player_id),
            card: p.card.clone(),
            collected_rows: p.collected_rows.clone(),
            contributions: p.contributions,
        })
        .collect()
}

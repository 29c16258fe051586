use serde::{Deserialize, Serialize};

use crate::api::dto::PlayerDto;
use crate::api::errors::ApiError;
use crate::api::validation;
use crate::domain::{GameId, Money, PlayerId, RowType};
use crate::engine::{LotoEngine, RandomSource};
use crate::infra::clock::Clock;
use crate::infra::mapping::map_player_to_dto;
use crate::infra::storage::LotoStorage;

/// Команда верхнего уровня: всё, что меняет состояние.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Добавить игрока в реестр.
    AddPlayer(AddPlayerCommand),

    /// Удалить игрока из реестра.
    RemovePlayer { player_id: PlayerId },

    /// Переименовать игрока.
    RenamePlayer {
        player_id: PlayerId,
        new_name: String,
    },

    /// Скорректировать баланс игрока на дельту (кэш-ин/кэш-аут).
    AdjustBalance { player_id: PlayerId, delta: Money },

    /// Создать новую игру.
    CreateGame(CreateGameCommand),

    /// Собрать ряд.
    CollectRow(CollectRowCommand),

    /// Отменить последнее действие текущей игры.
    UndoLastAction,

    /// Отменить последнее действие, если его сделал этот игрок.
    UndoPlayerAction { player_id: PlayerId },

    /// Сбросить все игры и игроков.
    ResetAll,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddPlayerCommand {
    pub name: String,
    pub initial_balance: Money,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateGameCommand {
    pub player_ids: Vec<PlayerId>,
    pub start_bet: Money,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectRowCommand {
    pub player_id: PlayerId,
    pub row: RowType,
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Успех без дополнительных данных.
    Ok,

    PlayerAdded(PlayerDto),

    GameCreated {
        game_id: GameId,
        skipped: Vec<PlayerId>,
    },

    RowCollected {
        row: RowType,
        amount: Option<Money>,
        skipped: Vec<PlayerId>,
    },
}

/// Диспетчер команд: валидация на границе, затем вызов движка.
pub fn dispatch<S, C, R>(
    engine: &mut LotoEngine<S, C>,
    rng: &mut R,
    command: Command,
) -> Result<CommandResponse, ApiError>
where
    S: LotoStorage,
    C: Clock,
    R: RandomSource,
{
    match command {
        Command::AddPlayer(cmd) => {
            validation::validate_player_name(&cmd.name)?;
            validation::validate_balance(cmd.initial_balance)?;
            let player = engine.add_player(&cmd.name, cmd.initial_balance)?;
            Ok(CommandResponse::PlayerAdded(map_player_to_dto(&player)))
        }

        Command::RemovePlayer { player_id } => {
            engine.remove_player(&player_id);
            Ok(CommandResponse::Ok)
        }

        Command::RenamePlayer {
            player_id,
            new_name,
        } => {
            validation::validate_player_name(&new_name)?;
            engine.rename_player(&player_id, &new_name)?;
            Ok(CommandResponse::Ok)
        }

        Command::AdjustBalance { player_id, delta } => {
            engine.adjust_balance(&player_id, delta);
            Ok(CommandResponse::Ok)
        }

        Command::CreateGame(cmd) => {
            validation::validate_start_bet(cmd.start_bet)?;
            validation::validate_player_selection(&cmd.player_ids)?;
            let created = engine.create_game(&cmd.player_ids, cmd.start_bet, rng)?;
            Ok(CommandResponse::GameCreated {
                game_id: created.game_id,
                skipped: created.skipped,
            })
        }

        Command::CollectRow(cmd) => {
            let collected = match cmd.row {
                RowType::Top => engine.collect_top(&cmd.player_id)?,
                RowType::Middle => engine.collect_middle(&cmd.player_id)?,
                RowType::Bottom => engine.collect_bottom(&cmd.player_id)?,
            };
            Ok(CommandResponse::RowCollected {
                row: collected.row,
                amount: collected.amount,
                skipped: collected.skipped,
            })
        }

        Command::UndoLastAction => {
            engine.undo()?;
            Ok(CommandResponse::Ok)
        }

        Command::UndoPlayerAction { player_id } => {
            engine.undo_player_last_action(&player_id)?;
            Ok(CommandResponse::Ok)
        }

        Command::ResetAll => {
            engine.reset_all();
            Ok(CommandResponse::Ok)
        }
    }
}

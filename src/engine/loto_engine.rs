use std::collections::HashMap;

use crate::domain::{
    GameId, LotoCard, Money, Player, PlayerId, RowType, MAX_CARD_NUMBER, MIN_CARD_NUMBER,
};
use crate::engine::errors::EngineError;
use crate::engine::event_log::{ActionType, EventKind, EventLog, EventLogEntry};
use crate::engine::session::{GamePlayerState, GameSession, GameStatus};
use crate::engine::snapshot::{Snapshot, UndoStack};
use crate::engine::RandomSource;
use crate::infra::clock::Clock;
use crate::infra::debounce::Debouncer;
use crate::infra::ids::IdGenerator;
use crate::infra::storage::LotoStorage;
use crate::ledger::{LedgerError, LedgerOutcome, PlayerLedger};

/// Настройки движка.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Окно коалесинга записей в хранилище, мс.
    pub save_debounce_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_debounce_ms: 300,
        }
    }
}

/// Результат создания игры.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameCreated {
    pub game_id: GameId,
    /// Идентификаторы, не найденные в реестре: они ничего не внесли
    /// и в сессию не попали.
    pub skipped: Vec<PlayerId>,
}

/// Результат сбора ряда.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collected {
    pub row: RowType,
    /// Выплата из банка (None для верхнего ряда — там выплаты нет).
    pub amount: Option<Money>,
    /// Игроки сессии, не найденные в реестре при раздаче взносов:
    /// ни их баланс, ни их взносы не менялись.
    pub skipped: Vec<PlayerId>,
}

/// Движок игровых сессий лото.
///
/// Владеет списком сессий, указателем на текущую, реестром игроков и
/// хранилищем. Все коллабораторы передаются явно при создании —
/// никакого глобального состояния.
///
/// Модель исполнения однопоточная: каждая операция выполняется целиком
/// (снапшот → мутация сессии → мутация реестра → запись в журнал →
/// отметка на сохранение) до возврата.
pub struct LotoEngine<S: LotoStorage, C: Clock> {
    ledger: PlayerLedger,
    games: Vec<GameSession>,
    current: Option<GameId>,
    storage: S,
    clock: C,
    ids: IdGenerator,
    players_saver: Debouncer,
    games_saver: Debouncer,
}

impl<S: LotoStorage, C: Clock> LotoEngine<S, C> {
    /// Создать движок поверх хранилища. Стартовое чтение синхронное;
    /// при любой ошибке чтения деградируем до пустых списков, не падая.
    pub fn load(storage: S, clock: C, config: EngineConfig) -> Self {
        let players = storage.load_players().unwrap_or_else(|e| {
            log::warn!("не удалось загрузить игроков, начинаем с пустого списка: {e}");
            Vec::new()
        });
        let games = storage.load_games().unwrap_or_else(|e| {
            log::warn!("не удалось загрузить игры, начинаем с пустого списка: {e}");
            Vec::new()
        });

        let ids = IdGenerator::new();
        ids.resume_after(
            players.iter().map(|p| p.id.as_str()),
            games.iter().map(|g| g.id.as_str()),
        );

        Self {
            ledger: PlayerLedger::from_players(players),
            games,
            current: None,
            storage,
            clock,
            ids,
            players_saver: Debouncer::new(config.save_debounce_ms),
            games_saver: Debouncer::new(config.save_debounce_ms),
        }
    }

    pub fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    pub fn games(&self) -> &[GameSession] {
        &self.games
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn current_game(&self) -> Option<&GameSession> {
        let id = self.current.as_ref()?;
        self.games.iter().find(|g| &g.id == id)
    }

    pub fn current_game_id(&self) -> Option<&GameId> {
        self.current.as_ref()
    }

    //
    // --- операции над реестром ---
    //

    pub fn add_player(&mut self, name: &str, initial_balance: Money) -> Result<Player, LedgerError> {
        let id = self.ids.next_player_id();
        let created_at = self.clock.now();
        let player = self
            .ledger
            .add_player(id, name, initial_balance, created_at)?
            .clone();
        self.touch_players();
        Ok(player)
    }

    pub fn remove_player(&mut self, id: &str) -> LedgerOutcome {
        let outcome = self.ledger.remove_player(id);
        if outcome.is_applied() {
            self.touch_players();
        }
        outcome
    }

    pub fn rename_player(&mut self, id: &str, new_name: &str) -> Result<(), LedgerError> {
        self.ledger.rename_player(id, new_name)?;
        self.touch_players();
        Ok(())
    }

    pub fn adjust_balance(&mut self, id: &str, delta: Money) -> LedgerOutcome {
        let outcome = self.ledger.credit(id, delta);
        if outcome.is_applied() {
            self.touch_players();
        }
        outcome
    }

    //
    // --- жизненный цикл игры ---
    //

    /// Создать новую игру: списать ставку с каждого живого игрока,
    /// раздать карточки, инициализировать банк суммой взносов.
    /// Идентификаторы без живого игрока в сессию не попадают.
    pub fn create_game<R: RandomSource>(
        &mut self,
        player_ids: &[PlayerId],
        start_bet: Money,
        rng: &mut R,
    ) -> Result<GameCreated, EngineError> {
        if player_ids.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        if start_bet.is_negative() {
            return Err(EngineError::NegativeBet);
        }

        let game_id = self.ids.next_game_id();
        let now = self.clock.now();

        let mut game_players = Vec::new();
        let mut skipped = Vec::new();
        for player_id in player_ids {
            if self.ledger.player(player_id).is_none() {
                skipped.push(player_id.clone());
                continue;
            }
            self.ledger.credit(player_id, -start_bet);
            game_players.push(GamePlayerState::new(
                player_id.clone(),
                deal_card(rng),
                start_bet,
            ));
        }

        let bank: Money = game_players.iter().map(|p| p.contributions).sum();

        let mut event_log = EventLog::new();
        event_log.push(EventLogEntry {
            timestamp: now,
            kind: EventKind::Start,
            player_id: None,
            player_name: None,
            description: format!(
                "Game started. Bet: {start_bet}₽, players: {}",
                game_players.len()
            ),
            amount: None,
            action_type: None,
        });

        self.games.push(GameSession {
            id: game_id.clone(),
            start_date: now,
            end_date: None,
            start_bet,
            bank,
            players: game_players,
            status: GameStatus::Active,
            final_bank: None,
            event_log,
            history: UndoStack::new(),
        });
        self.current = Some(game_id.clone());

        self.touch_games();
        self.touch_players();

        Ok(GameCreated { game_id, skipped })
    }

    /// Сбор верхнего ряда: выплаты нет, остальные игроки доносят по ставке,
    /// банк пересчитывается заново как сумма всех взносов.
    /// Проверки на повторный сбор верхнего ряда нет.
    pub fn collect_top(&mut self, player_id: &str) -> Result<Collected, EngineError> {
        let now = self.clock.now();
        let game_idx = self.active_game_index()?;
        if self.games[game_idx].player_state(player_id).is_none() {
            return Err(EngineError::PlayerNotInGame(player_id.to_string()));
        }
        let player_name = self
            .ledger
            .player(player_id)
            .map(|p| p.name.clone())
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.to_string()))?;

        self.take_snapshot(game_idx);

        let game = &mut self.games[game_idx];
        if let Some(state) = game.player_state_mut(player_id) {
            state.collected_rows.push(RowType::Top);
        }

        let start_bet = game.start_bet;
        let mut skipped = Vec::new();
        for p in game.players.iter_mut() {
            if p.player_id != player_id {
                match self.ledger.credit(&p.player_id, -start_bet) {
                    LedgerOutcome::Applied => p.contributions += start_bet,
                    LedgerOutcome::Skipped => skipped.push(p.player_id.clone()),
                }
            }
        }

        // Полный пересчёт банка по взносам (в отличие от среднего ряда).
        game.bank = game.contributions_total();

        game.event_log.push(EventLogEntry {
            timestamp: now,
            kind: EventKind::Top,
            player_id: Some(player_id.to_string()),
            player_name: Some(player_name.clone()),
            description: format!("{player_name} collected top"),
            amount: None,
            action_type: Some(ActionType::TopCollected),
        });

        self.touch_games();
        self.touch_players();

        Ok(Collected {
            row: RowType::Top,
            amount: None,
            skipped,
        })
    }

    /// Сбор среднего ряда: игрок забирает половину банка (с округлением вниз),
    /// остальные доносят по ставке. Банк обновляется инкрементально:
    /// bank − halfBank + ставка × (число остальных игроков сессии) —
    /// остальные считаются независимо от того, нашлись ли они в реестре.
    /// Проверки на повторный сбор среднего ряда нет.
    pub fn collect_middle(&mut self, player_id: &str) -> Result<Collected, EngineError> {
        let now = self.clock.now();
        let game_idx = self.active_game_index()?;
        if self.games[game_idx].player_state(player_id).is_none() {
            return Err(EngineError::PlayerNotInGame(player_id.to_string()));
        }
        let player_name = self
            .ledger
            .player(player_id)
            .map(|p| p.name.clone())
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.to_string()))?;

        self.take_snapshot(game_idx);

        let game = &mut self.games[game_idx];
        if let Some(state) = game.player_state_mut(player_id) {
            state.collected_rows.push(RowType::Middle);
        }

        let half_bank = game.bank.half_down();
        self.ledger.credit(player_id, half_bank);

        let start_bet = game.start_bet;
        let mut skipped = Vec::new();
        for p in game.players.iter_mut() {
            if p.player_id != player_id {
                match self.ledger.credit(&p.player_id, -start_bet) {
                    LedgerOutcome::Applied => p.contributions += start_bet,
                    LedgerOutcome::Skipped => skipped.push(p.player_id.clone()),
                }
            }
        }

        let other_count = game
            .players
            .iter()
            .filter(|p| p.player_id != player_id)
            .count() as i64;
        game.bank = game.bank - half_bank + start_bet * other_count;

        game.event_log.push(EventLogEntry {
            timestamp: now,
            kind: EventKind::Middle,
            player_id: Some(player_id.to_string()),
            player_name: Some(player_name.clone()),
            description: format!("{player_name} collected middle (took {half_bank}₽)"),
            amount: Some(half_bank),
            action_type: Some(ActionType::Withdrawal),
        });

        self.touch_games();
        self.touch_players();

        Ok(Collected {
            row: RowType::Middle,
            amount: Some(half_bank),
            skipped,
        })
    }

    /// Сбор нижнего ряда: игрок забирает весь банк, игра завершается.
    /// Повторный сбор нижнего ряда одним игроком запрещён.
    pub fn collect_bottom(&mut self, player_id: &str) -> Result<Collected, EngineError> {
        let now = self.clock.now();
        let game_idx = self.active_game_index()?;
        {
            let game = &self.games[game_idx];
            let state = game
                .player_state(player_id)
                .ok_or_else(|| EngineError::PlayerNotInGame(player_id.to_string()))?;
            if state.has_collected(RowType::Bottom) {
                return Err(EngineError::BottomAlreadyCollected(player_id.to_string()));
            }
        }
        let player_name = self
            .ledger
            .player(player_id)
            .map(|p| p.name.clone())
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.to_string()))?;

        self.take_snapshot(game_idx);

        let game = &mut self.games[game_idx];
        if let Some(state) = game.player_state_mut(player_id) {
            state.collected_rows.push(RowType::Bottom);
        }

        let final_bank = game.bank;
        self.ledger.credit(player_id, final_bank);

        game.status = GameStatus::Finished;
        game.end_date = Some(now);
        game.final_bank = Some(final_bank);
        game.bank = Money::ZERO;

        game.event_log.push(EventLogEntry {
            timestamp: now,
            kind: EventKind::Bottom,
            player_id: Some(player_id.to_string()),
            player_name: Some(player_name.clone()),
            description: format!("{player_name} collected bottom (took {final_bank}₽) - game finished"),
            amount: Some(final_bank),
            action_type: Some(ActionType::Withdrawal),
        });

        self.touch_games();
        self.touch_players();

        Ok(Collected {
            row: RowType::Bottom,
            amount: Some(final_bank),
            skipped: Vec::new(),
        })
    }

    //
    // --- отмена действий ---
    //

    /// Отменить последнее действие текущей игры: восстановить банк, статус,
    /// дату окончания, состояние игроков и точные значения балансов.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        let game_idx = self.current_game_index().ok_or(EngineError::NoActiveGame)?;
        let snapshot = self.games[game_idx]
            .history
            .pop()
            .ok_or(EngineError::NothingToUndo)?;

        let game = &mut self.games[game_idx];
        game.bank = snapshot.bank;
        game.status = snapshot.status;
        game.end_date = snapshot.end_date;

        // Состав восстанавливаем в порядке снапшота: у живого игрока
        // перезаписываются только collected_rows и contributions,
        // отсутствующий подменяется копией из снапшота целиком.
        let mut restored = Vec::with_capacity(snapshot.players.len());
        for snap_player in snapshot.players {
            match game
                .players
                .iter()
                .position(|p| p.player_id == snap_player.player_id)
            {
                Some(pos) => {
                    let mut live = game.players[pos].clone();
                    live.collected_rows = snap_player.collected_rows;
                    live.contributions = snap_player.contributions;
                    restored.push(live);
                }
                None => restored.push(snap_player),
            }
        }
        game.players = restored;

        // Балансы возвращаются точной установкой, не дельтой.
        for (pid, balance) in &snapshot.player_balances {
            self.ledger.set_balance(pid, *balance);
        }

        game.event_log
            .truncate_last_if_longer(snapshot.event_log_length);

        self.touch_games();
        self.touch_players();

        Ok(())
    }

    /// Можно ли игроку отменить своё последнее действие: последняя запись
    /// журнала — сбор ряда именно этим игроком, и игра ещё активна.
    pub fn can_undo_player(&self, player_id: &str) -> bool {
        let Some(game) = self.current_game() else {
            return false;
        };
        let Some(last) = game.event_log.last() else {
            return false;
        };
        last.kind.is_row_collection()
            && last.player_id.as_deref() == Some(player_id)
            && game.status == GameStatus::Active
    }

    pub fn undo_player_last_action(&mut self, player_id: &str) -> Result<(), EngineError> {
        if !self.can_undo_player(player_id) {
            return Err(EngineError::UndoNotAllowed(player_id.to_string()));
        }
        self.undo()
    }

    //
    // --- управление текущей игрой ---
    //

    /// Сделать текущей первую активную игру из списка
    /// (например, после перезапуска). Возвращает, нашлась ли такая.
    pub fn load_active_game(&mut self) -> bool {
        match self.games.iter().find(|g| g.is_active()) {
            Some(game) => {
                self.current = Some(game.id.clone());
                true
            }
            None => false,
        }
    }

    pub fn clear_current_game(&mut self) {
        self.current = None;
    }

    /// Сбросить все игры и игроков.
    pub fn reset_all(&mut self) {
        self.current = None;
        self.games.clear();
        self.ledger.reset();
        self.touch_games();
        self.touch_players();
    }

    //
    // --- персистентность ---
    //

    /// Выполнить отложенные записи, чьё окно уже истекло. Вызывается
    /// опрашивающей стороной (тик UI, тест); движок никогда не блокируется
    /// на записи и не ретраит — ошибка записи логируется и глотается.
    pub fn flush_pending(&mut self) {
        let now = self.clock.now();
        if self.players_saver.take_due(now) {
            self.save_players();
        }
        if self.games_saver.take_due(now) {
            self.save_games();
        }
    }

    /// Принудительно записать всё, что накопилось (например, при выходе).
    pub fn flush_now(&mut self) {
        if self.players_saver.take_any() {
            self.save_players();
        }
        if self.games_saver.take_any() {
            self.save_games();
        }
    }

    fn save_players(&mut self) {
        if let Err(e) = self.storage.save_players(self.ledger.players()) {
            log::error!("не удалось сохранить игроков: {e}");
        }
    }

    fn save_games(&mut self) {
        if let Err(e) = self.storage.save_games(&self.games) {
            log::error!("не удалось сохранить игры: {e}");
        }
    }

    fn touch_players(&mut self) {
        let now = self.clock.now();
        self.players_saver.mark(now);
    }

    fn touch_games(&mut self) {
        let now = self.clock.now();
        self.games_saver.mark(now);
    }

    //
    // --- внутреннее ---
    //

    /// Индекс текущей игры, если она есть и активна.
    fn active_game_index(&self) -> Result<usize, EngineError> {
        let idx = self.current_game_index().ok_or(EngineError::NoActiveGame)?;
        if !self.games[idx].is_active() {
            return Err(EngineError::NoActiveGame);
        }
        Ok(idx)
    }

    /// Индекс текущей игры независимо от статуса (для undo:
    /// завершённая игра остаётся текущей, пока её явно не сбросили).
    fn current_game_index(&self) -> Option<usize> {
        let id = self.current.as_ref()?;
        self.games.iter().position(|g| &g.id == id)
    }

    /// Снять снимок перед мутацией: банк, копия игроков, свежие балансы
    /// из реестра, статус, дата окончания и длина журнала.
    fn take_snapshot(&mut self, game_idx: usize) {
        let game = &self.games[game_idx];
        let mut player_balances = HashMap::new();
        for p in &game.players {
            if let Some(balance) = self.ledger.balance(&p.player_id) {
                player_balances.insert(p.player_id.clone(), balance);
            }
        }
        let snapshot = Snapshot {
            bank: game.bank,
            players: game.players.clone(),
            player_balances,
            status: game.status,
            end_date: game.end_date,
            event_log_length: game.event_log.len(),
        };
        self.games[game_idx].history.push(snapshot);
    }
}

/// Раздать карточку: перемешанные числа 1..=90, первые 15 — в карточку.
fn deal_card<R: RandomSource>(rng: &mut R) -> LotoCard {
    let mut numbers: Vec<u8> = (MIN_CARD_NUMBER..=MAX_CARD_NUMBER).collect();
    rng.shuffle(&mut numbers);
    LotoCard::from_shuffled(&numbers)
}

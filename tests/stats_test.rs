// tests/stats_test.rs
//
// Статистика по завершённым играм: агрегаты, история, персистентность.

use loto_engine::domain::{LotoCard, Money, PlayerId, RowType};
use loto_engine::engine::{
    EngineConfig, EventLog, GamePlayerState, GameSession, GameStatus, LotoEngine, UndoStack,
};
use loto_engine::infra::{DeterministicRng, InMemoryStorage, ManualClock, KEY_STATISTICS};
use loto_engine::ledger::PlayerLedger;
use loto_engine::stats::{Statistics, MAX_GAME_HISTORY};

type TestEngine = LotoEngine<InMemoryStorage, ManualClock>;

fn engine_with_players(names: &[&str]) -> (TestEngine, Vec<PlayerId>) {
    let mut engine = LotoEngine::load(
        InMemoryStorage::new(),
        ManualClock::new(1_000),
        EngineConfig::default(),
    );
    let mut ids = Vec::new();
    for name in names {
        ids.push(engine.add_player(name, Money::new(1000)).expect("add").id);
    }
    (engine, ids)
}

fn sample_ledger() -> PlayerLedger {
    let mut ledger = PlayerLedger::new();
    ledger
        .add_player("p-a".to_string(), "Алиса", Money::ZERO, 0)
        .expect("add");
    ledger
}

/// Завершённая сессия с единственным игроком-победителем "p-a".
fn finished_session(game_id: &str, start_bet: i64, final_bank: i64) -> GameSession {
    let numbers: Vec<u8> = (1..=90).collect();
    let mut winner = GamePlayerState::new(
        "p-a".to_string(),
        LotoCard::from_shuffled(&numbers),
        Money::new(start_bet),
    );
    winner.collected_rows.push(RowType::Bottom);

    GameSession {
        id: game_id.to_string(),
        start_date: 1,
        end_date: Some(2),
        start_bet: Money::new(start_bet),
        bank: Money::ZERO,
        players: vec![winner],
        status: GameStatus::Finished,
        final_bank: Some(Money::new(final_bank)),
        event_log: EventLog::new(),
        history: UndoStack::new(),
    }
}

#[test]
fn record_game_counts_winner_and_earnings() {
    let (mut engine, ids) = engine_with_players(&["Алиса", "Борис", "Вера"]);
    let mut rng = DeterministicRng::from_seed(7);
    engine.create_game(&ids, Money::new(100), &mut rng).expect("create");
    engine.collect_bottom(&ids[0]).expect("bottom");

    let mut statistics = Statistics::new();
    statistics.record_game(engine.current_game().expect("game"), engine.ledger());

    assert_eq!(statistics.total_games, 1);

    let totals = statistics.player_totals(&ids[0]);
    assert_eq!(totals.wins, 1);
    // забрала банк 300, поставив 100
    assert_eq!(totals.earnings, Money::new(200));

    // никому другому победа не записана
    assert_eq!(statistics.player_totals(&ids[1]).wins, 0);

    let entry = &statistics.game_history[0];
    assert_eq!(entry.initial_bank, Money::new(300));
    assert_eq!(entry.final_bank, Money::new(300));
    assert_eq!(entry.bank_change, Money::ZERO);
    assert_eq!(entry.players.len(), 3);
    assert_eq!(
        entry.winner.as_ref().expect("winner").player_name,
        "Алиса"
    );
}

#[test]
fn record_game_ignores_active_sessions() {
    let (mut engine, ids) = engine_with_players(&["Алиса", "Борис"]);
    let mut rng = DeterministicRng::from_seed(7);
    engine.create_game(&ids, Money::new(100), &mut rng).expect("create");

    let mut statistics = Statistics::new();
    statistics.record_game(engine.current_game().expect("game"), engine.ledger());

    assert_eq!(statistics.total_games, 0);
    assert!(statistics.game_history.is_empty());
}

#[test]
fn final_bank_reflects_mid_game_money_movement() {
    // сборы по ходу игры меняют итоговый банк: выигрыш считается от
    // зафиксированного finalBank, а не от стартового банка
    let (mut engine, ids) = engine_with_players(&["Алиса", "Борис", "Вера"]);
    let mut rng = DeterministicRng::from_seed(7);
    engine.create_game(&ids, Money::new(100), &mut rng).expect("create");

    engine.collect_middle(&ids[1]).expect("middle"); // банк: 300 − 150 + 200
    engine.collect_bottom(&ids[0]).expect("bottom"); // банк 350 уходит Алисе

    let mut statistics = Statistics::new();
    statistics.record_game(engine.current_game().expect("game"), engine.ledger());

    let entry = &statistics.game_history[0];
    assert_eq!(entry.initial_bank, Money::new(300));
    assert_eq!(entry.final_bank, Money::new(350));
    assert_eq!(entry.bank_change, Money::new(50));
    assert_eq!(statistics.player_totals(&ids[0]).earnings, Money::new(250));
}

#[test]
fn history_is_newest_first_and_capped() {
    let ledger = sample_ledger();
    let mut statistics = Statistics::new();

    for i in 0..(MAX_GAME_HISTORY + 5) {
        let game = finished_session(&format!("g-{i}"), 10, 10);
        statistics.record_game(&game, &ledger);
    }

    assert_eq!(statistics.game_history.len(), MAX_GAME_HISTORY);
    // новые в начале, самые старые пять вытеснены
    assert_eq!(statistics.game_history[0].game_id, format!("g-{}", MAX_GAME_HISTORY + 4));
    assert_eq!(
        statistics.game_history.last().expect("last").game_id,
        "g-5"
    );
    // счётчик игр при этом не усечён
    assert_eq!(statistics.total_games as usize, MAX_GAME_HISTORY + 5);
}

#[test]
fn winner_gone_from_ledger_is_recorded_as_unknown() {
    let ledger = PlayerLedger::new();
    let mut statistics = Statistics::new();

    statistics.record_game(&finished_session("g-1", 100, 100), &ledger);

    let entry = &statistics.game_history[0];
    assert_eq!(entry.winner.as_ref().expect("winner").player_name, "Unknown");
    // победа и выигрыш всё равно привязаны к id
    assert_eq!(statistics.player_totals("p-a").wins, 1);
    assert_eq!(statistics.player_totals("p-a").earnings, Money::ZERO);
}

#[test]
fn statistics_persist_and_degrade_gracefully() {
    let ledger = sample_ledger();
    let mut storage = InMemoryStorage::new();

    // отсутствие данных — пустая статистика
    let statistics = Statistics::load(&storage);
    assert_eq!(statistics.total_games, 0);

    let mut statistics = Statistics::new();
    statistics.record_game(&finished_session("g-1", 100, 250), &ledger);
    statistics.save(&mut storage);

    let loaded = Statistics::load(&storage);
    assert_eq!(loaded.total_games, 1);
    assert_eq!(loaded.player_totals("p-a").earnings, Money::new(150));
    assert_eq!(loaded.game_history[0].game_id, "g-1");

    // порча данных — снова пустая статистика, без паники
    storage.insert_raw(KEY_STATISTICS, "{сломано");
    let broken = Statistics::load(&storage);
    assert_eq!(broken.total_games, 0);
}

#[test]
fn reset_clears_everything() {
    let ledger = sample_ledger();
    let mut statistics = Statistics::new();
    statistics.record_game(&finished_session("g-1", 100, 100), &ledger);

    statistics.reset();

    assert_eq!(statistics.total_games, 0);
    assert!(statistics.game_history.is_empty());
    assert_eq!(statistics.player_totals("p-a").wins, 0);
}

// tests/api_test.rs
//
// Внешний API: валидация на границе, диспетчер команд, запросы и DTO.

use loto_engine::api::{
    answer_query, dispatch, validate_balance, validate_player_name, validate_player_selection,
    validate_start_bet, AddPlayerCommand, ApiError, Command, CommandResponse, CreateGameCommand,
    CollectRowCommand, Query, QueryResponse, ValidationError,
};
use loto_engine::domain::{Money, PlayerId, RowType};
use loto_engine::engine::{EngineConfig, GameStatus, LotoEngine};
use loto_engine::infra::{DeterministicRng, InMemoryStorage, ManualClock};
use loto_engine::stats::Statistics;

type TestEngine = LotoEngine<InMemoryStorage, ManualClock>;

fn new_engine() -> TestEngine {
    LotoEngine::load(
        InMemoryStorage::new(),
        ManualClock::new(1_000),
        EngineConfig::default(),
    )
}

fn rng() -> DeterministicRng {
    DeterministicRng::from_seed(7)
}

fn add_player(engine: &mut TestEngine, name: &str) -> PlayerId {
    let response = dispatch(
        engine,
        &mut rng(),
        Command::AddPlayer(AddPlayerCommand {
            name: name.to_string(),
            initial_balance: Money::new(1000),
        }),
    )
    .expect("add player");
    match response {
        CommandResponse::PlayerAdded(dto) => dto.id,
        other => panic!("неожиданный ответ: {other:?}"),
    }
}

//
// валидация
//

#[test]
fn player_name_must_be_short_and_non_empty() {
    assert_eq!(validate_player_name("Алиса"), Ok(()));
    assert_eq!(validate_player_name("  Алиса  "), Ok(()));

    assert_eq!(validate_player_name(""), Err(ValidationError::EmptyPlayerName));
    assert_eq!(validate_player_name("   "), Err(ValidationError::EmptyPlayerName));

    let long = "ы".repeat(51);
    assert_eq!(
        validate_player_name(&long),
        Err(ValidationError::PlayerNameTooLong)
    );
    // ровно 50 символов (не байт) — допустимо
    assert_eq!(validate_player_name(&"ы".repeat(50)), Ok(()));
}

#[test]
fn balance_and_bet_bounds() {
    assert_eq!(validate_balance(Money::new(1_000_000)), Ok(()));
    assert_eq!(validate_balance(Money::new(-1_000_000)), Ok(()));
    assert_eq!(
        validate_balance(Money::new(1_000_001)),
        Err(ValidationError::BalanceOutOfRange)
    );

    assert_eq!(validate_start_bet(Money::new(1)), Ok(()));
    assert_eq!(
        validate_start_bet(Money::ZERO),
        Err(ValidationError::StartBetNotPositive)
    );
    assert_eq!(
        validate_start_bet(Money::new(-5)),
        Err(ValidationError::StartBetNotPositive)
    );
    assert_eq!(
        validate_start_bet(Money::new(100_001)),
        Err(ValidationError::StartBetTooLarge)
    );
}

#[test]
fn game_needs_two_to_ten_players() {
    let ids: Vec<PlayerId> = (0..10).map(|i| format!("p-{i}")).collect();

    assert_eq!(validate_player_selection(&ids[..2]), Ok(()));
    assert_eq!(validate_player_selection(&ids), Ok(()));
    assert_eq!(
        validate_player_selection(&ids[..1]),
        Err(ValidationError::TooFewPlayers)
    );

    let many: Vec<PlayerId> = (0..11).map(|i| format!("p-{i}")).collect();
    assert_eq!(
        validate_player_selection(&many),
        Err(ValidationError::TooManyPlayers)
    );
}

//
// диспетчер команд
//

#[test]
fn dispatch_runs_full_game() {
    let mut engine = new_engine();
    let a = add_player(&mut engine, "Алиса");
    let b = add_player(&mut engine, "Борис");

    let created = dispatch(
        &mut engine,
        &mut rng(),
        Command::CreateGame(CreateGameCommand {
            player_ids: vec![a.clone(), b.clone()],
            start_bet: Money::new(100),
        }),
    )
    .expect("create game");
    assert!(matches!(created, CommandResponse::GameCreated { .. }));

    let collected = dispatch(
        &mut engine,
        &mut rng(),
        Command::CollectRow(CollectRowCommand {
            player_id: b.clone(),
            row: RowType::Middle,
        }),
    )
    .expect("collect middle");
    assert_eq!(
        collected,
        CommandResponse::RowCollected {
            row: RowType::Middle,
            amount: Some(Money::new(100)),
            skipped: Vec::new(),
        }
    );

    dispatch(
        &mut engine,
        &mut rng(),
        Command::CollectRow(CollectRowCommand {
            player_id: a.clone(),
            row: RowType::Bottom,
        }),
    )
    .expect("collect bottom");

    let game = engine.current_game().expect("game");
    assert_eq!(game.status, GameStatus::Finished);
}

#[test]
fn dispatch_validates_before_touching_engine() {
    let mut engine = new_engine();
    let a = add_player(&mut engine, "Алиса");

    // пустое имя отсекается валидацией
    let err = dispatch(
        &mut engine,
        &mut rng(),
        Command::AddPlayer(AddPlayerCommand {
            name: "   ".to_string(),
            initial_balance: Money::ZERO,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    // один игрок — мало для игры; движок не вызывался
    let err = dispatch(
        &mut engine,
        &mut rng(),
        Command::CreateGame(CreateGameCommand {
            player_ids: vec![a],
            start_bet: Money::new(100),
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(engine.games().is_empty());
}

#[test]
fn dispatch_maps_domain_errors() {
    let mut engine = new_engine();
    let a = add_player(&mut engine, "Алиса");

    // дубликат имени — ошибка реестра
    let err = dispatch(
        &mut engine,
        &mut rng(),
        Command::AddPlayer(AddPlayerCommand {
            name: "алиса".to_string(),
            initial_balance: Money::ZERO,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Ledger(_)));

    // сбор без активной игры — ошибка движка
    let err = dispatch(
        &mut engine,
        &mut rng(),
        Command::CollectRow(CollectRowCommand {
            player_id: a,
            row: RowType::Top,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Engine(_)));
}

#[test]
fn dispatch_undo_player_action() {
    let mut engine = new_engine();
    let a = add_player(&mut engine, "Алиса");
    let b = add_player(&mut engine, "Борис");

    dispatch(
        &mut engine,
        &mut rng(),
        Command::CreateGame(CreateGameCommand {
            player_ids: vec![a.clone(), b.clone()],
            start_bet: Money::new(100),
        }),
    )
    .expect("create game");

    dispatch(
        &mut engine,
        &mut rng(),
        Command::CollectRow(CollectRowCommand {
            player_id: a.clone(),
            row: RowType::Top,
        }),
    )
    .expect("collect top");

    // чужое действие отменить нельзя
    let err = dispatch(
        &mut engine,
        &mut rng(),
        Command::UndoPlayerAction { player_id: b },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Engine(_)));

    // своё — можно
    dispatch(
        &mut engine,
        &mut rng(),
        Command::UndoPlayerAction { player_id: a.clone() },
    )
    .expect("undo");
    assert_eq!(engine.ledger().balance(&a), Some(Money::new(900)));
}

#[test]
fn commands_round_trip_through_json() {
    let command = Command::CreateGame(CreateGameCommand {
        player_ids: vec!["p-1".to_string(), "p-2".to_string()],
        start_bet: Money::new(100),
    });

    let json = serde_json::to_string(&command).expect("to_string");
    let back: Command = serde_json::from_str(&json).expect("from_str");

    match back {
        Command::CreateGame(cmd) => {
            assert_eq!(cmd.player_ids.len(), 2);
            assert_eq!(cmd.start_bet, Money::new(100));
        }
        other => panic!("неожиданная команда: {other:?}"),
    }
}

//
// запросы
//

#[test]
fn queries_expose_game_view_with_resolved_names() {
    let mut engine = new_engine();
    let statistics = Statistics::new();
    let a = add_player(&mut engine, "Алиса");
    let b = add_player(&mut engine, "Борис");

    // без игры — None
    match answer_query(&engine, &statistics, Query::GetCurrentGame) {
        QueryResponse::CurrentGame(None) => {}
        other => panic!("неожиданный ответ: {other:?}"),
    }

    dispatch(
        &mut engine,
        &mut rng(),
        Command::CreateGame(CreateGameCommand {
            player_ids: vec![a.clone(), b.clone()],
            start_bet: Money::new(100),
        }),
    )
    .expect("create game");
    dispatch(
        &mut engine,
        &mut rng(),
        Command::CollectRow(CollectRowCommand {
            player_id: a.clone(),
            row: RowType::Top,
        }),
    )
    .expect("collect top");

    // игрок исчез из реестра — в DTO он "Unknown"
    engine.remove_player(&b);

    let view = match answer_query(&engine, &statistics, Query::GetCurrentGame) {
        QueryResponse::CurrentGame(Some(view)) => view,
        other => panic!("неожиданный ответ: {other:?}"),
    };

    assert_eq!(view.status, GameStatus::Active);
    assert_eq!(view.bank, Money::new(300));
    assert_eq!(view.undo_depth, 1);
    assert_eq!(view.event_log.len(), 2);

    let names: Vec<&str> = view.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Алиса", "Unknown"]);
}

#[test]
fn player_stats_query_combines_ledger_and_statistics() {
    let mut engine = new_engine();
    let a = add_player(&mut engine, "Алиса");
    let b = add_player(&mut engine, "Борис");

    dispatch(
        &mut engine,
        &mut rng(),
        Command::CreateGame(CreateGameCommand {
            player_ids: vec![a.clone(), b],
            start_bet: Money::new(100),
        }),
    )
    .expect("create game");
    dispatch(
        &mut engine,
        &mut rng(),
        Command::CollectRow(CollectRowCommand {
            player_id: a.clone(),
            row: RowType::Bottom,
        }),
    )
    .expect("collect bottom");

    let mut statistics = Statistics::new();
    statistics.record_game(engine.current_game().expect("game"), engine.ledger());

    let stats = match answer_query(
        &engine,
        &statistics,
        Query::GetPlayerStats { player_id: a.clone() },
    ) {
        QueryResponse::PlayerStats(dto) => dto,
        other => panic!("неожиданный ответ: {other:?}"),
    };

    assert_eq!(stats.player_id, a);
    assert_eq!(stats.name, "Алиса");
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.earnings, Money::new(100));
}

#[test]
fn current_game_stats_query_tracks_bank() {
    let mut engine = new_engine();
    let statistics = Statistics::new();
    let a = add_player(&mut engine, "Алиса");
    let b = add_player(&mut engine, "Борис");

    match answer_query(&engine, &statistics, Query::GetCurrentGameStats) {
        QueryResponse::CurrentGameStats(None) => {}
        other => panic!("неожиданный ответ: {other:?}"),
    }

    dispatch(
        &mut engine,
        &mut rng(),
        Command::CreateGame(CreateGameCommand {
            player_ids: vec![a.clone(), b.clone()],
            start_bet: Money::new(100),
        }),
    )
    .expect("create game");

    let stats = match answer_query(&engine, &statistics, Query::GetCurrentGameStats) {
        QueryResponse::CurrentGameStats(Some(stats)) => stats,
        other => panic!("неожиданный ответ: {other:?}"),
    };
    assert_eq!(stats.bank, Money::new(200));
    assert_eq!(stats.start_bet, Money::new(100));
    assert_eq!(stats.players.len(), 2);
    assert_eq!(stats.players[0].name, "Алиса");
}

#[test]
fn list_queries_return_everything() {
    let mut engine = new_engine();
    let statistics = Statistics::new();
    let a = add_player(&mut engine, "Алиса");
    let b = add_player(&mut engine, "Борис");

    for _ in 0..2 {
        dispatch(
            &mut engine,
            &mut rng(),
            Command::CreateGame(CreateGameCommand {
                player_ids: vec![a.clone(), b.clone()],
                start_bet: Money::new(10),
            }),
        )
        .expect("create game");
        dispatch(
            &mut engine,
            &mut rng(),
            Command::CollectRow(CollectRowCommand {
                player_id: a.clone(),
                row: RowType::Bottom,
            }),
        )
        .expect("collect bottom");
    }

    match answer_query(&engine, &statistics, Query::ListGames) {
        QueryResponse::Games(games) => assert_eq!(games.len(), 2),
        other => panic!("неожиданный ответ: {other:?}"),
    }
    match answer_query(&engine, &statistics, Query::ListPlayers) {
        QueryResponse::Players(players) => assert_eq!(players.len(), 2),
        other => panic!("неожиданный ответ: {other:?}"),
    }
}

// src/bin/loto_dev_cli.rs
//
// Скриптовый dev-прогон движка: создаём игроков, играем партию,
// отменяем действие и печатаем журнал со статистикой.

use loto_engine::domain::Money;
use loto_engine::engine::{EngineConfig, LotoEngine};
use loto_engine::infra::{InMemoryStorage, SystemClock, SystemRng};
use loto_engine::infra::mapping::PlayerNameResolver;
use loto_engine::stats::Statistics;

fn main() {
    env_logger::init();

    println!("loto_dev_cli: стартуем dev-прогон движка лото…");

    let mut engine = LotoEngine::load(InMemoryStorage::new(), SystemClock, EngineConfig::default());
    let mut rng = SystemRng;

    // 1. Игроки
    let alice = engine
        .add_player("Алиса", Money::new(1_000))
        .expect("добавить Алису");
    let boris = engine
        .add_player("Борис", Money::new(1_000))
        .expect("добавить Бориса");
    let vera = engine
        .add_player("Вера", Money::new(1_000))
        .expect("добавить Веру");

    println!();
    println!("================ НОВАЯ ИГРА =================");

    // 2. Партия: ставка 100, три игрока
    let created = engine
        .create_game(
            &[alice.id.clone(), boris.id.clone(), vera.id.clone()],
            Money::new(100),
            &mut rng,
        )
        .expect("создать игру");
    println!("игра {} создана, пропущено: {:?}", created.game_id, created.skipped);
    print_balances(&engine);

    // 3. Борис собирает средний ряд (забирает половину банка)
    let collected = engine.collect_middle(&boris.id).expect("средний ряд");
    println!(
        "Борис собрал средний ряд, выплата: {}₽",
        collected.amount.unwrap_or(Money::ZERO)
    );
    print_balances(&engine);

    // 4. Отмена и повтор
    engine.undo_player_last_action(&boris.id).expect("отменить");
    println!("действие Бориса отменено");
    print_balances(&engine);

    engine.collect_middle(&boris.id).expect("средний ряд снова");

    // 5. Алиса собирает нижний ряд — игра завершается
    let finished = engine.collect_bottom(&alice.id).expect("нижний ряд");
    println!(
        "Алиса собрала нижний ряд, банк {}₽, игра завершена",
        finished.amount.unwrap_or(Money::ZERO)
    );
    print_balances(&engine);

    // 6. Журнал событий
    println!();
    println!("================ ЖУРНАЛ =================");
    if let Some(game) = engine.current_game() {
        for entry in game.event_log.entries() {
            println!("[{}] {}", entry.timestamp, entry.description);
        }
    }

    // 7. Статистика
    let mut statistics = Statistics::new();
    if let Some(game) = engine.current_game() {
        statistics.record_game(game, engine.ledger());
    }
    println!();
    println!("================ СТАТИСТИКА =================");
    println!("всего игр: {}", statistics.total_games);
    for player in engine.ledger().players() {
        let totals = statistics.player_totals(&player.id);
        println!(
            "{}: побед {}, выигрыш {}₽, баланс {}₽",
            player.name, totals.wins, totals.earnings, player.balance
        );
    }

    engine.flush_now();
    println!();
    println!("готово.");
}

fn print_balances<S, C>(engine: &LotoEngine<S, C>)
where
    S: loto_engine::infra::LotoStorage,
    C: loto_engine::infra::Clock,
{
    let bank = engine
        .current_game()
        .map(|g| g.bank)
        .unwrap_or(Money::ZERO);
    let balances: Vec<String> = engine
        .ledger()
        .players()
        .iter()
        .map(|p| format!("{} {}₽", engine.ledger().resolve_name(&p.id), p.balance))
        .collect();
    println!("  банк: {}₽ | {}", bank, balances.join(" | "));
}

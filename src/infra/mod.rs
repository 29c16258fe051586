//! Инфраструктурный слой вокруг движка лото:
//! - абстракция хранилища и её реализации (in-memory / JSON-файлы);
//! - часы (вместо обращения к системному времени из логики);
//! - отложенная запись с окном коалесинга;
//! - генерация ID;
//! - RNG-реализации для движка;
//! - маппинги domain → DTO.

pub mod clock;
pub mod debounce;
pub mod ids;
pub mod mapping;
pub mod rng;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::Debouncer;
pub use ids::IdGenerator;
pub use mapping::{
    map_current_game_stats, map_game_to_dto, map_player_to_dto, PlayerNameResolver,
};
pub use rng::{DeterministicRng, SystemRng};
pub use storage::{
    InMemoryStorage, JsonFileStorage, LotoStorage, StorageError, KEY_GAMES, KEY_PLAYERS,
    KEY_STATISTICS,
};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{GameId, PlayerId};

/// Генерация идентификаторов на основе монотонных счётчиков.
/// Идентификаторы — непрозрачные строки: снаружи никто не должен
/// разбирать их на части.
#[derive(Debug)]
pub struct IdGenerator {
    player_counter: AtomicU64,
    game_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор со стартовым значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            player_counter: AtomicU64::new(1),
            game_counter: AtomicU64::new(1),
        }
    }

    pub fn next_player_id(&self) -> PlayerId {
        format!("p-{}", self.player_counter.fetch_add(1, Ordering::Relaxed))
    }

    pub fn next_game_id(&self) -> GameId {
        format!("g-{}", self.game_counter.fetch_add(1, Ordering::Relaxed))
    }

    /// Сдвинуть счётчики за пределы уже выданных идентификаторов
    /// (после загрузки сохранённых данных). Чужие форматы игнорируются.
    pub fn resume_after<'a>(
        &self,
        player_ids: impl Iterator<Item = &'a str>,
        game_ids: impl Iterator<Item = &'a str>,
    ) {
        Self::bump(&self.player_counter, player_ids, "p-");
        Self::bump(&self.game_counter, game_ids, "g-");
    }

    fn bump<'a>(counter: &AtomicU64, ids: impl Iterator<Item = &'a str>, prefix: &str) {
        for id in ids {
            if let Some(n) = id.strip_prefix(prefix).and_then(|s| s.parse::<u64>().ok()) {
                counter.fetch_max(n.saturating_add(1), Ordering::Relaxed);
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::Timestamp;

/// Источник текущего времени. Логика никогда не обращается к системным
/// часам напрямую — время всегда приходит через этот трейт, поэтому
/// штампы событий и окна отложенной записи детерминируемы в тестах.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Системные часы (unix-время в миллисекундах).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Ручные часы для тестов: время двигается только явно.
/// Клоны разделяют одно и то же время, поэтому часами можно управлять
/// снаружи, даже когда движок владеет своей копией.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

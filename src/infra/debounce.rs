use crate::domain::Timestamp;

/// Отложенная запись с "хвостовым" окном: каждая отметка сдвигает дедлайн
/// на `window_ms` вперёд, так что пачка мутаций подряд превращается в одну
/// физическую запись после паузы.
///
/// Дебаунсер ничего не пишет сам — он только отвечает, пора ли писать.
/// Опрос делает владелец (движок) своим `flush_pending`.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window_ms: u64,
    deadline: Option<Timestamp>,
}

impl Debouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline: None,
        }
    }

    /// Отметить мутацию: дедлайн записи переносится на `now + window_ms`.
    pub fn mark(&mut self, now: Timestamp) {
        self.deadline = Some(now.saturating_add(self.window_ms));
    }

    /// Есть ли несброшенная отметка.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Наступил ли дедлайн.
    pub fn is_due(&self, now: Timestamp) -> bool {
        matches!(self.deadline, Some(d) if now >= d)
    }

    /// Если дедлайн наступил — сбросить его и вернуть true.
    pub fn take_due(&mut self, now: Timestamp) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Сбросить отметку независимо от времени (принудительный flush).
    pub fn take_any(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

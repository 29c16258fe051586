use serde::{Deserialize, Serialize};

/// Рядов на карточке.
pub const CARD_ROWS: usize = 3;
/// Чисел в одном ряду.
pub const CARD_ROW_LEN: usize = 5;
pub const MIN_CARD_NUMBER: u8 = 1;
pub const MAX_CARD_NUMBER: u8 = 90;

/// Ряд карточки. Сбор ряда — действие, запускающее движение денег.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    Top,
    Middle,
    Bottom,
}

impl RowType {
    pub const ALL: [RowType; CARD_ROWS] = [RowType::Top, RowType::Middle, RowType::Bottom];

    pub fn row_index(self) -> usize {
        match self {
            RowType::Top => 0,
            RowType::Middle => 1,
            RowType::Bottom => 2,
        }
    }
}

/// Карточка лото: 3 ряда по 5 чисел, все числа 1–90 различны,
/// каждый ряд отсортирован по возрастанию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LotoCard {
    pub rows: [[u8; CARD_ROW_LEN]; CARD_ROWS],
}

impl LotoCard {
    /// Собрать карточку из уже перемешанной последовательности чисел 1..=90:
    /// берём первые 15, режем на ряды и сортируем каждый ряд.
    /// Перемешивание делает движок через `RandomSource`.
    pub fn from_shuffled(numbers: &[u8]) -> LotoCard {
        debug_assert!(numbers.len() >= CARD_ROWS * CARD_ROW_LEN);

        let mut rows = [[0u8; CARD_ROW_LEN]; CARD_ROWS];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = numbers[r * CARD_ROW_LEN + c];
            }
            row.sort_unstable();
        }

        LotoCard { rows }
    }

    pub fn row(&self, row: RowType) -> &[u8; CARD_ROW_LEN] {
        &self.rows[row.row_index()]
    }

    /// Собран ли ряд: все его числа есть среди выпавших.
    pub fn is_row_collected(&self, row: RowType, drawn: &[u8]) -> bool {
        self.row(row).iter().all(|n| drawn.contains(n))
    }

    /// Какие ряды собраны при данном наборе выпавших чисел.
    pub fn collected_rows(&self, drawn: &[u8]) -> Vec<RowType> {
        RowType::ALL
            .iter()
            .copied()
            .filter(|row| self.is_row_collected(*row, drawn))
            .collect()
    }

    /// Проверка инвариантов карточки: диапазон, уникальность, сортировка рядов.
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; MAX_CARD_NUMBER as usize + 1];
        for row in &self.rows {
            for window in row.windows(2) {
                if window[0] >= window[1] {
                    return false;
                }
            }
            for &n in row {
                if !is_valid_number(n) || seen[n as usize] {
                    return false;
                }
                seen[n as usize] = true;
            }
        }
        true
    }
}

/// Допустимое число лото: 1–90.
pub fn is_valid_number(n: u8) -> bool {
    (MIN_CARD_NUMBER..=MAX_CARD_NUMBER).contains(&n)
}

/// Число для отображения, с ведущим нулём.
pub fn format_number(n: u8) -> String {
    format!("{n:02}")
}

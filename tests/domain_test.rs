// tests/domain_test.rs

use loto_engine::domain::{
    format_number, is_valid_number, LotoCard, Money, RowType, CARD_ROWS, CARD_ROW_LEN,
    MAX_CARD_NUMBER,
};

//
// money.rs
//

#[test]
fn money_basic_arithmetic() {
    let a = Money::new(100);
    let b = Money::new(40);

    assert_eq!(a + b, Money::new(140));
    assert_eq!(a - b, Money::new(60));
    assert_eq!(-a, Money::new(-100));
    assert_eq!(a * 3, Money::new(300));

    let mut acc = Money::ZERO;
    acc += a;
    acc -= b;
    assert_eq!(acc, Money::new(60));
}

#[test]
fn money_half_down_rounds_to_floor() {
    assert_eq!(Money::new(300).half_down(), Money::new(150));
    assert_eq!(Money::new(301).half_down(), Money::new(150));
    assert_eq!(Money::new(1).half_down(), Money::ZERO);
    // floor, а не усечение к нулю
    assert_eq!(Money::new(-3).half_down(), Money::new(-2));
}

#[test]
fn money_saturates_instead_of_overflowing() {
    assert_eq!(Money::new(i64::MAX) + Money::new(1), Money::new(i64::MAX));
    assert_eq!(Money::new(i64::MIN) - Money::new(1), Money::new(i64::MIN));
    assert_eq!(Money::new(i64::MAX) * 2, Money::new(i64::MAX));
}

#[test]
fn money_sum_and_display() {
    let total: Money = vec![Money::new(1), Money::new(2), Money::new(3)]
        .into_iter()
        .sum();
    assert_eq!(total, Money::new(6));
    assert_eq!(format!("{}", Money::new(42)), "42");
    assert_eq!(format!("{}", Money::new(-7)), "-7");
}

#[test]
fn money_is_negative_and_zero() {
    assert!(Money::new(-1).is_negative());
    assert!(!Money::ZERO.is_negative());
    assert!(Money::ZERO.is_zero());
}

#[test]
fn money_serializes_as_plain_number() {
    let json = serde_json::to_string(&Money::new(150)).expect("serialize");
    assert_eq!(json, "150");
    let back: Money = serde_json::from_str("150").expect("deserialize");
    assert_eq!(back, Money::new(150));
}

//
// card.rs
//

fn identity_numbers() -> Vec<u8> {
    (1..=MAX_CARD_NUMBER).collect()
}

#[test]
fn card_from_shuffled_takes_first_fifteen() {
    let card = LotoCard::from_shuffled(&identity_numbers());
    assert_eq!(card.rows[0], [1, 2, 3, 4, 5]);
    assert_eq!(card.rows[1], [6, 7, 8, 9, 10]);
    assert_eq!(card.rows[2], [11, 12, 13, 14, 15]);
    assert!(card.is_valid());
}

#[test]
fn card_rows_are_sorted_ascending() {
    let mut numbers = identity_numbers();
    numbers.reverse(); // 90, 89, 88, …
    let card = LotoCard::from_shuffled(&numbers);

    assert_eq!(card.rows[0], [86, 87, 88, 89, 90]);
    assert_eq!(card.rows[1], [81, 82, 83, 84, 85]);
    assert!(card.is_valid());
}

#[test]
fn card_validity_catches_duplicates_and_range() {
    let mut card = LotoCard::from_shuffled(&identity_numbers());
    assert!(card.is_valid());

    card.rows[1][0] = card.rows[0][0]; // дубликат между рядами
    assert!(!card.is_valid());

    let mut card = LotoCard::from_shuffled(&identity_numbers());
    card.rows[2] = [0, 1, 2, 3, 4]; // 0 вне диапазона
    assert!(!card.is_valid());
}

#[test]
fn card_collected_rows_by_drawn_numbers() {
    let card = LotoCard::from_shuffled(&identity_numbers());

    let drawn: Vec<u8> = vec![1, 2, 3, 4, 5, 11, 12, 13, 14, 15];
    assert!(card.is_row_collected(RowType::Top, &drawn));
    assert!(!card.is_row_collected(RowType::Middle, &drawn));
    assert_eq!(card.collected_rows(&drawn), vec![RowType::Top, RowType::Bottom]);

    assert!(card.collected_rows(&[]).is_empty());
}

#[test]
fn card_shape_constants() {
    assert_eq!(CARD_ROWS, 3);
    assert_eq!(CARD_ROW_LEN, 5);
}

#[test]
fn loto_number_validation_and_formatting() {
    assert!(is_valid_number(1));
    assert!(is_valid_number(90));
    assert!(!is_valid_number(0));
    assert!(!is_valid_number(91));

    assert_eq!(format_number(7), "07");
    assert_eq!(format_number(90), "90");
}

#[test]
fn row_type_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&RowType::Top).expect("json"), "\"top\"");
    assert_eq!(
        serde_json::to_string(&RowType::Bottom).expect("json"),
        "\"bottom\""
    );
}

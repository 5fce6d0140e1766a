//! Order-number allocation arithmetic and formats.
//!
//! The database side of allocation (unique index + retry) needs a live
//! `PostgreSQL`; these tests pin down everything that does not: date
//! handling, sequence arithmetic, and the `DD-MM-NN` format.

use fournil_core::{DeliveryDate, OrderNumber, next_sequence};

#[test]
fn first_order_of_an_empty_month() {
    let delivery = DeliveryDate::parse("2025-01-12").expect("valid date");
    let number = OrderNumber::new(delivery, next_sequence(None));
    assert_eq!(number.to_string(), "12-01-01");
}

#[test]
fn sequence_is_scoped_to_the_month_not_the_day() {
    // Second January order is for an earlier day; it still gets sequence 2.
    let delivery = DeliveryDate::parse("2025-01-05").expect("valid date");
    let number = OrderNumber::new(delivery, next_sequence(Some(1)));
    assert_eq!(number.to_string(), "05-01-02");
}

#[test]
fn existing_maximum_drives_the_next_sequence_regardless_of_day() {
    // Month maximum is "20-03-09"; any March day allocates sequence 10.
    let max = OrderNumber::parse("20-03-09").expect("valid number");
    for day in ["2025-03-01", "2025-03-20", "2025-03-31"] {
        let delivery = DeliveryDate::parse(day).expect("valid date");
        let number = OrderNumber::new(delivery, next_sequence(Some(max.sequence())));
        assert_eq!(number.sequence(), 10);
    }
}

#[test]
fn serialized_allocations_increase_by_one() {
    let delivery = DeliveryDate::parse("2025-06-15").expect("valid date");
    let mut max = None;
    let mut previous = 0;
    for _ in 0..120 {
        let sequence = next_sequence(max);
        assert_eq!(sequence, previous + 1);
        previous = sequence;
        max = Some(sequence);
    }
    // Past 99 the number widens instead of truncating
    let number = OrderNumber::new(delivery, previous);
    assert_eq!(number.to_string(), "15-06-120");
}

#[test]
fn delivery_date_is_split_never_time_parsed() {
    // The exact string the client picked is the date that is used; there
    // is no time zone that could shift it.
    let delivery = DeliveryDate::parse("2025-12-31").expect("valid date");
    assert_eq!(delivery.year(), 2025);
    assert_eq!(delivery.month(), 12);
    assert_eq!(delivery.day(), 31);
    assert_eq!(delivery.to_string(), "2025-12-31");
}

#[test]
fn malformed_stored_numbers_error_instead_of_panicking() {
    for garbage in ["12-01-XX", "banana", "", "12-01", "12-01-01-01"] {
        assert!(OrderNumber::parse(garbage).is_err(), "{garbage:?}");
    }
}

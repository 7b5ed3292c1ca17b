//! Payment eligibility rule.
//!
//! A bill is payable only while the calendar is inside its billing
//! month. The caller supplies `today` explicitly, so the rule stays
//! pure and the month-boundary behavior is testable; nothing here
//! reads a global clock or caches an answer.

use chrono::{Datelike, NaiveDate};

use crate::domain::models::bill::Bill;

/// True iff `bill.date` falls in the same calendar month and year as
/// `today`. Recomputed on every call, so the answer for one bill can
/// flip across a month boundary between two calls.
pub fn is_payable(bill: &Bill, today: NaiveDate) -> bool {
    bill.date.month() == today.month() && bill.date.year() == today.year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::bill::BillCategory;

    fn bill_dated(date: NaiveDate) -> Bill {
        Bill {
            id: "bill-1".to_string(),
            category: BillCategory::Electricity,
            title: "Electricity bill".to_string(),
            description: "Monthly electricity usage".to_string(),
            location: "Dhaka".to_string(),
            amount: 1200.0,
            date,
            image: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_payable_within_same_month() {
        let bill = bill_dated(d(2025, 7, 3));
        assert!(is_payable(&bill, d(2025, 7, 1)));
        assert!(is_payable(&bill, d(2025, 7, 31)));
    }

    #[test]
    fn test_not_payable_in_adjacent_months() {
        let bill = bill_dated(d(2025, 7, 31));
        // Last day of July vs first day of August
        assert!(is_payable(&bill, d(2025, 7, 31)));
        assert!(!is_payable(&bill, d(2025, 8, 1)));
        // And the day before the month starts
        assert!(!is_payable(&bill, d(2025, 6, 30)));
    }

    #[test]
    fn test_same_month_different_year_is_not_payable() {
        let bill = bill_dated(d(2024, 7, 15));
        assert!(!is_payable(&bill, d(2025, 7, 15)));
    }

    #[test]
    fn test_answer_changes_across_month_boundary() {
        let bill = bill_dated(d(2025, 2, 28));
        assert!(is_payable(&bill, d(2025, 2, 28)));
        assert!(!is_payable(&bill, d(2025, 3, 1)));
    }
}

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::{Possession, SharedPossession};
use crate::error::EvaluationError;

/// A recurring monthly flow of money (salary, rent, subscription).
///
/// `amount` is added once per month on `day_of_month`, clamped to the last
/// day of shorter months, for every occurrence in `(created_at, min(target, end)]`.
/// Occurrences on the creation date are considered already included in the
/// book value, which keeps projection composable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluxArgent {
    name: String,
    created_at: NaiveDate,
    end: NaiveDate,
    book_value: i64,
    amount: i64,
    day_of_month: u32,
}

impl FluxArgent {
    /// Creates a flow.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::InvalidDate` if `day_of_month` is not in
    /// `1..=31`.
    pub fn new(
        name: impl Into<String>,
        created_at: NaiveDate,
        end: NaiveDate,
        book_value: i64,
        amount: i64,
        day_of_month: u32,
    ) -> Result<Self, EvaluationError> {
        if !(1..=31).contains(&day_of_month) {
            return Err(EvaluationError::invalid_date(format!(
                "day of month {day_of_month} is not in 1..=31"
            )));
        }
        Ok(Self {
            name: name.into(),
            created_at,
            end,
            book_value,
            amount,
            day_of_month,
        })
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Number of payment dates in `(self.created_at, limit]`.
    fn occurrences_until(&self, limit: NaiveDate) -> i64 {
        if limit <= self.created_at {
            return 0;
        }
        let first = month_index(self.created_at);
        let last = month_index(limit);

        let first_counts = self
            .occurrence(first)
            .is_some_and(|date| date > self.created_at && date <= limit);
        if first == last {
            return i64::from(first_counts);
        }

        let last_counts = self.occurrence(last).is_some_and(|date| date <= limit);
        (last - first - 1) + i64::from(first_counts) + i64::from(last_counts)
    }

    fn occurrence(&self, index: i64) -> Option<NaiveDate> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        (28..=self.day_of_month.max(28))
            .rev()
            .map(|day| day.min(self.day_of_month))
            .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

impl Possession for FluxArgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    fn book_value(&self) -> i64 {
        self.book_value
    }

    fn book_value_at(&self, target: NaiveDate) -> i64 {
        if !self.is_held_at(target) {
            return 0;
        }
        let occurrences = self.occurrences_until(target.min(self.end));
        self.book_value
            .saturating_add(self.amount.saturating_mul(occurrences))
    }

    fn project(&self, target: NaiveDate) -> SharedPossession {
        if !self.is_held_at(target) {
            return Arc::new(self.clone());
        }
        Arc::new(Self {
            name: self.name.clone(),
            created_at: target,
            end: self.end,
            book_value: self.book_value_at(target),
            amount: self.amount,
            day_of_month: self.day_of_month,
        })
    }

    fn kind(&self) -> &'static str {
        "flux_argent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DATE_MAX;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_counts_monthly_occurrences() {
        let salary = FluxArgent::new("Salaire", d(2025, 1, 1), DATE_MAX, 0, 1500, 28).unwrap();
        assert_eq!(salary.book_value_at(d(2025, 1, 27)), 0);
        assert_eq!(salary.book_value_at(d(2025, 1, 28)), 1500);
        assert_eq!(salary.book_value_at(d(2025, 6, 30)), 6 * 1500);
    }

    #[test]
    fn test_creation_day_occurrence_is_not_counted() {
        let rent = FluxArgent::new("Loyer", d(2025, 1, 5), DATE_MAX, 0, -600, 5).unwrap();
        assert_eq!(rent.book_value_at(d(2025, 1, 5)), 0);
        assert_eq!(rent.book_value_at(d(2025, 2, 5)), -600);
    }

    #[test]
    fn test_day_clamps_to_month_end() {
        let flow = FluxArgent::new("Prime", d(2025, 1, 31), DATE_MAX, 0, 100, 31).unwrap();
        // February pays on the 28th.
        assert_eq!(flow.book_value_at(d(2025, 2, 27)), 0);
        assert_eq!(flow.book_value_at(d(2025, 2, 28)), 100);
        assert_eq!(flow.book_value_at(d(2025, 4, 30)), 300);
    }

    #[test]
    fn test_stops_at_end() {
        let flow = FluxArgent::new("Bourse", d(2025, 1, 1), d(2025, 3, 15), 200, 100, 10).unwrap();
        assert_eq!(flow.book_value_at(d(2030, 1, 1)), 200 + 3 * 100);
    }

    #[test]
    fn test_projection_composes() {
        let flow = FluxArgent::new("Salaire", d(2025, 1, 1), DATE_MAX, 0, 1000, 15).unwrap();
        let mid = flow.project(d(2025, 3, 15));
        assert_eq!(mid.book_value(), 3000);
        assert_eq!(mid.book_value_at(d(2025, 12, 31)), flow.book_value_at(d(2025, 12, 31)));
    }

    #[test]
    fn test_projection_to_maximum_date() {
        let flow = FluxArgent::new("Salaire", d(2025, 1, 1), d(2026, 1, 1), 0, 10, 1).unwrap();
        assert_eq!(flow.book_value_at(DATE_MAX), 120);
    }

    #[test]
    fn test_nothing_before_start() {
        let flow = FluxArgent::new("Salaire", d(2025, 3, 1), DATE_MAX, 500, 100, 1).unwrap();
        assert_eq!(flow.book_value_at(d(2025, 2, 28)), 0);
        assert_eq!(flow.project(d(2025, 1, 1)).book_value(), 500);
    }

    #[test]
    fn test_rejects_bad_day() {
        assert!(FluxArgent::new("X", d(2025, 1, 1), DATE_MAX, 0, 1, 0).is_err());
        assert!(FluxArgent::new("X", d(2025, 1, 1), DATE_MAX, 0, 1, 32).is_err());
    }
}

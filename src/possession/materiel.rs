use std::sync::Arc;

use chrono::NaiveDate;

use super::{Possession, SharedPossession};
use crate::error::ValidationError;
use crate::time::calendar_years_between;

/// A physical asset that appreciates (or depreciates, for a negative rate)
/// linearly per elapsed calendar year.
///
/// Elapsed years are the difference of year numbers, not a prorated
/// duration: an asset created on 2020-12-31 is one year old on 2021-01-01.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use patrilang::{Materiel, Possession};
///
/// let created = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
/// let laptop = Materiel::new("Ordinateur", created, 1000, 0.10).unwrap();
/// let next_day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// assert_eq!(laptop.book_value_at(next_day), 1100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Materiel {
    name: String,
    created_at: NaiveDate,
    book_value: i64,
    annual_rate: f64,
}

impl Materiel {
    /// Creates a new asset.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRate` if `annual_rate` is NaN or
    /// infinite.
    pub fn new(
        name: impl Into<String>,
        created_at: NaiveDate,
        book_value: i64,
        annual_rate: f64,
    ) -> Result<Self, ValidationError> {
        if !annual_rate.is_finite() {
            return Err(ValidationError::InvalidRate { rate: annual_rate });
        }
        Ok(Self {
            name: name.into(),
            created_at,
            book_value,
            annual_rate,
        })
    }

    #[must_use]
    pub const fn annual_rate(&self) -> f64 {
        self.annual_rate
    }
}

impl Possession for Materiel {
    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    fn book_value(&self) -> i64 {
        self.book_value
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn book_value_at(&self, target: NaiveDate) -> i64 {
        if !self.is_held_at(target) {
            return 0;
        }
        let years = calendar_years_between(self.created_at, target);
        let factor = 1.0 + self.annual_rate * years as f64;
        // `as` truncates toward zero and saturates at the i64 bounds.
        (self.book_value as f64 * factor) as i64
    }

    fn project(&self, target: NaiveDate) -> SharedPossession {
        if !self.is_held_at(target) {
            return Arc::new(self.clone());
        }
        Arc::new(Self {
            name: self.name.clone(),
            created_at: target,
            book_value: self.book_value_at(target),
            annual_rate: self.annual_rate,
        })
    }

    fn kind(&self) -> &'static str {
        "materiel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_calendar_year_difference_counts_one_day_as_a_year() {
        let m = Materiel::new("Voiture", d(2020, 12, 31), 1000, 0.10).unwrap();
        assert_eq!(m.book_value_at(d(2021, 1, 1)), 1100);
    }

    #[test]
    fn test_same_year_keeps_initial_value() {
        let m = Materiel::new("Voiture", d(2021, 1, 1), 1000, 0.10).unwrap();
        assert_eq!(m.book_value_at(d(2021, 12, 31)), 1000);
    }

    #[test]
    fn test_depreciation() {
        let m = Materiel::new("Ordinateur", d(2021, 6, 1), 1000, -0.20).unwrap();
        assert_eq!(m.book_value_at(d(2023, 6, 1)), 600);
    }

    #[test]
    fn test_result_truncates_toward_zero() {
        let m = Materiel::new("Tableau", d(2021, 6, 1), 999, 0.15).unwrap();
        // 999 * 1.15 = 1148.85
        assert_eq!(m.book_value_at(d(2022, 1, 1)), 1148);

        let debt_like = Materiel::new("Passif", d(2021, 6, 1), -999, 0.15).unwrap();
        assert_eq!(debt_like.book_value_at(d(2022, 1, 1)), -1148);
    }

    #[test]
    fn test_project_rebases_value_and_date() {
        let m = Materiel::new("Voiture", d(2020, 3, 1), 1000, 0.10).unwrap();
        let projected = m.project(d(2022, 3, 1));
        assert_eq!(projected.name(), "Voiture");
        assert_eq!(projected.created_at(), d(2022, 3, 1));
        assert_eq!(projected.book_value(), 1200);
        assert_eq!(projected.kind(), "materiel");
    }

    #[test]
    fn test_not_valued_before_purchase() {
        let m = Materiel::new("Maison", d(2027, 3, 1), 100_000, 0.1).unwrap();
        assert_eq!(m.book_value_at(d(2025, 6, 1)), 0);
        assert_eq!(m.book_value_at(d(2027, 2, 28)), 0);
        assert_eq!(m.book_value_at(d(2027, 3, 1)), 100_000);

        let earlier = m.project(d(2025, 6, 1));
        assert_eq!(earlier.created_at(), d(2027, 3, 1));
        assert_eq!(earlier.book_value(), 100_000);
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        assert!(matches!(
            Materiel::new("X", d(2021, 1, 1), 1, f64::NAN),
            Err(ValidationError::InvalidRate { .. })
        ));
    }
}

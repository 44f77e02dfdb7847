use std::sync::Arc;

use chrono::NaiveDate;

use super::{Possession, SharedPossession};

/// Cash held on an account. Its value does not move on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argent {
    name: String,
    created_at: NaiveDate,
    book_value: i64,
}

impl Argent {
    #[must_use]
    pub fn new(name: impl Into<String>, created_at: NaiveDate, book_value: i64) -> Self {
        Self {
            name: name.into(),
            created_at,
            book_value,
        }
    }
}

impl Possession for Argent {
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
        if self.is_held_at(target) {
            self.book_value
        } else {
            0
        }
    }

    fn project(&self, target: NaiveDate) -> SharedPossession {
        if !self.is_held_at(target) {
            return Arc::new(self.clone());
        }
        Arc::new(Self::new(self.name.clone(), target, self.book_value))
    }

    fn kind(&self) -> &'static str {
        "argent"
    }
}

/// A debt. Whatever sign the amount is declared with, it is held as a
/// negative book value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dette {
    name: String,
    created_at: NaiveDate,
    book_value: i64,
}

impl Dette {
    #[must_use]
    pub fn new(name: impl Into<String>, created_at: NaiveDate, amount: i64) -> Self {
        Self {
            name: name.into(),
            created_at,
            book_value: -amount.saturating_abs(),
        }
    }
}

impl Possession for Dette {
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
        if self.is_held_at(target) {
            self.book_value
        } else {
            0
        }
    }

    fn project(&self, target: NaiveDate) -> SharedPossession {
        if !self.is_held_at(target) {
            return Arc::new(self.clone());
        }
        Arc::new(Self {
            name: self.name.clone(),
            created_at: target,
            book_value: self.book_value,
        })
    }

    fn kind(&self) -> &'static str {
        "dette"
    }
}

use std::sync::Arc;

use chrono::NaiveDate;

use super::{Possession, SharedPossession};

/// Another possession shown under a `"{label}: {name}"` name.
///
/// The reconciler uses it to hold the planned and the done version of the
/// same possession side by side in one patrimony.
#[derive(Debug, Clone)]
pub struct Labeled {
    label: String,
    name: String,
    inner: SharedPossession,
}

impl Labeled {
    #[must_use]
    pub fn new(label: impl Into<String>, inner: SharedPossession) -> Self {
        let label = label.into();
        let name = format!("{label}: {}", inner.name());
        Self { label, name, inner }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn inner(&self) -> &SharedPossession {
        &self.inner
    }
}

impl Possession for Labeled {
    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> NaiveDate {
        self.inner.created_at()
    }

    fn book_value(&self) -> i64 {
        self.inner.book_value()
    }

    fn book_value_at(&self, target: NaiveDate) -> i64 {
        self.inner.book_value_at(target)
    }

    fn project(&self, target: NaiveDate) -> SharedPossession {
        Arc::new(Self {
            label: self.label.clone(),
            name: self.name.clone(),
            inner: self.inner.project(target),
        })
    }

    fn kind(&self) -> &'static str {
        self.inner.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::possession::Materiel;

    #[test]
    fn test_labeled_delegates_valuation() {
        let t0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let t1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let inner: SharedPossession = Arc::new(Materiel::new("Voiture", t0, 1000, 0.5).unwrap());
        let labeled = Labeled::new("Prévu", inner);

        assert_eq!(labeled.name(), "Prévu: Voiture");
        assert_eq!(labeled.label(), "Prévu");
        assert_eq!(labeled.book_value_at(t1), 1500);
        assert_eq!(labeled.kind(), "materiel");

        let projected = labeled.project(t1);
        assert_eq!(projected.name(), "Prévu: Voiture");
        assert_eq!(projected.book_value(), 1500);
    }
}

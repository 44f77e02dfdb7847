//! Calendar arithmetic for scenario dates.
//!
//! Dates are `chrono::NaiveDate`. The "indeterminate"/"maximum" keywords map
//! to [`NaiveDate::MAX`] and "minimum" maps to [`NaiveDate::MIN`]. Shifting a
//! date past either bound is an [`EvaluationError::InvalidDate`].

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;

/// Sentinel used for "indeterminate" and "maximum" dates.
pub const DATE_MAX: NaiveDate = NaiveDate::MAX;

/// Sentinel used for "minimum" dates.
pub const DATE_MIN: NaiveDate = NaiveDate::MIN;

/// A signed calendar offset applied years first, then months, then weeks as
/// days, then days.
///
/// Each step is applied to the result of the previous one, so month-end
/// clamping happens before the day parts are added.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use patrilang::DateDelta;
///
/// let base = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let delta = DateDelta { months: 1, days: 1, ..DateDelta::default() };
/// // 2024-01-31 + 1 month = 2024-02-29, then + 1 day.
/// assert_eq!(delta.apply(base).unwrap(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDelta {
    /// Subtract instead of add.
    #[serde(default)]
    pub negative: bool,
    #[serde(default)]
    pub years: i64,
    #[serde(default)]
    pub months: i64,
    #[serde(default)]
    pub weeks: i64,
    #[serde(default)]
    pub days: i64,
}

impl DateDelta {
    /// Applies the offset to `base`.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::InvalidDate` if any intermediate date falls
    /// outside the representable calendar.
    pub fn apply(&self, base: NaiveDate) -> Result<NaiveDate, EvaluationError> {
        let week_days = self
            .weeks
            .checked_mul(7)
            .ok_or_else(|| EvaluationError::invalid_date("week offset overflows"))?;

        let date = shift_years(base, self.signed(self.years, "year")?)?;
        let date = shift_months(date, self.signed(self.months, "month")?)?;
        let date = shift_days(date, self.signed(week_days, "week")?)?;
        shift_days(date, self.signed(self.days, "day")?)
    }

    fn signed(&self, part: i64, unit: &str) -> Result<i64, EvaluationError> {
        if !self.negative {
            return Ok(part);
        }
        part.checked_neg().ok_or_else(|| {
            EvaluationError::invalid_date(format!("{unit} offset {part} overflows"))
        })
    }
}

/// Shifts a date by whole years, clamping Feb 29 to Feb 28 when needed.
pub fn shift_years(date: NaiveDate, years: i64) -> Result<NaiveDate, EvaluationError> {
    let months = years
        .checked_mul(12)
        .ok_or_else(|| EvaluationError::invalid_date(format!("{years} years overflows")))?;
    shift_months(date, months)
}

/// Shifts a date by whole months, clamping the day to the target month end.
pub fn shift_months(date: NaiveDate, months: i64) -> Result<NaiveDate, EvaluationError> {
    let magnitude = u32::try_from(months.unsigned_abs())
        .map_err(|_| EvaluationError::invalid_date(format!("{months} months overflows")))?;
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    };
    shifted.ok_or_else(|| {
        EvaluationError::invalid_date(format!("{date} shifted by {months} months is out of range"))
    })
}

/// Shifts a date by whole days.
pub fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, EvaluationError> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.ok_or_else(|| {
        EvaluationError::invalid_date(format!("{date} shifted by {days} days is out of range"))
    })
}

/// Builds a date from year, month and day, rejecting out-of-range parts.
pub fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, EvaluationError> {
    if !(1..=12).contains(&month) {
        return Err(EvaluationError::invalid_date(format!(
            "month {month} is not in 1..=12"
        )));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        EvaluationError::invalid_date(format!("{year}-{month:02}-{day:02} does not exist"))
    })
}

/// Maps a French month name to its 1-12 ordinal.
///
/// Matching ignores case and accents, so `"Février"`, `"fevrier"` and
/// `"FEVRIER"` all resolve to 2.
pub fn month_from_name(name: &str) -> Result<u32, EvaluationError> {
    let normalized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'é' | 'è' | 'ê' => 'e',
            'û' | 'ù' => 'u',
            'ô' => 'o',
            'à' | 'â' => 'a',
            other => other,
        })
        .collect();

    let month = match normalized.as_str() {
        "janvier" => 1,
        "fevrier" => 2,
        "mars" => 3,
        "avril" => 4,
        "mai" => 5,
        "juin" => 6,
        "juillet" => 7,
        "aout" => 8,
        "septembre" => 9,
        "octobre" => 10,
        "novembre" => 11,
        "decembre" => 12,
        _ => {
            return Err(EvaluationError::invalid_date(format!(
                "unknown month name '{name}'"
            )))
        }
    };
    Ok(month)
}

/// Number of calendar-year boundaries between two dates.
///
/// This is a plain difference of year numbers: 2020-12-31 to 2021-01-01
/// counts as one year.
#[must_use]
pub fn calendar_years_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year()) - i64::from(from.year())
}

/// Spacing between two samples of a [`Timeline`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleInterval {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl SampleInterval {
    /// The `index`-th sample after `start`, computed from `start` so month
    /// ends do not drift.
    fn nth(self, start: NaiveDate, index: usize) -> Option<NaiveDate> {
        let index = u32::try_from(index).ok()?;
        match self {
            Self::Daily => start.checked_add_days(Days::new(u64::from(index))),
            Self::Weekly => start.checked_add_days(Days::new(u64::from(index) * 7)),
            Self::Monthly => start.checked_add_months(Months::new(index)),
            Self::Yearly => start.checked_add_months(Months::new(index.checked_mul(12)?)),
        }
    }
}

/// A bounded, evenly sampled span of dates `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub interval: SampleInterval,
    pub max_samples: usize,
}

impl Timeline {
    #[must_use]
    pub const fn new(
        from: NaiveDate,
        to: NaiveDate,
        interval: SampleInterval,
        max_samples: usize,
    ) -> Self {
        Self {
            from,
            to,
            interval,
            max_samples,
        }
    }

    /// Sample dates in ascending order.
    ///
    /// The end date is always included when the sample budget allows it,
    /// even if it does not fall on the interval.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        if self.to < self.from || self.max_samples == 0 {
            return dates;
        }

        let mut index = 0;
        while dates.len() < self.max_samples {
            match self.interval.nth(self.from, index) {
                Some(date) if date <= self.to => dates.push(date),
                _ => break,
            }
            index += 1;
        }

        if dates.len() < self.max_samples && dates.last() != Some(&self.to) {
            dates.push(self.to);
        }
        dates
    }
}

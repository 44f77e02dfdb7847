use chrono::NaiveDate;

use super::NumericEvaluator;
use crate::ast::{DateAtom, DateDeltaNode, DateNode, MonthNode, NumericExpr};
use crate::error::EvaluationError;
use crate::scope::VariableScope;
use crate::time::{self, DateDelta, DATE_MAX, DATE_MIN};
use crate::value::VariableType;

/// Evaluates date expressions: a base date followed by an optional delta.
///
/// Numeric sub-expressions (day, month, year, delta parts) go through a
/// [`NumericEvaluator`] over the same scope and are truncated toward zero.
#[derive(Debug, Clone, Copy)]
pub struct DateEvaluator<'a> {
    scope: &'a VariableScope,
    numeric: NumericEvaluator<'a>,
}

impl<'a> DateEvaluator<'a> {
    #[must_use]
    pub const fn new(scope: &'a VariableScope) -> Self {
        Self {
            scope,
            numeric: NumericEvaluator::new(scope),
        }
    }

    /// Evaluates `node` to a calendar date.
    ///
    /// # Errors
    ///
    /// Propagates scope and numeric failures; returns `InvalidDate` for
    /// impossible dates, unknown month names or out-of-range shifts.
    pub fn evaluate(&self, node: &DateNode) -> Result<NaiveDate, EvaluationError> {
        let base = self.base_date(&node.atom)?;
        match &node.delta {
            None => Ok(base),
            Some(delta) => self.delta(delta)?.apply(base),
        }
    }

    fn base_date(&self, atom: &DateAtom) -> Result<NaiveDate, EvaluationError> {
        match atom {
            DateAtom::Indeterminate | DateAtom::Maximum => Ok(DATE_MAX),
            DateAtom::Minimum => Ok(DATE_MIN),
            DateAtom::Variable { name } => {
                let value = self.scope.get(name, VariableType::Date)?;
                value.as_date().ok_or_else(|| EvaluationError::TypeMismatch {
                    name: name.clone(),
                    expected: VariableType::Date,
                    actual: value.variable_type(),
                })
            }
            DateAtom::Construct { day, month, year } => {
                let day = self.integer(day, "day")?;
                let year = self.integer(year, "year")?;
                let month = match month {
                    MonthNode::Number(expr) => self.integer(expr, "month")?,
                    MonthNode::Name(name) => i64::from(time::month_from_name(name)?),
                };

                let year = i32::try_from(year).map_err(|_| {
                    EvaluationError::invalid_date(format!("year {year} is out of range"))
                })?;
                let month = u32::try_from(month).map_err(|_| {
                    EvaluationError::invalid_date(format!("month {month} is not in 1..=12"))
                })?;
                let day = u32::try_from(day).map_err(|_| {
                    EvaluationError::invalid_date(format!("day {day} is out of range"))
                })?;
                time::ymd(year, month, day)
            }
        }
    }

    fn delta(&self, node: &DateDeltaNode) -> Result<DateDelta, EvaluationError> {
        Ok(DateDelta {
            negative: node.negative,
            years: self.part(node.years.as_ref(), "years")?,
            months: self.part(node.months.as_ref(), "months")?,
            weeks: self.part(node.weeks.as_ref(), "weeks")?,
            days: self.part(node.days.as_ref(), "days")?,
        })
    }

    fn part(&self, expr: Option<&NumericExpr>, what: &str) -> Result<i64, EvaluationError> {
        expr.map_or(Ok(0), |expr| self.integer(expr, what))
    }

    fn integer(&self, expr: &NumericExpr, what: &str) -> Result<i64, EvaluationError> {
        let value = self.numeric.evaluate(expr)?;
        super::truncate(value).ok_or_else(|| {
            EvaluationError::invalid_date(format!("{what} {value} is not a representable integer"))
        })
    }
}

use crate::ast::{BinaryOp, NumericExpr};
use crate::error::EvaluationError;
use crate::scope::VariableScope;
use crate::value::VariableType;

/// Evaluates arithmetic expression trees to `f64`.
///
/// Variable references must resolve to numbers; a date-typed variable is a
/// `TypeMismatch`, never coerced.
#[derive(Debug, Clone, Copy)]
pub struct NumericEvaluator<'a> {
    scope: &'a VariableScope,
}

impl<'a> NumericEvaluator<'a> {
    #[must_use]
    pub const fn new(scope: &'a VariableScope) -> Self {
        Self { scope }
    }

    /// Evaluates `expr`.
    ///
    /// # Errors
    ///
    /// Propagates scope failures unchanged; returns `DivisionByZero` for a
    /// zero divisor.
    pub fn evaluate(&self, expr: &NumericExpr) -> Result<f64, EvaluationError> {
        match expr {
            NumericExpr::Literal { value } => Ok(*value),

            NumericExpr::Variable { name } => {
                let value = self.scope.get(name, VariableType::Number)?;
                value.as_number().ok_or_else(|| EvaluationError::TypeMismatch {
                    name: name.clone(),
                    expected: VariableType::Number,
                    actual: value.variable_type(),
                })
            }

            NumericExpr::Negate { operand } => Ok(-self.evaluate(operand)?),

            NumericExpr::Binary { op, lhs, rhs } => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div if rhs == 0.0 => Err(EvaluationError::DivisionByZero),
                    BinaryOp::Div => Ok(lhs / rhs),
                }
            }
        }
    }

    /// Evaluates `expr` and truncates it toward zero into a currency amount.
    ///
    /// # Errors
    ///
    /// As [`Self::evaluate`], plus `InvalidNumber` when the result is not a
    /// representable integer.
    pub fn evaluate_amount(&self, expr: &NumericExpr) -> Result<i64, EvaluationError> {
        let value = self.evaluate(expr)?;
        super::truncate(value).ok_or_else(|| {
            EvaluationError::invalid_number(format!("{value} is not a representable amount"))
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::value::Value;

    fn scope() -> VariableScope {
        let mut scope = VariableScope::new();
        scope.declare("salaire", Value::Number(1200.0)).unwrap();
        scope
            .declare("ajd", Value::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()))
            .unwrap();
        scope
    }

    #[test]
    fn test_arithmetic() {
        let scope = scope();
        let eval = NumericEvaluator::new(&scope);
        // (salaire * 12 - 400) / 2
        let expr = NumericExpr::binary(
            BinaryOp::Div,
            NumericExpr::binary(
                BinaryOp::Sub,
                NumericExpr::binary(BinaryOp::Mul, NumericExpr::var("salaire"), 12.into()),
                400.into(),
            ),
            2.into(),
        );
        assert_eq!(eval.evaluate(&expr).unwrap(), 7000.0);
        assert_eq!(
            eval.evaluate(&NumericExpr::negate(NumericExpr::var("salaire"))).unwrap(),
            -1200.0
        );
    }

    #[test]
    fn test_date_variable_is_type_mismatch() {
        let scope = scope();
        let eval = NumericEvaluator::new(&scope);
        assert!(matches!(
            eval.evaluate(&NumericExpr::var("ajd")),
            Err(EvaluationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_undefined_variable_propagates() {
        let scope = scope();
        let eval = NumericEvaluator::new(&scope);
        let expr = NumericExpr::binary(BinaryOp::Add, 1.into(), NumericExpr::var("loyer"));
        assert_eq!(
            eval.evaluate(&expr),
            Err(EvaluationError::UndefinedVariable {
                name: "loyer".to_string()
            })
        );
    }

    #[test]
    fn test_division_by_zero() {
        let scope = scope();
        let eval = NumericEvaluator::new(&scope);
        let expr = NumericExpr::binary(BinaryOp::Div, 1.into(), 0.into());
        assert_eq!(eval.evaluate(&expr), Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_amount_truncates() {
        let scope = scope();
        let eval = NumericEvaluator::new(&scope);
        assert_eq!(eval.evaluate_amount(&NumericExpr::lit(99.99)).unwrap(), 99);
        assert_eq!(eval.evaluate_amount(&NumericExpr::lit(-99.99)).unwrap(), -99);
        let huge = NumericExpr::binary(BinaryOp::Mul, NumericExpr::lit(1e308), 10.into());
        assert!(matches!(
            eval.evaluate_amount(&huge),
            Err(EvaluationError::InvalidNumber { .. })
        ));
    }
}

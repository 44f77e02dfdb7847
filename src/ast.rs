//! Parse-tree node shapes consumed by the evaluators.
//!
//! The grammar and tokenizer live outside this crate. An external parser
//! hands over these nodes directly or as JSON; every node derives
//! `Deserialize` for that purpose.

use serde::{Deserialize, Serialize};

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A numeric expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumericExpr {
    Literal {
        value: f64,
    },
    Variable {
        name: String,
    },
    Negate {
        operand: Box<NumericExpr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<NumericExpr>,
        rhs: Box<NumericExpr>,
    },
}

impl NumericExpr {
    #[must_use]
    pub const fn lit(value: f64) -> Self {
        Self::Literal { value }
    }

    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    #[must_use]
    pub fn negate(operand: Self) -> Self {
        Self::Negate {
            operand: Box::new(operand),
        }
    }

    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl From<f64> for NumericExpr {
    fn from(value: f64) -> Self {
        Self::lit(value)
    }
}

impl From<i32> for NumericExpr {
    fn from(value: i32) -> Self {
        Self::lit(f64::from(value))
    }
}

/// Month part of a constructed date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthNode {
    Number(NumericExpr),
    Name(String),
}

/// The base of a date expression, before any delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateAtom {
    Indeterminate,
    Maximum,
    Minimum,
    Variable {
        name: String,
    },
    Construct {
        day: NumericExpr,
        month: MonthNode,
        year: NumericExpr,
    },
}

/// Optional offset applied after the base date. Absent parts count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateDeltaNode {
    pub negative: bool,
    pub years: Option<NumericExpr>,
    pub months: Option<NumericExpr>,
    pub weeks: Option<NumericExpr>,
    pub days: Option<NumericExpr>,
}

/// A full date expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateNode {
    pub atom: DateAtom,
    #[serde(default)]
    pub delta: Option<DateDeltaNode>,
}

impl DateNode {
    #[must_use]
    pub const fn new(atom: DateAtom) -> Self {
        Self { atom, delta: None }
    }

    /// A `day month year` date built from integer literals.
    #[must_use]
    pub fn ymd(year: i32, month: i32, day: i32) -> Self {
        Self::new(DateAtom::Construct {
            day: day.into(),
            month: MonthNode::Number(month.into()),
            year: year.into(),
        })
    }

    /// A `day <month name> year` date.
    #[must_use]
    pub fn named_month(day: i32, month: impl Into<String>, year: i32) -> Self {
        Self::new(DateAtom::Construct {
            day: day.into(),
            month: MonthNode::Name(month.into()),
            year: year.into(),
        })
    }

    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::new(DateAtom::Variable { name: name.into() })
    }

    #[must_use]
    pub fn with_delta(mut self, delta: DateDeltaNode) -> Self {
        self.delta = Some(delta);
        self
    }
}

/// Right-hand side of a variable declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableExpr {
    Date(DateNode),
    Number(NumericExpr),
}

/// `name = value` binding in the enclosing scope frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub value: VariableExpr,
}

/// Declaration of a single possession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PossessionDecl {
    Materiel {
        name: String,
        created_at: DateNode,
        value: NumericExpr,
        rate: NumericExpr,
    },
    Argent {
        name: String,
        created_at: DateNode,
        value: NumericExpr,
    },
    Dette {
        name: String,
        created_at: DateNode,
        value: NumericExpr,
    },
    FluxArgent {
        name: String,
        start: DateNode,
        end: DateNode,
        amount: NumericExpr,
        day_of_month: NumericExpr,
        #[serde(default)]
        initial: Option<NumericExpr>,
    },
}

/// Declaration of an objective attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectiveDecl {
    Aggregate {
        target: NumericExpr,
        at: DateNode,
    },
    Possession {
        possession: String,
        target: NumericExpr,
        at: DateNode,
    },
}

/// One case: a patrimony snapshot and the period it is simulated over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDecl {
    pub name: String,
    pub owner: String,
    pub start: DateNode,
    pub end: DateNode,
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    #[serde(default)]
    pub possessions: Vec<PossessionDecl>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveDecl>,
}

/// A whole scenario: shared variables and its cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseSetDecl {
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    #[serde(default)]
    pub cases: Vec<CaseDecl>,
}

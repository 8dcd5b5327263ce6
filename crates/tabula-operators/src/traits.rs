//! Operator trait + common interfaces.
//!
//! The catalog calls `validate()` before resolving any table, `plan(...)` to
//! obtain the default output name and key, then `eval(...)` to compute rows.

use tabula_core::prelude::{Row, TableMeta};
use tabula_core::Error as CoreError;

use crate::plan::OpPlan;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("missing required option '{0}'")]
    MissingOption(&'static str),

    #[error("expected predicate/expression pairs, got {0} argument(s)")]
    Arity(usize),

    #[error("output exceeds {limit} rows")]
    Limit { limit: usize },

    #[error("{op} expects {expected} input table(s), got {got}")]
    Inputs {
        op: &'static str,
        expected: usize,
        got: usize,
    },
}

impl From<OpError> for CoreError {
    fn from(e: OpError) -> Self {
        match e {
            OpError::MissingOption(opt) => CoreError::MissingOption(opt),
            OpError::Arity(n) => CoreError::FilterArity(n),
            OpError::Limit { limit } => CoreError::ResourceLimit { limit },
            other @ OpError::Inputs { .. } => CoreError::Operator(other.to_string()),
        }
    }
}

/// A registered table as seen by an operator.
#[derive(Debug, Clone, Copy)]
pub struct TableRef<'a> {
    pub meta: &'a TableMeta,
    pub rows: &'a [Row],
}

impl<'a> TableRef<'a> {
    pub fn new(meta: &'a TableMeta, rows: &'a [Row]) -> Self {
        Self { meta, rows }
    }

    pub fn name(&self) -> &'a str {
        &self.meta.name
    }
}

/// Trait that all operators implement.
///
/// Invariants:
/// - `eval` never mutates its inputs and is deterministic given the same inputs.
/// - Column names in produced rows are already in canonical case.
pub trait Operator {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Number of input tables.
    fn arity(&self) -> usize {
        1
    }

    /// Check the operator's own options; runs before any table lookup.
    fn validate(&self) -> Result<(), OpError> {
        Ok(())
    }

    /// Default output naming and keying for the given inputs.
    fn plan(&self, work_prefix: &str, inputs: &[TableRef<'_>]) -> Result<OpPlan, OpError>;

    fn eval(&self, inputs: &[TableRef<'_>]) -> Result<Vec<Row>, OpError>;
}

/// Shared input-count check for `plan`/`eval` implementations.
pub(crate) fn expect_inputs(
    op: &'static str,
    expected: usize,
    inputs: &[TableRef<'_>],
) -> Result<(), OpError> {
    if inputs.len() != expected {
        return Err(OpError::Inputs {
            op,
            expected,
            got: inputs.len(),
        });
    }
    Ok(())
}

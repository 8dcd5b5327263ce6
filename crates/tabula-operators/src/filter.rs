//! Equality filter over predicate/expression pairs.
//!
//! Arguments arrive as a flat list `[p1, e1, p2, e2, ...]`; every pair must
//! hold for a row to be kept. Equality is coercive (see `Value::loose_eq`), and
//! a missing cell is treated as Null.

use tabula_core::prelude::{normalize, Row, Value};
use tabula_core::types::NULL;

use crate::plan::OpPlan;
use crate::traits::{expect_inputs, OpError, Operator, TableRef};

#[derive(Debug, Default, Clone)]
pub struct Filter {
    /// Flat predicate/expression list.
    pub args: Vec<Value>,
}

impl Filter {
    pub fn new(args: Vec<Value>) -> Self {
        Self { args }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        let args = pairs
            .into_iter()
            .flat_map(|(p, e)| [Value::from(p), e])
            .collect();
        Self { args }
    }

    /// (column, expression) pairs with normalized column names.
    fn pairs(&self) -> impl Iterator<Item = (String, &Value)> {
        self.args
            .chunks_exact(2)
            .map(|pair| (normalize(&pair[0].to_string()), &pair[1]))
    }
}

impl Operator for Filter {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn validate(&self) -> Result<(), OpError> {
        if self.args.is_empty() || self.args.len() % 2 != 0 {
            return Err(OpError::Arity(self.args.len()));
        }
        Ok(())
    }

    fn plan(&self, work_prefix: &str, inputs: &[TableRef<'_>]) -> Result<OpPlan, OpError> {
        expect_inputs(self.name(), 1, inputs)?;
        self.validate()?;
        // Only the first pair contributes to the generated name.
        Ok(OpPlan::new(format!(
            "{work_prefix}{}_{}_{}",
            inputs[0].name(),
            self.args[0],
            self.args[1]
        )))
    }

    fn eval(&self, inputs: &[TableRef<'_>]) -> Result<Vec<Row>, OpError> {
        expect_inputs(self.name(), 1, inputs)?;
        self.validate()?;

        let mut pairs = self.pairs();
        let Some((first_col, first_expr)) = pairs.next() else {
            return Err(OpError::Arity(0));
        };
        let rest: Vec<_> = pairs.collect();

        let out: Vec<Row> = filter_predicate(inputs[0].rows, &first_col, first_expr)
            .filter(|row| rest.iter().all(|(col, expr)| cell(row, col).loose_eq(expr)))
            .cloned()
            .collect();

        tracing::trace!(
            table = inputs[0].name(),
            pairs = self.args.len() / 2,
            kept = out.len(),
            "filtered"
        );
        Ok(out)
    }
}

fn cell<'r>(row: &'r Row, column: &str) -> &'r Value {
    row.get_exact(column).unwrap_or(&NULL)
}

/// Rows whose `column` (already in canonical case) loosely equals `expr`.
pub fn filter_predicate<'a>(
    rows: &'a [Row],
    column: &'a str,
    expr: &'a Value,
) -> impl Iterator<Item = &'a Row> + 'a {
    rows.iter()
        .filter(move |row| cell(row, column).loose_eq(expr))
}

//! Nested-loop inner equi-join.
//!
//! The correlation column is the *left* table's primary key, read by the same
//! name from both sides. The right table's own primary key is not consulted.
//! Missing cells compare as Null, and a left table without a primary key
//! matches every pair.
//! Output columns are qualified as `<TABLE>.<COLUMN>` for both sides.

use tabula_core::prelude::{Row, Value};
use tabula_core::types::NULL;

use crate::plan::OpPlan;
use crate::traits::{expect_inputs, OpError, Operator, TableRef};

#[derive(Debug, Default, Clone)]
pub struct NestedLoopJoin {
    /// Optional cap on emitted rows.
    pub max_rows: Option<usize>,
}

impl NestedLoopJoin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }
}

impl Operator for NestedLoopJoin {
    fn name(&self) -> &'static str {
        "join_nested_loop"
    }

    fn arity(&self) -> usize {
        2
    }

    fn plan(&self, work_prefix: &str, inputs: &[TableRef<'_>]) -> Result<OpPlan, OpError> {
        expect_inputs(self.name(), 2, inputs)?;
        Ok(OpPlan::new(format!(
            "{work_prefix}{}_{}",
            inputs[0].name(),
            inputs[1].name()
        )))
    }

    fn eval(&self, inputs: &[TableRef<'_>]) -> Result<Vec<Row>, OpError> {
        expect_inputs(self.name(), 2, inputs)?;
        let (left, right) = (inputs[0], inputs[1]);
        let key = left.meta.primary_key.as_deref();

        let mut out = Vec::new();
        for l in left.rows {
            let lk = key_cell(l, key);
            for r in right.rows {
                if !lk.loose_eq(key_cell(r, key)) {
                    continue;
                }
                if let Some(limit) = self.max_rows {
                    if out.len() >= limit {
                        return Err(OpError::Limit { limit });
                    }
                }
                out.push(qualify(left.name(), l, right.name(), r));
            }
        }

        tracing::trace!(
            left = left.name(),
            right = right.name(),
            key = key.unwrap_or_default(),
            rows = out.len(),
            "joined"
        );
        Ok(out)
    }
}

/// A missing cell, or no key at all, reads as Null, so such rows still match
/// each other under loose equality.
fn key_cell<'r>(row: &'r Row, key: Option<&str>) -> &'r Value {
    key.and_then(|k| row.get_exact(k)).unwrap_or(&NULL)
}

fn qualify(left_name: &str, left: &Row, right_name: &str, right: &Row) -> Row {
    let mut row = Row::new();
    for (col, v) in left.iter() {
        row.insert(format!("{left_name}.{col}"), v.clone());
    }
    for (col, v) in right.iter() {
        row.insert(format!("{right_name}.{col}"), v.clone());
    }
    row
}

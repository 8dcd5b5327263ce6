//! Group-by with summation.
//!
//! Emits one `{DIM, VAL}` row per distinct value of the dimension column, in
//! first-seen order. Summation is the only aggregate.

use tabula_core::prelude::{normalize, Row, Value};
use tabula_core::types::NULL;

use crate::filter::filter_predicate;
use crate::plan::OpPlan;
use crate::traits::{expect_inputs, OpError, Operator, TableRef};

pub const DIM_COLUMN: &str = "DIM";
pub const VAL_COLUMN: &str = "VAL";

#[derive(Debug, Default, Clone)]
pub struct GroupBy {
    pub dim: Option<String>,
    pub metric: Option<String>,
}

impl GroupBy {
    pub fn new(dim: Option<&str>, metric: Option<&str>) -> Self {
        Self {
            dim: dim.map(normalize),
            metric: metric.map(normalize),
        }
    }

    fn columns(&self) -> Result<(&str, &str), OpError> {
        let dim = self.dim.as_deref().ok_or(OpError::MissingOption("dim"))?;
        let metric = self
            .metric
            .as_deref()
            .ok_or(OpError::MissingOption("metric"))?;
        Ok((dim, metric))
    }
}

impl Operator for GroupBy {
    fn name(&self) -> &'static str {
        "group_by"
    }

    fn validate(&self) -> Result<(), OpError> {
        self.columns().map(|_| ())
    }

    fn plan(&self, work_prefix: &str, inputs: &[TableRef<'_>]) -> Result<OpPlan, OpError> {
        expect_inputs(self.name(), 1, inputs)?;
        let (dim, metric) = self.columns()?;
        Ok(
            OpPlan::new(format!("{work_prefix}{}_{dim}_{metric}", inputs[0].name()))
                .with_primary_key(DIM_COLUMN),
        )
    }

    fn eval(&self, inputs: &[TableRef<'_>]) -> Result<Vec<Row>, OpError> {
        expect_inputs(self.name(), 1, inputs)?;
        let (dim, metric) = self.columns()?;
        let rows = inputs[0].rows;

        let out = distinct(rows, dim)
            .into_iter()
            .map(|group| {
                let total = filter_predicate(rows, dim, &group)
                    .fold(Sum::default(), |acc, row| {
                        acc.add(row.get_exact(metric).unwrap_or(&NULL))
                    });
                Row::new()
                    .with(DIM_COLUMN, group)
                    .with(VAL_COLUMN, total.into_value())
            })
            .collect();
        Ok(out)
    }
}

/// Distinct values of `column` (canonical case) in first-seen order, compared
/// with coercive equality. Rows missing the column contribute Null.
pub fn distinct(rows: &[Row], column: &str) -> Vec<Value> {
    let mut seen: Vec<Value> = Vec::new();
    for row in rows {
        let v = row.get_exact(column).unwrap_or(&NULL);
        if !seen.iter().any(|s| s.loose_eq(v)) {
            seen.push(v.clone());
        }
    }
    seen
}

/// Running sum: integral while every addend is an integer and nothing
/// overflows, float otherwise. Null adds nothing.
#[derive(Debug, Clone, Copy)]
enum Sum {
    Int(i64),
    Float(f64),
}

impl Default for Sum {
    fn default() -> Self {
        Sum::Int(0)
    }
}

impl Sum {
    fn add(self, v: &Value) -> Sum {
        match (self, v) {
            (acc, Value::Null) => acc,
            (Sum::Int(a), Value::Int(b)) => a
                .checked_add(*b)
                .map(Sum::Int)
                .unwrap_or(Sum::Float(a as f64 + *b as f64)),
            (Sum::Int(a), other) => Sum::Float(a as f64 + other.to_number()),
            (Sum::Float(a), other) => Sum::Float(a + other.to_number()),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Sum::Int(i) => Value::Int(i),
            Sum::Float(f) => Value::Float(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::test_support::meta;

    fn sales() -> Vec<Row> {
        vec![
            Row::new().with("DIM", "x").with("METRIC", 3),
            Row::new().with("DIM", "x").with("METRIC", 4),
            Row::new().with("DIM", "y").with("METRIC", 5),
        ]
    }

    #[test]
    fn test_group_sum() {
        let rows = sales();
        let m = meta("SALES", None, &rows);
        let out = GroupBy::new(Some("dim"), Some("metric"))
            .eval(&[TableRef::new(&m, &rows)])
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].get("dim"), Some(&Value::from("x")));
        assert_eq!(out[0].get("val"), Some(&Value::Int(7)));
        assert_eq!(out[1].get("dim"), Some(&Value::from("y")));
        assert_eq!(out[1].get("val"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_mixed_metric_types_sum_as_float() {
        let rows = vec![
            Row::new().with("G", 1).with("M", 1.5),
            Row::new().with("G", "1").with("M", "2"),
            Row::new().with("G", 1),
        ];
        let m = meta("T", None, &rows);
        let out = GroupBy::new(Some("g"), Some("m"))
            .eval(&[TableRef::new(&m, &rows)])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].get("val"), Some(&Value::Float(3.5)));
    }

    #[test]
    fn test_distinct_first_seen_order() {
        let rows = vec![
            Row::new().with("C", "b"),
            Row::new().with("C", "a"),
            Row::new().with("C", "b"),
            Row::new(),
        ];
        assert_eq!(
            distinct(&rows, "C"),
            vec![Value::from("b"), Value::from("a"), Value::Null]
        );
    }

    #[test]
    fn test_missing_options() {
        assert!(matches!(
            GroupBy::new(None, Some("m")).validate(),
            Err(OpError::MissingOption("dim"))
        ));
        assert!(matches!(
            GroupBy::new(Some("d"), None).validate(),
            Err(OpError::MissingOption("metric"))
        ));
    }

    #[test]
    fn test_plan() {
        let rows = sales();
        let m = meta("SALES", None, &rows);
        let plan = GroupBy::new(Some("dim"), Some("metric"))
            .plan("WORK.", &[TableRef::new(&m, &rows)])
            .unwrap();
        assert_eq!(plan.default_name, "WORK.SALES_DIM_METRIC");
        assert_eq!(plan.primary_key.as_deref(), Some("DIM"));
    }
}

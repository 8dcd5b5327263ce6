//! Sort operator.
//!
//! Orders a copy of the input by the numeric value of one column. Values that
//! do not coerce to a number (NaN) are placed after all numeric values in
//! either direction and keep their relative input order.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tabula_core::prelude::{normalize, Row};

use crate::plan::OpPlan;
use crate::traits::{expect_inputs, OpError, Operator, TableRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `"ASC"` in any case sorts ascending; anything else is descending.
    pub fn parse(order: Option<&str>) -> Self {
        match order {
            Some(o) if o.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone)]
pub struct OrderBy {
    /// Column to sort on. Required.
    pub clause: Option<String>,
    pub order: SortOrder,
}

impl OrderBy {
    pub fn new(clause: Option<&str>, order: SortOrder) -> Self {
        Self {
            clause: clause.map(normalize),
            order,
        }
    }

    fn clause(&self) -> Result<&str, OpError> {
        self.clause
            .as_deref()
            .ok_or(OpError::MissingOption("clause"))
    }
}

impl Operator for OrderBy {
    fn name(&self) -> &'static str {
        "order_by"
    }

    fn validate(&self) -> Result<(), OpError> {
        self.clause().map(|_| ())
    }

    fn plan(&self, work_prefix: &str, inputs: &[TableRef<'_>]) -> Result<OpPlan, OpError> {
        expect_inputs(self.name(), 1, inputs)?;
        let clause = self.clause()?;
        Ok(OpPlan::new(format!(
            "{work_prefix}{}_{clause}_{}",
            inputs[0].name(),
            self.order
        ))
        .with_primary_key(clause))
    }

    fn eval(&self, inputs: &[TableRef<'_>]) -> Result<Vec<Row>, OpError> {
        expect_inputs(self.name(), 1, inputs)?;
        let clause = self.clause()?;

        let mut keyed: Vec<(f64, Row)> = inputs[0]
            .rows
            .iter()
            .map(|row| {
                let key = row
                    .get_exact(clause)
                    .map(|v| v.to_number())
                    .unwrap_or(f64::NAN);
                (key, row.clone())
            })
            .collect();

        // Stable sort keeps ties in input order.
        keyed.sort_by(|(a, _), (b, _)| numeric_cmp(*a, *b, self.order));
        Ok(keyed.into_iter().map(|(_, row)| row).collect())
    }
}

fn numeric_cmp(a: f64, b: f64, order: SortOrder) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }
    }
}

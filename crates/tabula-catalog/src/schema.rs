//! The `Schema`: a set of named tables plus the operations over them.
//!
//! Every operation reads registered tables and registers its result as a new
//! derived table, so results can be queried and chained like base tables:
//!
//! ```
//! use tabula_catalog::{AddOptions, GroupByOptions, Schema};
//! use tabula_core::prelude::Row;
//!
//! let mut schema = Schema::new();
//! let sales = vec![
//!     Row::new().with("city", "oslo").with("amount", 3),
//!     Row::new().with("city", "oslo").with("amount", 4),
//! ];
//! schema
//!     .add(sales, AddOptions::named("sales"))?
//!     .group_by("sales", GroupByOptions::new("city", "amount"))?;
//!
//! let totals = schema.get("work.sales_city_amount")?;
//! assert_eq!(totals[0].get("val"), Some(&7.into()));
//! # Ok::<(), tabula_core::Error>(())
//! ```

use tabula_core::prelude::{normalize, Error, Origin, Result, Row, SchemaConfig, TableMeta, Value};
use tabula_operators::{
    Filter, GroupBy, NestedLoopJoin, OpError, Operator, OrderBy, SortOrder, TableRef,
};

use crate::metrics::emit_span;
use crate::options::{AddOptions, FilterOptions, GroupByOptions, JoinOptions, OrderByOptions};
use crate::registry::Registry;
use crate::store::TableStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug)]
pub struct Schema {
    store: TableStore,
    registry: Registry,
    /// Suffix of the next generated table name.
    counter: u64,
    config: SchemaConfig,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::build(SchemaConfig::default())
    }

    pub fn with_config(config: SchemaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SchemaConfig) -> Self {
        tracing::info!(version = VERSION, "tabula schema {VERSION} created");
        Self {
            store: TableStore::new(),
            registry: Registry::new(),
            counter: 0,
            config,
        }
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    // ----- registration -------------------------------------------------

    /// Register `rows` as a table.
    ///
    /// Column names are normalized to canonical case. A name under the work
    /// prefix marks the table as derived, so `clean_up` will remove it.
    pub fn add(&mut self, rows: Vec<Row>, options: AddOptions) -> Result<&mut Self> {
        let name = options.name.as_deref().map(normalize);
        let origin = match &name {
            Some(n) if n.starts_with(&self.config.normalized_work_prefix()) => Origin::Derived,
            _ => Origin::Base,
        };
        self.register(rows, name, options.primary_key, origin)?;
        Ok(self)
    }

    /// Register JSON data: an array of objects, or a single object as one row.
    pub fn add_json(&mut self, data: &serde_json::Value, options: AddOptions) -> Result<&mut Self> {
        let rows = match data {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    serde_json::Value::Object(map) => Ok(Row::from_json_map(map)),
                    other => Err(invalid_shape(other)),
                })
                .collect::<Result<Vec<_>>>()?,
            serde_json::Value::Object(map) => vec![Row::from_json_map(map)],
            other => return Err(invalid_shape(other)),
        };
        self.add(rows, options)
    }

    fn register(
        &mut self,
        rows: Vec<Row>,
        name: Option<String>,
        primary_key: Option<String>,
        origin: Origin,
    ) -> Result<&TableMeta> {
        let name = match name {
            Some(n) => normalize(&n),
            None => {
                let generated = format!(
                    "{}{}",
                    normalize(&self.config.auto_name_prefix),
                    self.counter
                );
                self.counter += 1;
                generated
            }
        };
        self.registry.check_unique(&name)?;

        let rows: Vec<Row> = rows.into_iter().map(Row::normalized).collect();
        if rows.is_empty() {
            tracing::warn!(table = %name, "registering an empty table");
        }
        let columns = rows
            .first()
            .map(|r| r.columns().map(str::to_string).collect())
            .unwrap_or_default();
        let row_count = rows.len();
        let id = self.store.insert(rows);

        tracing::debug!(table = %name, %id, rows = row_count, ?origin, "registered table");
        self.registry.insert(TableMeta {
            name: name.clone(),
            id,
            primary_key: primary_key.as_deref().map(normalize),
            row_count,
            columns,
            origin,
        });
        self.registry.check_for_table(&name)
    }

    // ----- lookup -------------------------------------------------------

    /// Rows of a table, looked up case-insensitively.
    pub fn get(&self, name: &str) -> Result<&[Row]> {
        let meta = self.registry.check_for_table(&normalize(name))?;
        self.rows_of(meta)
    }

    pub fn meta(&self, name: &str) -> Result<&TableMeta> {
        self.registry.check_for_table(&normalize(name))
    }

    /// Position of the table among live tables, in registration order.
    pub fn slot_index(&self, name: &str) -> Result<usize> {
        let meta = self.meta(name)?;
        self.store
            .slot_of(meta.id)
            .ok_or_else(|| Error::UnknownTable(meta.name.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(&normalize(name))
    }

    /// Table metadata in slot order.
    pub fn tables(&self) -> impl Iterator<Item = &TableMeta> + '_ {
        self.registry.iter()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables().map(|m| m.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// A table as a JSON array of objects.
    pub fn to_json(&self, name: &str) -> Result<serde_json::Value> {
        let rows = self.get(name)?;
        Ok(serde_json::Value::Array(
            rows.iter().map(Row::to_json).collect(),
        ))
    }

    fn rows_of(&self, meta: &TableMeta) -> Result<&[Row]> {
        self.store
            .get(meta.id)
            .ok_or_else(|| Error::UnknownTable(meta.name.clone()))
    }

    // ----- structural mutation ------------------------------------------

    pub fn drop(&mut self, name: &str) -> Result<&mut Self> {
        let key = normalize(name);
        let id = self.registry.check_for_table(&key)?.id;
        self.store.remove(id);
        self.registry.remove(&key);
        tracing::debug!(table = %key, %id, "dropped table");
        Ok(self)
    }

    /// Replace a table's rows, keeping its name, primary key, and origin.
    pub fn update(&mut self, name: &str, rows: Vec<Row>) -> Result<&mut Self> {
        let key = normalize(name);
        let meta = self.registry.check_for_table(&key)?;
        let (primary_key, origin) = (meta.primary_key.clone(), meta.origin);
        self.drop(&key)?;
        self.register(rows, Some(key), primary_key, origin)?;
        Ok(self)
    }

    /// Drop every derived table. Base tables are kept.
    pub fn clean_up(&mut self) -> &mut Self {
        let derived: Vec<String> = self
            .tables()
            .filter(|m| m.is_derived())
            .map(|m| m.name.clone())
            .collect();
        let dropped = derived.iter().filter(|name| self.drop(name).is_ok()).count();
        tracing::info!(dropped, remaining = self.len(), "cleaned up derived tables");
        self
    }

    // ----- relational operators -----------------------------------------

    /// Inner join on the left table's primary key, compared by the same
    /// column name on the right side.
    pub fn join(&mut self, left: &str, right: &str, options: JoinOptions) -> Result<&mut Self> {
        let op = NestedLoopJoin::new().with_max_rows(self.config.max_join_rows);
        self.apply(&op, &[left, right], options.name)
    }

    /// Sort by the numeric value of `options.clause`. The source table keeps
    /// its order; the sorted copy is keyed on the clause column.
    pub fn order_by(&mut self, table: &str, options: OrderByOptions) -> Result<&mut Self> {
        let op = OrderBy::new(
            options.clause.as_deref(),
            SortOrder::parse(options.order.as_deref()),
        );
        self.apply(&op, &[table], options.name)
    }

    /// Sum `options.metric` per distinct value of `options.dim`.
    pub fn group_by(&mut self, table: &str, options: GroupByOptions) -> Result<&mut Self> {
        let op = GroupBy::new(options.dim.as_deref(), options.metric.as_deref());
        self.apply(&op, &[table], options.name)
    }

    /// Keep rows matching every predicate/expression pair in `args`
    /// (`[p1, e1, p2, e2, ...]`).
    pub fn filter(&mut self, table: &str, args: &[Value]) -> Result<&mut Self> {
        self.filter_with(table, args, FilterOptions::default())
    }

    pub fn filter_with(
        &mut self,
        table: &str,
        args: &[Value],
        options: FilterOptions,
    ) -> Result<&mut Self> {
        let op = Filter::new(args.to_vec());
        self.apply(&op, &[table], options.name)
    }

    pub fn filter_pairs(&mut self, table: &str, pairs: &[(&str, Value)]) -> Result<&mut Self> {
        let op = Filter::from_pairs(pairs.iter().map(|(p, e)| (*p, e.clone())));
        self.apply(&op, &[table], None)
    }

    /// Validate, resolve inputs, reserve the output name, evaluate, and
    /// register the result as derived.
    fn apply(
        &mut self,
        op: &dyn Operator,
        tables: &[&str],
        name: Option<String>,
    ) -> Result<&mut Self> {
        op.validate().map_err(|e| op_failed(op, e))?;
        if tables.len() != op.arity() {
            return Err(op_failed(
                op,
                OpError::Inputs {
                    op: op.name(),
                    expected: op.arity(),
                    got: tables.len(),
                },
            ));
        }

        let keys: Vec<String> = tables.iter().map(|t| normalize(t)).collect();
        let (output, plan, rows) = {
            let inputs = keys
                .iter()
                .map(|k| {
                    let meta = self.registry.check_for_table(k)?;
                    Ok(TableRef::new(meta, self.rows_of(meta)?))
                })
                .collect::<Result<Vec<_>>>()?;
            let plan = op
                .plan(&self.config.normalized_work_prefix(), &inputs)
                .map_err(|e| op_failed(op, e))?;
            let output = normalize(name.as_deref().unwrap_or(&plan.default_name));
            self.registry.check_unique(&output)?;
            let rows = op.eval(&inputs).map_err(|e| op_failed(op, e))?;
            (output, plan, rows)
        };

        let out_rows = rows.len();
        let meta = self.register(rows, Some(output), plan.primary_key, Origin::Derived)?;
        emit_span(
            op.name(),
            &[
                ("inputs", keys.join(",")),
                ("output", meta.name.clone()),
                ("rows", out_rows.to_string()),
            ],
        );
        Ok(self)
    }
}

fn op_failed(op: &dyn Operator, e: OpError) -> Error {
    let err = Error::from(e);
    tracing::error!(op = op.name(), "{err}");
    err
}

fn invalid_shape(v: &serde_json::Value) -> Error {
    tracing::error!("{v} is not an object");
    Error::InvalidShape(v.to_string())
}

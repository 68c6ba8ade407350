//! Totals plans and the aggregation engine.
//!
//! A totals plan maps column keys to directives; the engine folds every
//! processed row into per-plan accumulator state and the renderer turns each
//! plan into one footer row. Directives come in heterogeneous shapes and are
//! normalized once, at plan declaration, into the closed set the fold works
//! with: a static caption, a built-in reducer, or a fold function.
//!
//! Accumulators start from an explicit *unset* sentinel, never from zero —
//! a zero seed would corrupt `min`/`max` over all-positive values.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::error::{Result, TableError};
use crate::source::Row;

/// A fold function: `(accumulator-or-unset, field value, row) -> new
/// accumulator`.
pub type FoldFn = Box<dyn Fn(Option<&Value>, &Value, &Row) -> Value>;

/// A seed function evaluated on the first processed row:
/// `(field value, row) -> initial accumulator`.
pub type SeedFn = Box<dyn Fn(&Value, &Row) -> Value>;

/// Initial accumulator value for a directive.
pub enum Seed {
	/// A literal starting value.
	Value(Value),
	/// Computed from the first processed row.
	Init(SeedFn),
}

impl Seed {
	fn eval(&self, value: &Value, row: &Row) -> Value {
		match self {
			Self::Value(v) => v.clone(),
			Self::Init(f) => f(value, row),
		}
	}
}

impl fmt::Debug for Seed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
			Self::Init(_) => f.debug_tuple("Init").finish_non_exhaustive(),
		}
	}
}

/// One normalized totals directive.
pub enum PlanEntry {
	/// A static caption cell ("Totals:"); never aggregates.
	Label(String),
	/// A built-in reducer, kept by name; unknown names are rejected by the
	/// first fold that needs them.
	Reduce {
		/// Built-in method name (`sum`, `count`, `min`, `max`).
		method: String,
		/// Optional accumulator seed.
		default: Option<Seed>,
	},
	/// A caller-supplied fold function.
	Fold {
		/// The fold, free to treat the unset sentinel as "no prior value".
		func: FoldFn,
		/// Optional accumulator seed.
		default: Option<Seed>,
	},
}

impl PlanEntry {
	/// A static caption cell.
	pub fn label(text: impl Into<String>) -> Self {
		Self::Label(text.into())
	}

	/// A built-in reducer by name.
	pub fn reduce(method: impl Into<String>) -> Self {
		Self::Reduce {
			method: method.into(),
			default: None,
		}
	}

	/// The `sum` reducer.
	pub fn sum() -> Self {
		Self::reduce("sum")
	}

	/// The `count` reducer.
	pub fn count() -> Self {
		Self::reduce("count")
	}

	/// The `min` reducer.
	pub fn min() -> Self {
		Self::reduce("min")
	}

	/// The `max` reducer.
	pub fn max() -> Self {
		Self::reduce("max")
	}

	/// A fold-function directive.
	pub fn fold(func: impl Fn(Option<&Value>, &Value, &Row) -> Value + 'static) -> Self {
		Self::Fold {
			func: Box::new(func),
			default: None,
		}
	}

	/// Seed the accumulator with a literal value. No effect on labels.
	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		if let Self::Reduce { default, .. } | Self::Fold { default, .. } = &mut self {
			*default = Some(Seed::Value(value.into()));
		}
		self
	}

	/// Seed the accumulator from the first processed row. No effect on
	/// labels.
	pub fn with_default_fn(mut self, f: impl Fn(&Value, &Row) -> Value + 'static) -> Self {
		if let Self::Reduce { default, .. } | Self::Fold { default, .. } = &mut self {
			*default = Some(Seed::Init(Box::new(f)));
		}
		self
	}

	/// Whether this directive aggregates (labels do not).
	pub fn is_aggregating(&self) -> bool {
		!matches!(self, Self::Label(_))
	}

	fn default_seed(&self) -> Option<&Seed> {
		match self {
			Self::Label(_) => None,
			Self::Reduce { default, .. } | Self::Fold { default, .. } => default.as_ref(),
		}
	}
}

impl From<&str> for PlanEntry {
	fn from(text: &str) -> Self {
		Self::label(text)
	}
}

impl From<String> for PlanEntry {
	fn from(text: String) -> Self {
		Self::label(text)
	}
}

impl fmt::Debug for PlanEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Label(text) => f.debug_tuple("Label").field(text).finish(),
			Self::Reduce { method, default } => f
				.debug_struct("Reduce")
				.field("method", method)
				.field("default", &default.is_some())
				.finish(),
			Self::Fold { default, .. } => f
				.debug_struct("Fold")
				.field("default", &default.is_some())
				.finish_non_exhaustive(),
		}
	}
}

/// One totals plan: column key → directive, in declaration order.
#[derive(Debug, Default)]
pub struct TotalsPlan {
	entries: Vec<(String, PlanEntry)>,
}

impl TotalsPlan {
	/// An empty plan.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the directive for a column key. Bare strings normalize to
	/// captions; use [`PlanEntry`] constructors for the aggregating shapes.
	pub fn set(mut self, key: impl Into<String>, entry: impl Into<PlanEntry>) -> Self {
		let key = key.into();
		let entry = entry.into();
		match self.entries.iter_mut().find(|(k, _)| *k == key) {
			Some(slot) => slot.1 = entry,
			None => self.entries.push((key, entry)),
		}
		self
	}

	/// Look up the directive for a column key.
	pub fn get(&self, key: &str) -> Option<&PlanEntry> {
		self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
	}

	/// Iterate directives in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &PlanEntry)> {
		self.entries.iter().map(|(k, e)| (k.as_str(), e))
	}

	/// Whether the plan holds no directives.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Per-render accumulator store, keyed by `(plan index, column key)`.
///
/// An entry is lazily created the first time its directive folds a row;
/// a present entry holding `None` is the unset sentinel.
#[derive(Debug, Default)]
pub struct Accumulators {
	slots: Vec<HashMap<String, Option<Value>>>,
}

impl Accumulators {
	/// Fresh state for the given number of plans.
	pub fn for_plans(count: usize) -> Self {
		Self {
			slots: vec![HashMap::new(); count],
		}
	}

	/// The accumulated value, if the entry has been set.
	pub fn get(&self, plan: usize, key: &str) -> Option<&Value> {
		self.slots
			.get(plan)
			.and_then(|slot| slot.get(key))
			.and_then(|value| value.as_ref())
	}

	/// Whether the entry has been initialized (possibly to the unset
	/// sentinel).
	pub fn is_initialized(&self, plan: usize, key: &str) -> bool {
		self.slots
			.get(plan)
			.is_some_and(|slot| slot.contains_key(key))
	}

	fn init(&mut self, plan: usize, key: &str, seed: Option<Value>) {
		self.slots[plan].insert(key.to_string(), seed);
	}

	fn put(&mut self, plan: usize, key: &str, value: Value) {
		self.slots[plan].insert(key.to_string(), Some(value));
	}
}

/// Holds the declared totals plans and folds rows into accumulator state.
#[derive(Debug, Default)]
pub struct TotalsEngine {
	plans: Vec<TotalsPlan>,
}

impl TotalsEngine {
	/// Append a plan; each call produces one more footer row.
	pub fn add(&mut self, plan: TotalsPlan) -> &mut Self {
		self.plans.push(plan);
		self
	}

	/// Drop all plans, then append the given one.
	pub fn set(&mut self, plan: TotalsPlan) -> &mut Self {
		self.plans.clear();
		self.add(plan)
	}

	/// The declared plans, in declaration order.
	pub fn plans(&self) -> &[TotalsPlan] {
		&self.plans
	}

	/// Number of declared plans.
	pub fn len(&self) -> usize {
		self.plans.len()
	}

	/// Whether no plans are declared.
	pub fn is_empty(&self) -> bool {
		self.plans.is_empty()
	}

	/// Fold one row into every plan's accumulators.
	pub fn fold_row(&self, accumulators: &mut Accumulators, row: &Row) -> Result<()> {
		for (plan_index, plan) in self.plans.iter().enumerate() {
			for (key, entry) in plan.iter() {
				if !entry.is_aggregating() {
					continue;
				}
				let value = row.get(key).cloned().unwrap_or(Value::Null);
				if !accumulators.is_initialized(plan_index, key) {
					let seed = entry.default_seed().map(|s| s.eval(&value, row));
					accumulators.init(plan_index, key, seed);
				}
				match entry {
					PlanEntry::Label(_) => {}
					PlanEntry::Reduce { method, .. } => {
						let next =
							apply_builtin(method, key, accumulators.get(plan_index, key), &value)?;
						accumulators.put(plan_index, key, next);
					}
					PlanEntry::Fold { func, .. } => {
						let next = func(accumulators.get(plan_index, key), &value, row);
						accumulators.put(plan_index, key, next);
					}
				}
			}
		}
		Ok(())
	}
}

fn apply_builtin(method: &str, column: &str, acc: Option<&Value>, value: &Value) -> Result<Value> {
	match method {
		"sum" => {
			let acc = acc.cloned().unwrap_or_else(|| Value::from(0));
			Ok(value_add(&acc, value))
		}
		"count" => {
			let acc = acc.cloned().unwrap_or_else(|| Value::from(0));
			Ok(value_add(&acc, &Value::from(1)))
		}
		"min" => Ok(match acc {
			None => value.clone(),
			Some(acc) => {
				if value_lt(value, acc) {
					value.clone()
				} else {
					acc.clone()
				}
			}
		}),
		"max" => Ok(match acc {
			None => value.clone(),
			Some(acc) => {
				if value_gt(value, acc) {
					value.clone()
				} else {
					acc.clone()
				}
			}
		}),
		other => Err(TableError::UnknownAggregation {
			column: column.to_string(),
			method: other.to_string(),
		}),
	}
}

/// Numeric addition; integer arithmetic while both sides are integers.
/// Null and non-numeric values contribute 0.
fn value_add(a: &Value, b: &Value) -> Value {
	if let (Some(x), Some(y)) = (as_i64_coerced(a), as_i64_coerced(b)) {
		return Value::from(x + y);
	}
	Value::from(as_f64_coerced(a) + as_f64_coerced(b))
}

fn as_i64_coerced(value: &Value) -> Option<i64> {
	match value {
		Value::Null => Some(0),
		_ => value.as_i64(),
	}
}

fn as_f64_coerced(value: &Value) -> f64 {
	match value {
		Value::Null => 0.0,
		_ => value.as_f64().unwrap_or(0.0),
	}
}

fn value_lt(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::String(x), Value::String(y)) => x < y,
		_ => match (a.as_f64(), b.as_f64()) {
			(Some(x), Some(y)) => x < y,
			_ => false,
		},
	}
}

fn value_gt(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::String(x), Value::String(y)) => x > y,
		_ => match (a.as_f64(), b.as_f64()) {
			(Some(x), Some(y)) => x > y,
			_ => false,
		},
	}
}

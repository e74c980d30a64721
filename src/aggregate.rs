//! Minimal aggregation pipelines over a collection.
//!
//! Only the stages the catalog needs exist: keep documents that have a field,
//! project a (possibly nested) field, and sum it into a single result.

use log::warn;

use crate::app_response::AppResponse;
use crate::catalog_model::{CollectionKind, Document, Value};
use crate::catalog_store::DocumentStore;

/// Output field of [`price_rollup_pipeline`].
pub const TOTAL_FIELD: &str = "total";

/// Output field when a pipeline ends without a [`Stage::GroupSum`].
pub const COUNT_FIELD: &str = "count";

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Keep documents where the dotted path exists.
    MatchExists(String),
    /// Replace each document by `{ as_field: <value at path> }`, dropping
    /// documents without that path.
    Project { path: String, as_field: String },
    /// Collapse everything into `{ output: sum of field }`.
    GroupSum { field: String, output: String },
}

/// Running numeric total; stays integral until a float is added or the
/// integer sum would overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Sum {
    Integer(i64),
    Float(f64),
}

impl Sum {
    fn add(self, value: &Value) -> Option<Sum> {
        match (self, value) {
            (Sum::Integer(acc), Value::Integer(n)) => Some(match acc.checked_add(*n) {
                Some(total) => Sum::Integer(total),
                None => Sum::Float(acc as f64 + *n as f64),
            }),
            (Sum::Integer(acc), Value::Float(n)) => Some(Sum::Float(acc as f64 + n)),
            (Sum::Float(acc), Value::Integer(n)) => Some(Sum::Float(acc + *n as f64)),
            (Sum::Float(acc), Value::Float(n)) => Some(Sum::Float(acc + n)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Sum::Integer(n) => Value::Integer(n),
            Sum::Float(n) => Value::Float(n),
        }
    }
}

/// Applies `stages` in order to `documents`.
pub fn run_pipeline(documents: Vec<Document>, stages: &[Stage]) -> Document {
    let mut current = documents;

    for stage in stages {
        current = match stage {
            Stage::MatchExists(path) => current
                .into_iter()
                .filter(|document| document.get_path(path).is_some())
                .collect(),
            Stage::Project { path, as_field } => current
                .into_iter()
                .filter_map(|document| {
                    document
                        .get_path(path)
                        .cloned()
                        .map(|value| Document::new().with(as_field.as_str(), value))
                })
                .collect(),
            Stage::GroupSum { field, output } => {
                let mut sum = Sum::Integer(0);
                for document in &current {
                    let Some(value) = document.get_path(field) else {
                        continue;
                    };
                    match sum.add(value) {
                        Some(next) => sum = next,
                        None => warn!("Skipping non-numeric `{}` value {} in sum", field, value),
                    }
                }
                vec![Document::new().with(output.as_str(), sum.into_value())]
            }
        };
    }

    match stages.last() {
        Some(Stage::GroupSum { .. }) => current.into_iter().next().unwrap_or_default(),
        _ => Document::new().with(COUNT_FIELD, current.len() as i64),
    }
}

/// Sums `list_price.value` over every document that has a `list_price`.
pub fn price_rollup_pipeline() -> Vec<Stage> {
    vec![
        Stage::MatchExists("list_price".to_string()),
        Stage::Project {
            path: "list_price.value".to_string(),
            as_field: "price".to_string(),
        },
        Stage::GroupSum {
            field: "price".to_string(),
            output: TOTAL_FIELD.to_string(),
        },
    ]
}

/// Total list price of all priced components.
pub fn total_list_price(store: &impl DocumentStore) -> Result<Value, AppResponse> {
    let result = store.aggregate(CollectionKind::Components, &price_rollup_pipeline())?;
    Ok(result.get(TOTAL_FIELD).cloned().unwrap_or(Value::Integer(0)))
}

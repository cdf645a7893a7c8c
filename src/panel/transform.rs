//! Client-side transformation steps
//!
//! Steps run in order on the query results; `calculateField` steps can
//! consume fields produced by earlier steps by name.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One transformation step: an id plus its options bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub id: String,
    pub options: Value,
}

/// Arithmetic operator of a binary `calculateField` step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// Operand of a binary `calculateField` step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A field matched by name
    Field(String),
    /// A literal, written as text
    Fixed(String),
}

impl Operand {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn fixed(value: impl Into<String>) -> Self {
        Self::Fixed(value.into())
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Field(name) => json!({"matcher": {"id": "byName", "options": name}}),
            Self::Fixed(value) => json!({"fixed": value}),
        }
    }
}

impl Transformation {
    /// Create a step from raw options
    pub fn new(id: impl Into<String>, options: Value) -> Self {
        Self {
            id: id.into(),
            options,
        }
    }

    /// Turn series labels into rows
    pub fn labels_to_fields_rows() -> Self {
        Self::new("labelsToFields", json!({"mode": "rows"}))
    }

    /// Hide and rename columns
    pub fn organize(exclude: &[&str], rename: &[(&str, &str)]) -> Self {
        let exclude: Map<String, Value> = exclude
            .iter()
            .map(|name| (name.to_string(), Value::Bool(true)))
            .collect();
        let rename: Map<String, Value> = rename
            .iter()
            .map(|(from, to)| (from.to_string(), Value::String(to.to_string())))
            .collect();

        Self::new(
            "organize",
            json!({
                "excludeByName": exclude,
                "indexByName": {},
                "renameByName": rename,
            }),
        )
    }

    /// Running sum of `field`, stored as `alias`
    pub fn cumulative_sum(alias: &str, field: &str) -> Self {
        Self::new(
            "calculateField",
            json!({
                "alias": alias,
                "cumulative": {"field": field, "reducer": "sum"},
                "mode": "cumulativeFunctions",
                "reduce": {"reducer": "sum"},
            }),
        )
    }

    /// `left <op> right`, stored as `alias`
    ///
    /// `replace_fields` controls whether the result replaces all other
    /// fields; `None` leaves the platform default.
    pub fn binary(
        alias: &str,
        left: Operand,
        operator: BinaryOperator,
        right: Operand,
        replace_fields: Option<bool>,
    ) -> Self {
        let mut options = json!({
            "alias": alias,
            "binary": {
                "left": left.to_value(),
                "operator": operator.symbol(),
                "right": right.to_value(),
            },
            "mode": "binary",
            "reduce": {"reducer": "sum"},
        });
        if let (Some(replace), Some(map)) = (replace_fields, options.as_object_mut()) {
            map.insert("replaceFields".to_string(), Value::Bool(replace));
        }
        Self::new("calculateField", options)
    }

    /// Alias of the field this step produces, if any
    pub fn alias(&self) -> Option<&str> {
        self.options.get("alias").and_then(Value::as_str)
    }
}

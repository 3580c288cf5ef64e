//! Declarative document shapes.
//!
//! A [`Shape`] describes the structure a decoded JSON value must have. The
//! same definition validates incoming documents and produces the minimal
//! valid instance through [`Shape::default_value`].

use serde_json::{Map, Value};

/// Structural description of a JSON value.
#[derive(Debug)]
pub enum Shape {
    String,
    /// Any JSON number; `default` seeds [`Shape::default_value`].
    Number { default: f64 },
    Array {
        item: &'static Shape,
        non_empty: bool,
    },
    /// Object with the listed fields. Undeclared fields are ignored.
    Object { fields: &'static [Field] },
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub shape: &'static Shape,
}

/// First place a value departs from its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON path of the offending node, e.g. `$.tiles[0][1].uv.left`.
    pub path: String,
    pub expected: String,
}

impl Shape {
    /// Check `value` against this shape.
    pub fn validate(&self, value: &Value) -> Result<(), Violation> {
        let mut path = String::from("$");
        self.check(value, &mut path)
    }

    fn check(&self, value: &Value, path: &mut String) -> Result<(), Violation> {
        match self {
            Shape::String => {
                if !value.is_string() {
                    return Err(violation(path, "string"));
                }
            }
            Shape::Number { .. } => {
                if !value.is_number() {
                    return Err(violation(path, "number"));
                }
            }
            Shape::Array { item, non_empty } => {
                let Some(items) = value.as_array() else {
                    return Err(violation(path, "array"));
                };
                if *non_empty && items.is_empty() {
                    return Err(violation(path, "non-empty array"));
                }
                for (i, v) in items.iter().enumerate() {
                    let len = path.len();
                    path.push_str(&format!("[{i}]"));
                    item.check(v, path)?;
                    path.truncate(len);
                }
            }
            Shape::Object { fields } => {
                let Some(map) = value.as_object() else {
                    return Err(violation(path, "object"));
                };
                for field in fields.iter() {
                    let len = path.len();
                    path.push('.');
                    path.push_str(field.name);
                    let Some(v) = map.get(field.name) else {
                        return Err(violation(path, &format!("field `{}`", field.name)));
                    };
                    field.shape.check(v, path)?;
                    path.truncate(len);
                }
            }
        }
        Ok(())
    }

    /// Minimal value that satisfies this shape.
    ///
    /// Non-empty arrays get exactly one default item; other arrays are empty.
    pub fn default_value(&self) -> Value {
        match self {
            Shape::String => Value::String(String::new()),
            Shape::Number { default } => Value::from(*default),
            Shape::Array { item, non_empty } => {
                if *non_empty {
                    Value::Array(vec![item.default_value()])
                } else {
                    Value::Array(Vec::new())
                }
            }
            Shape::Object { fields } => {
                let map: Map<String, Value> = fields
                    .iter()
                    .map(|f| (f.name.to_string(), f.shape.default_value()))
                    .collect();
                Value::Object(map)
            }
        }
    }
}

fn violation(path: &str, expected: &str) -> Violation {
    Violation {
        path: path.to_string(),
        expected: expected.to_string(),
    }
}

pub static STRING: Shape = Shape::String;
pub static ZERO: Shape = Shape::Number { default: 0.0 };
pub static ONE: Shape = Shape::Number { default: 1.0 };
pub static STRING_LIST: Shape = Shape::Array {
    item: &STRING,
    non_empty: false,
};

//! Explicit input schema of a trained model.
//!
//! A trained artifact carries the ordered list of columns it was fitted on.
//! Rows are addressed by column name, so field order inside a [`TabularRow`]
//! does not matter, but the set of names and their types must match exactly.
//! [`FeatureSchema::encode`] turns a conforming row into the numeric design
//! vector the regressor consumes, one-hot expanding categorical columns in
//! level order.

use crate::domain::car::{BodyStyle, FuelType, Make, Transmission};
use crate::domain::errors::SchemaMismatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed cell of a tabular row.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
    Category(String),
}

impl FeatureValue {
    pub fn category(label: impl Into<String>) -> Self {
        FeatureValue::Category(label.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FeatureValue::Integer(_) => "integer",
            FeatureValue::Float(_) => "float",
            FeatureValue::Category(_) => "categorical",
        }
    }
}

/// A single row of named values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularRow {
    values: BTreeMap<String, FeatureValue>,
}

impl TabularRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FeatureValue) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<FeatureValue> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Categorical { levels: Vec<String> },
}

impl ColumnKind {
    /// Number of design-vector slots this column occupies.
    pub fn width(&self) -> usize {
        match self {
            ColumnKind::Categorical { levels } => levels.len(),
            _ => 1,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Categorical { .. } => "categorical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn integer(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Integer,
        }
    }

    pub fn float(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Float,
        }
    }

    pub fn categorical(name: &str, levels: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Categorical { levels },
        }
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ColumnKind::Categorical { levels } => {
                write!(f, "{} (categorical: {})", self.name, levels.join(", "))
            }
            kind => write!(f, "{} ({})", self.name, kind.type_name()),
        }
    }
}

/// Ordered column list a model was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// Schema produced by the car form, with categorical levels in widget order.
    pub fn car_default() -> Self {
        Self::new(vec![
            ColumnSpec::integer("year"),
            ColumnSpec::integer("mileage"),
            ColumnSpec::categorical("make", Make::labels()),
            ColumnSpec::categorical("fuel_type", FuelType::labels()),
            ColumnSpec::categorical("transmission", Transmission::labels()),
            ColumnSpec::float("engine_size"),
            ColumnSpec::categorical("body_style", BodyStyle::labels()),
            ColumnSpec::integer("doors"),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Length of the encoded design vector.
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.kind.width()).sum()
    }

    /// Checks `row` against the schema and encodes it.
    ///
    /// Integers are accepted by float columns; nothing else is coerced.
    pub fn encode(&self, row: &TabularRow) -> Result<Vec<f64>, SchemaMismatch> {
        if let Some(extra) = row
            .column_names()
            .find(|name| !self.columns.iter().any(|c| c.name == *name))
        {
            return Err(SchemaMismatch::UnexpectedColumn {
                column: extra.to_string(),
            });
        }

        let mut design = Vec::with_capacity(self.width());
        for column in &self.columns {
            let value = row
                .get(&column.name)
                .ok_or_else(|| SchemaMismatch::MissingColumn {
                    column: column.name.clone(),
                })?;

            match (&column.kind, value) {
                (ColumnKind::Integer, FeatureValue::Integer(v)) => design.push(*v as f64),
                (ColumnKind::Float, FeatureValue::Float(v)) => design.push(*v),
                (ColumnKind::Float, FeatureValue::Integer(v)) => design.push(*v as f64),
                (ColumnKind::Categorical { levels }, FeatureValue::Category(label)) => {
                    let hot = levels.iter().position(|l| l == label).ok_or_else(|| {
                        SchemaMismatch::UnknownCategory {
                            column: column.name.clone(),
                            value: label.clone(),
                        }
                    })?;
                    design.extend((0..levels.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
                }
                (kind, value) => {
                    return Err(SchemaMismatch::TypeMismatch {
                        column: column.name.clone(),
                        expected: kind.type_name(),
                        found: value.type_name(),
                    });
                }
            }
        }
        Ok(design)
    }
}

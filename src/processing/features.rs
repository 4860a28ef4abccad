//! Named feature rows and alignment to the model's training schema

use crate::error::{RecommenderError, Result};
use log::debug;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A single sample: column names paired with numeric values
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Array1<f32>,
}

/// Ordered column list the classifier was trained on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureRow {
    pub fn new(columns: Vec<String>, values: Array1<f32>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(RecommenderError::FeaturePreparation(format!(
                "{} column names for {} values",
                columns.len(),
                values.len()
            )));
        }
        Ok(Self { columns, values })
    }

    /// Concatenate rows side by side, keeping every column (duplicates included)
    pub fn concat(rows: impl IntoIterator<Item = FeatureRow>) -> Self {
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for row in rows {
            columns.extend(row.columns);
            values.extend(row.values.iter().copied());
        }
        Self {
            columns,
            values: Array1::from_vec(values),
        }
    }

    /// Drop every repeated column name, keeping its first occurrence.
    /// Two vocabularies sharing a label collapse into one column here.
    pub fn dedup_columns(self) -> Self {
        let mut seen = HashSet::with_capacity(self.columns.len());
        let mut columns = Vec::with_capacity(self.columns.len());
        let mut values = Vec::with_capacity(self.columns.len());

        for (column, value) in self.columns.into_iter().zip(self.values.iter().copied()) {
            if seen.insert(column.clone()) {
                columns.push(column);
                values.push(value);
            } else {
                debug!("Dropping duplicate feature column '{}'", column);
            }
        }

        Self {
            columns,
            values: Array1::from_vec(values),
        }
    }

    /// Reindex to `schema`: zero for missing columns, unknown columns dropped
    pub fn align(&self, schema: &FeatureSchema) -> Self {
        let mut lookup: HashMap<&str, f32> = HashMap::with_capacity(self.columns.len());
        for (column, value) in self.columns.iter().zip(self.values.iter()) {
            lookup.entry(column.as_str()).or_insert(*value);
        }

        let dropped = self
            .columns
            .iter()
            .filter(|column| !schema.contains(column))
            .count();
        if dropped > 0 {
            debug!("{} encoded column(s) not in the model schema were dropped", dropped);
        }

        let values = schema
            .columns()
            .iter()
            .map(|column| lookup.get(column.as_str()).copied().unwrap_or(0.0))
            .collect::<Array1<f32>>();

        Self {
            columns: schema.columns().to_vec(),
            values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> ArrayView1<'_, f32> {
        self.values.view()
    }

    pub fn get(&self, column: &str) -> Option<f32> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|position| self.values[position])
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns of `columns` the schema does not know about
    pub fn unknown_columns<'a>(&self, columns: &'a [String]) -> Vec<&'a str> {
        let known: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        columns
            .iter()
            .map(String::as_str)
            .filter(|c| !known.contains(c))
            .collect()
    }
}

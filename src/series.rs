// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Chart data extracted from a results file.

use serde_derive::Deserialize;

use crate::error::{Error, Result};
use crate::table::{column, Table};

/// The dimension that varies across a results file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Concurrency,
    DataSize,
}

impl Axis {
    pub fn column(self) -> usize {
        match self {
            Axis::Concurrency => column::CONCURRENCY,
            Axis::DataSize => column::DATA_SIZE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Concurrency => "concurrency",
            Axis::DataSize => "echo size(Byte)",
        }
    }

    /// Guess the x-axis from the data. Files are expected to be ordered so
    /// that the first and last rows differ in concurrency when concurrency is
    /// what varies. When they share it, data size is assumed to vary.
    pub fn infer(table: &Table) -> Result<Axis> {
        let (first, last) = match (table.first(), table.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(Error::Empty {
                    path: table.path().to_path_buf(),
                })
            }
        };
        if first.field(column::CONCURRENCY)? == last.field(column::CONCURRENCY)? {
            Ok(Axis::DataSize)
        } else {
            Ok(Axis::Concurrency)
        }
    }
}

/// How the x-axis is chosen.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisSelection {
    Auto,
    Concurrency,
    Size,
}

impl Default for AxisSelection {
    fn default() -> Self {
        AxisSelection::Auto
    }
}

impl AxisSelection {
    pub fn resolve(self, table: &Table) -> Result<Axis> {
        match self {
            AxisSelection::Auto => Axis::infer(table),
            AxisSelection::Concurrency => Ok(Axis::Concurrency),
            AxisSelection::Size => Ok(Axis::DataSize),
        }
    }
}

impl std::str::FromStr for AxisSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(AxisSelection::Auto),
            "concurrency" => Ok(AxisSelection::Concurrency),
            "size" => Ok(AxisSelection::Size),
            other => Err(format!("unknown axis: {}", other)),
        }
    }
}

/// X-axis tick values, taken from the rows of the first kind in the file.
/// Every other kind is assumed to follow the same progression.
pub fn x_ticks(table: &Table, axis: Axis) -> Result<Vec<i64>> {
    let key = match table.first() {
        Some(row) => row.kind()?,
        None => return Ok(Vec::new()),
    };

    let mut ticks = Vec::new();
    for row in table.rows() {
        if row.kind()? == key {
            ticks.push(row.integer(axis.column())?);
        }
    }
    Ok(ticks)
}

/// The values of one kind, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Series {
    name: String,
    values: Vec<i64>,
}

impl Series {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// Series keyed by kind, in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesCollection {
    series: Vec<Series>,
}

impl SeriesCollection {
    /// Group `column` of every row by kind. Values are scaled by `multiplier`
    /// and truncated toward zero.
    pub fn collect(table: &Table, column: usize, multiplier: f64) -> Result<Self> {
        let mut collection = Self::default();
        for row in table.rows() {
            let value = (row.float(column)? * multiplier) as i64;
            collection.push(row.kind()?, value);
        }
        Ok(collection)
    }

    fn push(&mut self, name: &str, value: i64) {
        match self.series.iter_mut().find(|s| s.name == name) {
            Some(series) => series.values.push(value),
            None => self.series.push(Series {
                name: name.to_string(),
                values: vec![value],
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Largest value across all series.
    pub fn max(&self) -> Option<i64> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
    }
}

impl<'a> IntoIterator for &'a SeriesCollection {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

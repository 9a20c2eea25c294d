// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Headerless benchmark result files, addressed by row and column position.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::error::{CellError, Error, Result};

/// Column positions of a benchmark record.
pub mod column {
    pub const KIND: usize = 0;
    pub const CONCURRENCY: usize = 1;
    pub const DATA_SIZE: usize = 2;
    pub const THROUGHPUT: usize = 3;
    pub const P99: usize = 4;
    pub const P999: usize = 5;
    pub const SERVER_CPU: usize = 6;
    pub const CLIENT_CPU: usize = 7;
}

/// A fully buffered results file.
#[derive(Clone, Debug)]
pub struct Table {
    path: PathBuf,
    rows: Vec<StringRecord>,
}

impl Table {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path, file)
    }

    /// Parse rows from `reader`. `path` is only used to label errors.
    pub fn from_reader<P: AsRef<Path>, R: Read>(path: P, reader: R) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.records() {
            match record {
                Ok(record) => rows.push(record),
                Err(source) => return Err(Error::Csv { path, source }),
            }
        }

        debug!("loaded {} rows from {}", rows.len(), path.display());
        Ok(Self { path, rows })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|record| Row {
            table: self,
            index,
            record,
        })
    }

    pub fn first(&self) -> Option<Row<'_>> {
        self.row(0)
    }

    pub fn last(&self) -> Option<Row<'_>> {
        self.len().checked_sub(1).and_then(|index| self.row(index))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(move |(index, record)| Row {
            table: self,
            index,
            record,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn field(&self, column: usize) -> Result<&'a str> {
        self.record
            .get(column)
            .ok_or_else(|| Error::MissingColumn {
                path: self.table.path.clone(),
                row: self.index,
                column,
            })
    }

    pub fn kind(&self) -> Result<&'a str> {
        self.field(column::KIND)
    }

    pub fn float(&self, column: usize) -> Result<f64> {
        let field = self.field(column)?;
        parse_float(field).map_err(|source| self.cell_error(column, source))
    }

    pub fn integer(&self, column: usize) -> Result<i64> {
        let field = self.field(column)?;
        field
            .trim()
            .parse()
            .map_err(|_| self.cell_error(column, CellError::InvalidNumber(field.to_string())))
    }

    /// Attach this row's position to a cell level failure.
    pub fn cell_error(&self, column: usize, source: CellError) -> Error {
        Error::Cell {
            path: self.table.path.clone(),
            row: self.index,
            column,
            source,
        }
    }
}

pub fn parse_float(field: &str) -> std::result::Result<f64, CellError> {
    field
        .trim()
        .parse()
        .map_err(|_| CellError::InvalidNumber(field.to_string()))
}

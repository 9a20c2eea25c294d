// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while reading, comparing or rendering benchmark results. Every
/// variant is fatal to the tool that hit it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed csv in {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{} contains no rows", .path.display())]
    Empty { path: PathBuf },
    #[error("{}: row {row} has no column {column}", .path.display())]
    MissingColumn {
        path: PathBuf,
        row: usize,
        column: usize,
    },
    #[error("{}: row {row} column {column}: {source}", .path.display())]
    Cell {
        path: PathBuf,
        row: usize,
        column: usize,
        source: CellError,
    },
    #[error("row {row} is missing from the baseline, which has {rows} rows")]
    MissingRow { row: usize, rows: usize },
    #[error("row count mismatch: baseline has {baseline} rows, current has {current}")]
    RowCount { baseline: usize, current: usize },
    #[error("row {row} describes {current} in the current file but {baseline} in the baseline")]
    RowMismatch {
        row: usize,
        baseline: String,
        current: String,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid colour for {label:?}: {value:?}")]
    Colour { label: String, value: String },
    #[error("failed to render {}: {message}", .path.display())]
    Chart { path: PathBuf, message: String },
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

/// A numeric field that could not take part in a computation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CellError {
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("baseline value is zero")]
    ZeroBaseline,
}

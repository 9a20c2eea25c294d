// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reporting for benchmark result files: percentage diffs between two runs
//! and line charts of a single run.

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

pub mod chart;
pub mod config;
pub mod differ;
pub mod error;
pub mod logger;
pub mod series;
pub mod table;

pub use crate::chart::{render_all, Chart, ChartSpec, Palette, CHARTS};
pub use crate::config::{ConfigFile, DiffConfig, PlotConfig};
pub use crate::differ::{compare, diff_cell, ComparisonRow, DiffCell, Layout, Report};
pub use crate::error::{CellError, Error, Result};
pub use crate::logger::Logger;
pub use crate::series::{x_ticks, Axis, AxisSelection, SeriesCollection};
pub use crate::table::Table;

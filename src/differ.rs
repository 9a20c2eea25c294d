// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Percentage change report between a baseline and a current results file.

use std::fmt;
use std::io::{self, Write};

use crate::error::{CellError, Error, Result};
use crate::table::{column, parse_float, Row, Table};

const HIGHLIGHT: &str = "\x1b[93m";
const RESET: &str = "\x1b[0m";

/// The numeric columns that are compared, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Throughput,
    P99,
    P999,
    ServerCpu,
    ClientCpu,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Throughput,
        Metric::P99,
        Metric::P999,
        Metric::ServerCpu,
        Metric::ClientCpu,
    ];

    pub fn column(self) -> usize {
        match self {
            Metric::Throughput => column::THROUGHPUT,
            Metric::P99 => column::P99,
            Metric::P999 => column::P999,
            Metric::ServerCpu => column::SERVER_CPU,
            Metric::ClientCpu => column::CLIENT_CPU,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Throughput => "QPS",
            Metric::P99 => "P99",
            Metric::P999 => "P999",
            Metric::ServerCpu => "Server CPU",
            Metric::ClientCpu => "Client CPU",
        }
    }
}

/// Header row printed above the comparison rows.
pub fn header() -> Vec<&'static str> {
    let mut header = vec!["Kind", "Concurrency", "Data Size"];
    header.extend(Metric::ALL.iter().map(|metric| metric.label()));
    header
}

/// The current value of a metric together with its change from the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffCell {
    value: f64,
    percent: f64,
}

impl DiffCell {
    pub fn new(old: f64, now: f64) -> std::result::Result<Self, CellError> {
        if old == 0.0 {
            return Err(CellError::ZeroBaseline);
        }
        Ok(Self {
            value: now,
            percent: (now - old) / old * 100.0,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// The parenthesized change, eg `(+10.0%)`.
    pub fn delta(&self) -> String {
        let sign = if self.percent >= 0.0 { "+" } else { "" };
        format!("({}{:.1}%)", sign, self.percent)
    }

    /// Terminal rendering, with the change highlighted.
    pub fn highlighted(&self) -> String {
        format!(
            "{}{}{}{}",
            format_value(self.value),
            HIGHLIGHT,
            self.delta(),
            RESET
        )
    }
}

/// Shortest round-trip form, always with a decimal point or an exponent.
/// Exponents carry a sign and at least two digits, eg `1e+16`, `1.5e-07`.
fn format_value(value: f64) -> String {
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

impl fmt::Display for DiffCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", format_value(self.value), self.delta())
    }
}

/// Compare two textual values, `old` from the baseline and `now` from the
/// current file.
pub fn diff_cell(old: &str, now: &str) -> std::result::Result<DiffCell, CellError> {
    DiffCell::new(parse_float(old)?, parse_float(now)?)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRow {
    kind: String,
    concurrency: String,
    data_size: String,
    cells: Vec<DiffCell>,
}

impl ComparisonRow {
    fn new(baseline: &Row, current: &Row) -> Result<Self> {
        let mut cells = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL.iter() {
            let column = metric.column();
            let old = baseline.field(column)?;
            let now = current.field(column)?;
            let cell = diff_cell(old, now).map_err(|e| {
                let in_baseline = match &e {
                    CellError::ZeroBaseline => true,
                    CellError::InvalidNumber(value) => value == old,
                };
                if in_baseline {
                    baseline.cell_error(column, e)
                } else {
                    current.cell_error(column, e)
                }
            })?;
            cells.push(cell);
        }

        Ok(Self {
            kind: current.kind()?.to_string(),
            concurrency: current.field(column::CONCURRENCY)?.to_string(),
            data_size: current.field(column::DATA_SIZE)?.to_string(),
            cells,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn concurrency(&self) -> &str {
        &self.concurrency
    }

    pub fn data_size(&self) -> &str {
        &self.data_size
    }

    pub fn cells(&self) -> &[DiffCell] {
        &self.cells
    }

    pub fn cell(&self, metric: Metric) -> Option<&DiffCell> {
        Metric::ALL
            .iter()
            .position(|m| *m == metric)
            .and_then(|i| self.cells.get(i))
    }
}

/// Comparison rows sorted by kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    rows: Vec<ComparisonRow>,
}

/// Pair every row of `current` with the row at the same position in
/// `baseline`. With `strict`, both files must have the same number of rows
/// and describe the same configurations in the same order.
pub fn compare(baseline: &Table, current: &Table, strict: bool) -> Result<Report> {
    if strict {
        validate(baseline, current)?;
    }

    let mut rows = Vec::with_capacity(current.len());
    for now in current.rows() {
        let old = baseline.row(now.index()).ok_or(Error::MissingRow {
            row: now.index(),
            rows: baseline.len(),
        })?;
        rows.push(ComparisonRow::new(&old, &now)?);
    }

    // stable, equal kinds keep file order
    rows.sort_by(|a, b| a.kind.cmp(&b.kind));

    debug!("compared {} rows", rows.len());
    Ok(Report { rows })
}

fn validate(baseline: &Table, current: &Table) -> Result<()> {
    if baseline.len() != current.len() {
        return Err(Error::RowCount {
            baseline: baseline.len(),
            current: current.len(),
        });
    }
    for (old, now) in baseline.rows().zip(current.rows()) {
        let old_id = identity(&old)?;
        let now_id = identity(&now)?;
        if old_id != now_id {
            return Err(Error::RowMismatch {
                row: now.index(),
                baseline: old_id,
                current: now_id,
            });
        }
    }
    Ok(())
}

fn identity(row: &Row) -> Result<String> {
    Ok(format!(
        "{} c={} b={}",
        row.kind()?,
        row.field(column::CONCURRENCY)?,
        row.field(column::DATA_SIZE)?
    ))
}

/// Fixed width cell layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub cell_size: usize,
    pub gap: usize,
    pub highlight: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_size: 15,
            gap: 5,
            highlight: false,
        }
    }
}

impl Layout {
    /// Number of spaces to follow a cell whose visible text is `width`
    /// characters wide.
    pub fn padding(&self, width: usize) -> usize {
        match self.cell_size.checked_sub(width) {
            Some(padding) if padding > 0 => padding,
            _ => self.gap,
        }
    }

    pub fn pad(&self, text: &str) -> String {
        self.pad_visible(text, text.chars().count())
    }

    fn pad_visible(&self, text: &str, width: usize) -> String {
        format!("{}{}", text, " ".repeat(self.padding(width)))
    }
}

impl Report {
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rendered lines, header first.
    pub fn lines(&self, layout: &Layout) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(header().iter().map(|h| layout.pad(h)).collect());

        for row in &self.rows {
            let mut line = String::new();
            for text in &[&row.kind, &row.concurrency, &row.data_size] {
                line.push_str(&layout.pad(text));
            }
            for cell in &row.cells {
                let plain = cell.to_string();
                if layout.highlight {
                    line.push_str(&layout.pad_visible(&cell.highlighted(), plain.chars().count()));
                } else {
                    line.push_str(&layout.pad(&plain));
                }
            }
            lines.push(line);
        }
        lines
    }

    pub fn render<W: Write>(&self, writer: &mut W, layout: &Layout) -> io::Result<()> {
        for line in self.lines(layout) {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(data: &str) -> Table {
        Table::from_reader("test.csv", data.as_bytes()).unwrap()
    }

    #[test]
    fn cell_increase() {
        assert_eq!(diff_cell("100.0", "110.0").unwrap().to_string(), "110.0(+10.0%)");
    }

    #[test]
    fn cell_decrease() {
        assert_eq!(diff_cell("100.0", "90.0").unwrap().to_string(), "90.0(-10.0%)");
    }

    #[test]
    fn cell_unchanged() {
        assert_eq!(diff_cell("100.0", "100.0").unwrap().to_string(), "100.0(+0.0%)");
    }

    #[test]
    fn cell_keeps_precision_of_value() {
        let cell = diff_cell("100000", "101152.29").unwrap();
        assert_eq!(cell.to_string(), "101152.29(+1.2%)");
        assert_eq!(diff_cell("4", "3").unwrap().to_string(), "3.0(-25.0%)");
    }

    #[test]
    fn cell_exponent_form() {
        assert_eq!(
            diff_cell("1", "1e16").unwrap().to_string(),
            "1e+16(+1000000000000000000.0%)"
        );
        assert_eq!(diff_cell("1", "0.00001").unwrap().to_string(), "1e-05(-100.0%)");
        assert_eq!(format_value(1.5e-7), "1.5e-07");
        assert_eq!(format_value(1.23e100), "1.23e+100");
        assert_eq!(format_value(0.0001), "0.0001");
    }

    #[test]
    fn cell_errors() {
        assert_eq!(diff_cell("0", "1"), Err(CellError::ZeroBaseline));
        assert_eq!(
            diff_cell("1", "n/a"),
            Err(CellError::InvalidNumber("n/a".to_string()))
        );
    }

    #[test]
    fn highlight_wraps_delta_only() {
        let cell = diff_cell("100", "110").unwrap();
        assert_eq!(cell.highlighted(), "110.0\x1b[93m(+10.0%)\x1b[0m");
    }

    #[test]
    fn padding() {
        let layout = Layout::default();
        assert_eq!(layout.pad("0123456789"), "0123456789     ");
        let long = "01234567890123456789";
        assert_eq!(layout.pad(long), format!("{}     ", long));
        // an exact fit also falls back to the gap
        assert_eq!(layout.padding(15), 5);
        assert_eq!(layout.padding(14), 1);
    }

    #[test]
    fn rows_sorted_by_kind() {
        let data = "B,1,1,1,1,1,1,1\nA,1,1,1,1,1,1,1\nC,1,1,1,1,1,1,1\n";
        let report = compare(&table(data), &table(data), false).unwrap();
        let kinds: Vec<&str> = report.rows().iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec!["A", "B", "C"]);
    }

    #[test]
    fn sort_is_stable() {
        let data = "B,1,1,1,1,1,1,1\nA,2,1,1,1,1,1,1\nA,1,1,1,1,1,1,1\n";
        let report = compare(&table(data), &table(data), false).unwrap();
        let rows: Vec<(&str, &str)> = report
            .rows()
            .iter()
            .map(|r| (r.kind(), r.concurrency()))
            .collect();
        assert_eq!(rows, vec![("A", "2"), ("A", "1"), ("B", "1")]);
    }

    #[test]
    fn columns_follow_metric_order() {
        let baseline = table("k,10,64,100,1,1,50,80\n");
        let current = table("k,10,64,200,2,1,25,80\n");
        let report = compare(&baseline, &current, false).unwrap();
        let row = &report.rows()[0];
        assert_eq!(row.cell(Metric::Throughput).unwrap().percent(), 100.0);
        assert_eq!(row.cell(Metric::ServerCpu).unwrap().percent(), -50.0);
        assert_eq!(row.cell(Metric::ClientCpu).unwrap().percent(), 0.0);
        assert_eq!(
            header()[5..].to_vec(),
            vec!["P999", "Server CPU", "Client CPU"]
        );
    }

    #[test]
    fn line_count_is_rows_plus_header() {
        let data = "A,1,1,10.0,1.0,2.0,3.0,4.0\nB,1,1,10.0,1.0,2.0,3.0,4.0\n";
        let report = compare(&table(data), &table(data), false).unwrap();
        assert_eq!(report.lines(&Layout::default()).len(), 3);
    }

    #[test]
    fn missing_baseline_row() {
        let baseline = table("A,1,1,1,1,1,1,1\n");
        let current = table("A,1,1,1,1,1,1,1\nA,2,1,1,1,1,1,1\n");
        let err = compare(&baseline, &current, false).unwrap_err();
        assert!(matches!(err, Error::MissingRow { row: 1, rows: 1 }));
    }

    #[test]
    fn extra_baseline_rows_ignored() {
        let baseline = table("A,1,1,1,1,1,1,1\nA,2,1,1,1,1,1,1\n");
        let current = table("A,1,1,1,1,1,1,1\n");
        assert_eq!(compare(&baseline, &current, false).unwrap().len(), 1);
    }

    #[test]
    fn strict_checks_counts_and_identity() {
        let baseline = table("A,1,1,1,1,1,1,1\nA,2,1,1,1,1,1,1\n");
        let current = table("A,1,1,1,1,1,1,1\n");
        assert!(matches!(
            compare(&baseline, &current, true),
            Err(Error::RowCount {
                baseline: 2,
                current: 1
            })
        ));

        let current = table("A,1,1,1,1,1,1,1\nA,4,1,1,1,1,1,1\n");
        match compare(&baseline, &current, true) {
            Err(Error::RowMismatch { row, .. }) => assert_eq!(row, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn zero_baseline_points_at_baseline() {
        let baseline = table("A,1,1,0,1,1,1,1\n");
        let current = table("A,1,1,5,1,1,1,1\n");
        match compare(&baseline, &current, false) {
            Err(Error::Cell { column, source, .. }) => {
                assert_eq!(column, column::THROUGHPUT);
                assert_eq!(source, CellError::ZeroBaseline);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn highlighted_lines_keep_widths() {
        let data = "A,1,1,10.0,1.0,2.0,3.0,4.0\n";
        let report = compare(&table(data), &table(data), false).unwrap();
        let plain = report.lines(&Layout::default());
        let coloured = report.lines(&Layout {
            highlight: true,
            ..Layout::default()
        });
        let stripped = coloured[1].replace(HIGHLIGHT, "").replace(RESET, "");
        assert_eq!(stripped, plain[1]);
    }
}

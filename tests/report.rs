// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io::Write;
use std::path::Path;

use bench_report::*;
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn render(report: &Report, layout: &Layout) -> String {
    let mut out = Vec::new();
    report.render(&mut out, layout).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn self_diff_of_single_row() {
    let file = csv_file("A,1,1,10.0,1.0,2.0,3.0,4.0\n");
    let table = Table::load(file.path()).unwrap();
    let report = compare(&table, &table, false).unwrap();

    let output = render(&report, &Layout::default());
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "Kind           Concurrency    Data Size      QPS            P99            \
         P999           Server CPU     Client CPU     "
    );
    assert_eq!(lines[1].matches("(+0.0%)").count(), 5);
    assert!(lines[1].starts_with("A              1              1              10.0(+0.0%)    "));
}

#[test]
fn compares_files_on_disk() {
    let baseline = csv_file(
        "[GRPC],100,1024,100000,3.00,5.00,200.00,400.00\n\
         [THRIFT],100,1024,50000,2.00,4.00,100.00,300.00\n",
    );
    let current = csv_file(
        "[THRIFT],100,1024,55000,1.80,4.00,110.00,270.00\n\
         [GRPC],100,1024,101152.29,3.36,5.30,188.04,423.07\n",
    );
    // rows are paired by position, not by kind
    let report = compare(
        &Table::load(baseline.path()).unwrap(),
        &Table::load(current.path()).unwrap(),
        false,
    )
    .unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.rows()[0].kind(), "[GRPC]");
    assert_eq!(report.rows()[1].kind(), "[THRIFT]");
    assert_eq!(report.rows()[1].cells()[0].to_string(), "55000.0(-45.0%)");

    let output = render(&report, &Layout::default());
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn strict_mode_catches_reordered_rows() {
    let baseline = csv_file("a,1,64,1,1,1,1,1\nb,1,64,1,1,1,1,1\n");
    let current = csv_file("b,1,64,1,1,1,1,1\na,1,64,1,1,1,1,1\n");
    let baseline = Table::load(baseline.path()).unwrap();
    let current = Table::load(current.path()).unwrap();

    assert!(compare(&baseline, &current, false).is_ok());
    assert!(matches!(
        compare(&baseline, &current, true),
        Err(Error::RowMismatch { row: 0, .. })
    ));
}

#[test]
fn narrow_cells_fall_back_to_gap() {
    let file = csv_file("kind,1,1,1,1,1,1,1\n");
    let table = Table::load(file.path()).unwrap();
    let report = compare(&table, &table, false).unwrap();
    let layout = Layout {
        cell_size: 4,
        ..Layout::default()
    };
    let output = render(&report, &layout);
    assert!(output.lines().nth(1).unwrap().starts_with("kind     1   1   1.0(+0.0%)     "));
}

#[test]
fn missing_input_file() {
    let err = Table::load(Path::new("no/such/results.csv")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("no/such/results.csv"));
}

#[test]
fn config_drives_layout() {
    let config = DiffConfig::from_args(vec!["diff", "--color", "never", "--cell-size", "12", "a", "b"])
        .unwrap();
    let layout = config.diff().layout(true);
    assert!(!layout.highlight);
    assert_eq!(layout.cell_size, 12);

    let config = DiffConfig::from_args(vec!["diff", "a", "b"]).unwrap();
    assert!(config.diff().layout(true).highlight);
    assert!(!config.diff().layout(false).highlight);
}

#[test]
fn plot_data_for_concurrency_sweep() {
    let file = csv_file(
        "[thrift],10,1024,1000,1.5,2.5,1,1\n\
         [grpc],10,1024,800,2.0,3.0,1,1\n\
         [thrift],20,1024,1900,1.75,2.9,1,1\n\
         [grpc],20,1024,1500,2.2,3.4,1,1\n",
    );
    let table = Table::load(file.path()).unwrap();
    let axis = Axis::infer(&table).unwrap();
    assert_eq!(axis, Axis::Concurrency);
    assert_eq!(x_ticks(&table, axis).unwrap(), vec![10, 20]);

    let p99 = Chart::new(CHARTS[1], axis, vec![10, 20], &table).unwrap();
    let thrift = p99.series().get("[thrift]").unwrap();
    assert_eq!(thrift.values(), &[1500, 1750]);
    assert_eq!(p99.tick_label(1), "20");
    assert_eq!(CHARTS[1].filename("thrift"), "thrift_tp99.png");
}

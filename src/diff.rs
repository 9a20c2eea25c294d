// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use std::io::{self, BufWriter, IsTerminal};

use bench_report::{compare, fatal, DiffConfig, Error, Logger, Table};

fn main() {
    let config = match DiffConfig::new() {
        Ok(config) => config,
        Err(Error::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    Logger::new()
        .label("diff")
        .level(config.general().logging())
        .init()
        .expect("Failed to initialize logger");

    config.print();

    let (baseline, current) = match config.inputs() {
        Some(inputs) => inputs,
        None => {
            println!("{}", config.usage());
            return;
        }
    };

    let baseline = Table::load(baseline).unwrap_or_else(|e| fatal!("{}", e));
    let current = Table::load(current).unwrap_or_else(|e| fatal!("{}", e));
    debug!(
        "baseline: {} rows current: {} rows",
        baseline.len(),
        current.len()
    );

    let report =
        compare(&baseline, &current, config.diff().strict()).unwrap_or_else(|e| fatal!("{}", e));

    let stdout = io::stdout();
    let layout = config.diff().layout(stdout.is_terminal());
    let mut writer = BufWriter::new(stdout.lock());
    if let Err(e) = report.render(&mut writer, &layout) {
        fatal!("failed to write report: {}", e);
    }
}

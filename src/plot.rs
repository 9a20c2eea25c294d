// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use bench_report::{fatal, render_all, Error, Logger, PlotConfig, Table};

fn main() {
    let config = match PlotConfig::new() {
        Ok(config) => config,
        Err(Error::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    Logger::new()
        .label("plot")
        .level(config.general().logging())
        .init()
        .expect("Failed to initialize logger");

    config.print();

    let table = Table::load(config.input()).unwrap_or_else(|e| fatal!("{}", e));
    match render_all(&table, config.plot()) {
        Ok(written) => info!("rendered {} charts for {}", written.len(), config.plot().kind()),
        Err(e) => fatal!("{}", e),
    }
}

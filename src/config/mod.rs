// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod diff;
mod general;
mod plot;

pub use self::diff::{ColourMode, Diff};
pub use self::general::General;
pub use self::plot::Plot;

use std::ffi::OsString;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use serde_derive::Deserialize;

use crate::error::{Error, Result};
use crate::logger;
use crate::series::AxisSelection;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings that can be loaded from a TOML file. Every section is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    general: General,
    #[serde(default)]
    diff: Diff,
    #[serde(default)]
    plot: Plot,
}

impl ConfigFile {
    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn diff(&self) -> &Diff {
        &self.diff
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse TOML `content`. `name` only labels errors.
    pub fn parse<P: AsRef<Path>>(name: P, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: name.as_ref().to_path_buf(),
            source,
        })
    }
}

fn with_common_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.version(VERSION)
        .author("Brian Martin <bmartin@twitter.com>")
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

/// Load the config file named on the command line, if any, and apply the
/// verbosity flags to it.
fn load(matches: &ArgMatches) -> Result<ConfigFile> {
    let mut config = match matches.value_of("config") {
        Some(file) => ConfigFile::load_from_file(file)?,
        None => ConfigFile::default(),
    };
    let level = logger::raise(config.general.logging(), matches.occurrences_of("verbose"));
    config.general.set_logging(level);
    Ok(config)
}

/// a helper function to parse an optional argument by name from `ArgMatches`
fn parse_arg<T>(matches: &ArgMatches, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match matches.value_of(key) {
        Some(value) => value.parse().map(Some).map_err(|e| {
            Error::Cli(clap::Error::value_validation_auto(format!(
                "invalid value {:?} for '--{}': {}",
                value, key, e
            )))
        }),
        None => Ok(None),
    }
}

/// Settings for the `diff` tool.
#[derive(Clone, Debug)]
pub struct DiffConfig {
    general: General,
    diff: Diff,
    baseline: Option<PathBuf>,
    current: Option<PathBuf>,
    usage: String,
}

impl DiffConfig {
    /// parse command line options and return `DiffConfig`
    pub fn new() -> Result<Self> {
        Self::from_args(std::env::args_os())
    }

    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let app = with_common_args(App::new("diff"))
            .about("Compare benchmark results against a baseline")
            .arg(
                Arg::with_name("baseline")
                    .value_name("BASELINE")
                    .help("Baseline results (csv)")
                    .index(1),
            )
            .arg(
                Arg::with_name("current")
                    .value_name("CURRENT")
                    .help("Current results (csv)")
                    .index(2),
            )
            .arg(
                Arg::with_name("cell-size")
                    .long("cell-size")
                    .value_name("Characters")
                    .help("Width of each output column")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("color")
                    .long("color")
                    .value_name("WHEN")
                    .help("Highlight percentage changes")
                    .possible_value("auto")
                    .possible_value("always")
                    .possible_value("never")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("strict")
                    .long("strict")
                    .help("Require both files to describe the same rows in the same order")
                    .takes_value(false),
            );

        let matches = app.get_matches_from_safe(args)?;
        let config = load(&matches)?;

        let mut diff = config.diff;
        if let Some(cell_size) = parse_arg(&matches, "cell-size")? {
            diff.set_cell_size(cell_size);
        }
        if let Some(color) = parse_arg(&matches, "color")? {
            diff.set_color(color);
        }
        if matches.is_present("strict") {
            diff.set_strict(true);
        }

        Ok(Self {
            general: config.general,
            diff,
            baseline: matches.value_of_os("baseline").map(PathBuf::from),
            current: matches.value_of_os("current").map(PathBuf::from),
            usage: matches.usage().to_string(),
        })
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn diff(&self) -> &Diff {
        &self.diff
    }

    /// Baseline and current files, when both were given.
    pub fn inputs(&self) -> Option<(&Path, &Path)> {
        match (&self.baseline, &self.current) {
            (Some(baseline), Some(current)) => Some((baseline.as_path(), current.as_path())),
            _ => None,
        }
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn print(&self) {
        if let Some((baseline, current)) = self.inputs() {
            debug!(
                "Config: Baseline: {} Current: {}",
                baseline.display(),
                current.display()
            );
        }
        debug!(
            "Config: Cell Size: {} Gap: {} Color: {:?} Strict: {}",
            self.diff.cell_size(),
            self.diff.gap(),
            self.diff.color(),
            self.diff.strict()
        );
    }
}

/// Settings for the `plot` tool.
#[derive(Clone, Debug)]
pub struct PlotConfig {
    general: General,
    plot: Plot,
    input: Option<PathBuf>,
}

impl PlotConfig {
    /// parse command line options and return `PlotConfig`
    pub fn new() -> Result<Self> {
        Self::from_args(std::env::args_os())
    }

    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let app = with_common_args(App::new("plot"))
            .about("Render benchmark results as line charts")
            .arg(
                Arg::with_name("kind")
                    .value_name("KIND")
                    .help("Name of the results set, read from <KIND>.csv")
                    .index(1),
            )
            .arg(
                Arg::with_name("axis")
                    .long("axis")
                    .value_name("AXIS")
                    .help("The varying dimension used for the x-axis")
                    .possible_value("auto")
                    .possible_value("concurrency")
                    .possible_value("size")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("input")
                    .long("input")
                    .value_name("FILE")
                    .help("Read results from FILE instead of <KIND>.csv")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("output")
                    .long("output")
                    .value_name("DIR")
                    .help("Directory the charts are written to")
                    .takes_value(true),
            );

        let matches = app.get_matches_from_safe(args)?;
        let config = load(&matches)?;

        let mut plot = config.plot;
        if let Some(kind) = matches.value_of("kind") {
            plot.set_kind(kind.to_string());
        }
        if let Some(axis) = parse_arg::<AxisSelection>(&matches, "axis")? {
            plot.set_axis(axis);
        }
        if let Some(output) = matches.value_of("output") {
            plot.set_directory(output.to_string());
        }

        Ok(Self {
            general: config.general,
            plot,
            input: matches.value_of_os("input").map(PathBuf::from),
        })
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// The results file to read.
    pub fn input(&self) -> PathBuf {
        match &self.input {
            Some(input) => input.clone(),
            None => PathBuf::from(format!("{}.csv", self.plot.kind())),
        }
    }

    pub fn print(&self) {
        debug!(
            "Config: Kind: {} Input: {} Output: {}",
            self.plot.kind(),
            self.input().display(),
            self.plot.directory()
        );
        let (width, height) = self.plot.size();
        debug!(
            "Config: Size: {}x{} Axis: {:?}",
            width,
            height,
            self.plot.axis()
        );
    }
}

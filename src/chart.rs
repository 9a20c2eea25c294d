// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Line charts comparing benchmark kinds across an x-axis.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::config::Plot;
use crate::error::{Error, Result};
use crate::series::{x_ticks, Axis, SeriesCollection};
use crate::table::{column, Table};

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

/// Colours handed out by first appearance to kinds without an override.
pub const PALETTE: &[RGBColor] = &[
    hexcolour!(0xAA0000),
    hexcolour!(0x0000FF),
    hexcolour!(0x888888),
    hexcolour!(0xDDCC77),
    hexcolour!(0x999933),
    hexcolour!(0x332288),
    hexcolour!(0x117733),
    hexcolour!(0x88CCEE),
    hexcolour!(0x882255),
    hexcolour!(0x44AA99),
    hexcolour!(0xAA4499),
    hexcolour!(0xCC6677),
];

/// Headroom above the tallest point, leaves space for the legend.
const HEADROOM: f64 = 1.2;

/// One of the fixed charts rendered for a results file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub column: usize,
    pub multiplier: f64,
    pub y_desc: &'static str,
}

pub const CHARTS: [ChartSpec; 3] = [
    ChartSpec {
        title: "QPS (higher is better)",
        column: column::THROUGHPUT,
        multiplier: 1.0,
        y_desc: "qps",
    },
    // latencies are recorded in milliseconds
    ChartSpec {
        title: "TP99 (lower is better)",
        column: column::P99,
        multiplier: 1000.0,
        y_desc: "latency(us)",
    },
    ChartSpec {
        title: "TP999 (lower is better)",
        column: column::P999,
        multiplier: 1000.0,
        y_desc: "latency(us)",
    },
];

impl ChartSpec {
    /// `{kind}_{first word of the title, lowercased}.png`
    pub fn filename(&self, kind: &str) -> String {
        let word = self.title.split(' ').next().unwrap_or(self.title);
        format!("{}_{}.png", kind, word.to_lowercase())
    }
}

/// Parse a `#RRGGBB` colour.
pub fn parse_colour(value: &str) -> Option<RGBColor> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some(RGBColor(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

/// Resolves the colour of each series.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    overrides: BTreeMap<String, RGBColor>,
}

impl Palette {
    pub fn new(overrides: &BTreeMap<String, String>) -> Result<Self> {
        let mut resolved = BTreeMap::new();
        for (label, value) in overrides {
            let colour = parse_colour(value).ok_or_else(|| Error::Colour {
                label: label.clone(),
                value: value.clone(),
            })?;
            resolved.insert(label.clone(), colour);
        }
        Ok(Self {
            overrides: resolved,
        })
    }

    /// Colours for `labels` in order. Only labels without an override
    /// consume palette entries.
    pub fn assign<'a, I>(&self, labels: I) -> Vec<RGBColor>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut next = 0;
        labels
            .into_iter()
            .map(|label| match self.overrides.get(label) {
                Some(colour) => *colour,
                None => {
                    let colour = PALETTE[next % PALETTE.len()];
                    next += 1;
                    colour
                }
            })
            .collect()
    }
}

/// Everything needed to draw one chart.
#[derive(Clone, Debug)]
pub struct Chart {
    spec: ChartSpec,
    axis: Axis,
    ticks: Vec<i64>,
    series: SeriesCollection,
}

impl Chart {
    pub fn new(spec: ChartSpec, axis: Axis, ticks: Vec<i64>, table: &Table) -> Result<Self> {
        let series = SeriesCollection::collect(table, spec.column, spec.multiplier)?;
        Ok(Self {
            spec,
            axis,
            ticks,
            series,
        })
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn series(&self) -> &SeriesCollection {
        &self.series
    }

    /// Y range, from zero up to the tallest point plus headroom.
    pub fn y_range(&self) -> Range<f64> {
        let max = self.series.max().unwrap_or(0);
        let max = if max > 0 { max as f64 } else { 1.0 };
        0.0..max * HEADROOM
    }

    /// X range over tick positions.
    pub fn x_range(&self) -> Range<i32> {
        let points = self
            .series
            .iter()
            .map(|s| s.values().len())
            .chain(std::iter::once(self.ticks.len()))
            .max()
            .unwrap_or(0);
        0..(points as i32 - 1).max(1)
    }

    /// Literal tick value shown at position `x`.
    pub fn tick_label(&self, x: i32) -> String {
        if x < 0 {
            return String::new();
        }
        self.ticks
            .get(x as usize)
            .map(|tick| tick.to_string())
            .unwrap_or_default()
    }

    /// Render to a PNG at `path`, replacing any existing file.
    pub fn render(&self, path: &Path, size: (u32, u32), palette: &Palette) -> Result<()> {
        self.draw(path, size, palette).map_err(|e| Error::Chart {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn draw(
        &self,
        path: &Path,
        size: (u32, u32),
        palette: &Palette,
    ) -> std::result::Result<(), Box<dyn StdError>> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(self.spec.title, ("sans-serif", 24))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(self.x_range(), self.y_range())?;

        let x_formatter = |x: &i32| self.tick_label(*x);
        let y_formatter = |y: &f64| format!("{:.0}", y);
        chart
            .configure_mesh()
            .x_labels(self.ticks.len().max(2))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_desc(self.axis.label())
            .y_desc(self.spec.y_desc)
            .draw()?;

        let colours = palette.assign(self.series.iter().map(|s| s.name()));
        for (series, colour) in self.series.iter().zip(colours) {
            let points = series
                .values()
                .iter()
                .enumerate()
                .map(|(x, y)| (x as i32, *y as f64));
            chart
                .draw_series(LineSeries::new(points, colour.stroke_width(2)))?
                .label(series.name())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &colour));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.filled())
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

/// Where a chart set for one kind ends up.
pub fn output_path(directory: &Path, kind: &str, spec: &ChartSpec) -> PathBuf {
    directory.join(spec.filename(kind))
}

/// Render every chart in `CHARTS` for `table`, returning the files written.
/// All of the data is extracted before the first image is touched.
pub fn render_all(table: &Table, settings: &Plot) -> Result<Vec<PathBuf>> {
    if table.is_empty() {
        return Err(Error::Empty {
            path: table.path().to_path_buf(),
        });
    }

    let palette = Palette::new(settings.colors())?;
    let axis = settings.axis().resolve(table)?;
    let ticks = x_ticks(table, axis)?;
    debug!("x-axis: {} ticks: {:?}", axis.label(), ticks);

    let mut charts = Vec::with_capacity(CHARTS.len());
    for spec in CHARTS.iter() {
        let chart = Chart::new(*spec, axis, ticks.clone(), table)?;
        for series in chart.series() {
            debug!("{}: {} {:?}", spec.title, series.name(), series.values());
        }
        charts.push(chart);
    }

    let directory = Path::new(settings.directory());
    let mut written = Vec::with_capacity(charts.len());
    for chart in &charts {
        let path = output_path(directory, settings.kind(), chart.spec());
        chart.render(&path, settings.size(), &palette)?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_derive::Deserialize;

use crate::differ::Layout;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Diff {
    #[serde(default = "default_cell_size")]
    cell_size: usize,
    #[serde(default = "default_gap")]
    gap: usize,
    #[serde(default)]
    color: ColourMode,
    #[serde(default)]
    strict: bool,
}

impl Default for Diff {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            gap: default_gap(),
            color: ColourMode::default(),
            strict: false,
        }
    }
}

impl Diff {
    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: usize) {
        self.cell_size = cell_size;
    }

    pub fn gap(&self) -> usize {
        self.gap
    }

    pub fn color(&self) -> ColourMode {
        self.color
    }

    pub fn set_color(&mut self, color: ColourMode) {
        self.color = color;
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Table layout for output that is (or isn't) a terminal.
    pub fn layout(&self, terminal: bool) -> Layout {
        Layout {
            cell_size: self.cell_size,
            gap: self.gap,
            highlight: self.color.highlight(terminal),
        }
    }
}

/// When to highlight percentage changes.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColourMode {
    Auto,
    Always,
    Never,
}

impl Default for ColourMode {
    fn default() -> Self {
        ColourMode::Auto
    }
}

impl ColourMode {
    pub fn highlight(self, terminal: bool) -> bool {
        match self {
            ColourMode::Auto => terminal,
            ColourMode::Always => true,
            ColourMode::Never => false,
        }
    }
}

impl std::str::FromStr for ColourMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColourMode::Auto),
            "always" => Ok(ColourMode::Always),
            "never" => Ok(ColourMode::Never),
            other => Err(format!("unknown colour mode: {}", other)),
        }
    }
}

fn default_cell_size() -> usize {
    15
}

fn default_gap() -> usize {
    5
}

// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::BTreeMap;

use serde_derive::Deserialize;

use crate::series::AxisSelection;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plot {
    #[serde(default = "default_kind")]
    kind: String,
    #[serde(default = "default_directory")]
    directory: String,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default)]
    axis: AxisSelection,
    #[serde(default = "default_colors")]
    colors: BTreeMap<String, String>,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
            axis: AxisSelection::default(),
            colors: default_colors(),
        }
    }
}

impl Plot {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: String) {
        self.kind = kind;
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn set_directory(&mut self, directory: String) {
        self.directory = directory;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn axis(&self) -> AxisSelection {
        self.axis
    }

    pub fn set_axis(&mut self, axis: AxisSelection) {
        self.axis = axis;
    }

    /// Fixed colours for known kinds, as `#RRGGBB`.
    pub fn colors(&self) -> &BTreeMap<String, String> {
        &self.colors
    }
}

fn default_kind() -> String {
    "thrift".to_string()
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    500
}

fn default_colors() -> BTreeMap<String, String> {
    let mut colors = BTreeMap::new();
    // royal blue
    colors.insert("[thrift]".to_string(), "#4169E1".to_string());
    colors
}

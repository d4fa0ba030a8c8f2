//! Rendering: display lists for template faces and their rasterization

pub mod layout;
pub mod paint;
pub mod raster;

pub use paint::{FontWeight, PaintCommand};
pub use raster::{Bitmap, FontSet, Rasterizer};

use crate::{Error, Result};
use std::collections::BTreeMap;

/// Dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// A textual snapshot of one rendered face
///
/// Holds the displayed text runs in paint order, which makes the values a
/// face shows observable without rasterizing it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSnapshot {
    /// Region the snapshot was taken from
    pub region: String,
    /// One entry per painted text run
    pub lines: Vec<String>,
}

impl TextSnapshot {
    /// Text runs joined by newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Text runs joined by single spaces, which restores wrapped paragraphs
    pub fn flat(&self) -> String {
        self.lines.join(" ")
    }

    /// Whether some text run equals `line` exactly
    pub fn has_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }
}

/// One renderable face of a document
#[derive(Debug, Clone)]
pub struct Face {
    pub id: String,
    pub size: Size,
    /// Device pixels per CSS pixel used when capturing this face
    pub pixel_ratio: f32,
    pub commands: Vec<PaintCommand>,
}

impl Face {
    pub fn new(id: impl Into<String>, size: Size, pixel_ratio: f32) -> Self {
        Self {
            id: id.into(),
            size,
            pixel_ratio,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: PaintCommand) {
        self.commands.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = PaintCommand>) {
        self.commands.extend(cmds);
    }

    pub fn text_snapshot(&self) -> TextSnapshot {
        TextSnapshot {
            region: self.id.clone(),
            lines: self
                .commands
                .iter()
                .filter_map(|c| c.text())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// The faces currently on display, addressable by region id
#[derive(Debug, Clone, Default)]
pub struct Display {
    regions: BTreeMap<String, Face>,
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a face
    pub fn insert(&mut self, face: Face) {
        self.regions.insert(face.id.clone(), face);
    }

    pub fn get(&self, region_id: &str) -> Option<&Face> {
        self.regions.get(region_id)
    }

    pub fn remove(&mut self, region_id: &str) -> Option<Face> {
        self.regions.remove(region_id)
    }

    pub fn region_ids(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    pub fn text_snapshot(&self, region_id: &str) -> Result<TextSnapshot> {
        self.get(region_id)
            .map(Face::text_snapshot)
            .ok_or_else(|| Error::MissingRenderTarget(region_id.to_string()))
    }
}

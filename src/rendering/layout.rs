/// Layout primitives for template faces
///
/// Text is measured with an estimated per-glyph advance rather than real font
/// metrics, so layouts are identical whether or not fonts are installed.

use super::paint::{FontWeight, PaintCommand};
use crate::palette::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Shrink by `by` pixels on every side
    pub fn inset(&self, by: u32) -> Rect {
        Rect {
            x: self.x + by as i32,
            y: self.y + by as i32,
            width: self.width.saturating_sub(by * 2),
            height: self.height.saturating_sub(by * 2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub rgba: Rgba,
}

impl TextStyle {
    pub const fn regular(size: f32, rgba: Rgba) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            rgba,
        }
    }

    pub const fn bold(size: f32, rgba: Rgba) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
            rgba,
        }
    }

    pub fn line_height(&self) -> u32 {
        (self.size * 1.5).round() as u32
    }

    /// Estimated advance of one glyph
    pub fn advance(&self) -> f32 {
        match self.weight {
            FontWeight::Regular => self.size * 0.55,
            FontWeight::Bold => self.size * 0.6,
        }
    }
}

pub fn text_width(text: &str, style: &TextStyle) -> u32 {
    (text.chars().count() as f32 * style.advance()).ceil() as u32
}

/// Greedy word wrap. Words longer than a line are kept whole.
pub fn wrap_text(text: &str, max_width: u32, style: &TextStyle) -> Vec<String> {
    let chars_per_line = ((max_width as f32 / style.advance()).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let cur_len = cur.chars().count();
        if cur_len > 0 && cur_len + word.chars().count() + 1 > chars_per_line {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

fn text_cmd(x: i32, y: i32, text: String, style: &TextStyle) -> PaintCommand {
    PaintCommand::Text {
        x,
        y,
        text,
        size: style.size,
        weight: style.weight,
        rgba: style.rgba,
    }
}

/// Vertical flow of blocks inside a fixed-width column
#[derive(Debug, Clone)]
pub struct Column {
    x: i32,
    y: i32,
    width: u32,
}

impl Column {
    pub fn new(x: i32, y: i32, width: u32) -> Self {
        Self { x, y, width }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn gap(&mut self, dy: u32) {
        self.y += dy as i32;
    }

    pub fn paragraph(&mut self, text: &str, style: &TextStyle) -> Vec<PaintCommand> {
        self.paragraph_indented(text, style, 0)
    }

    pub fn paragraph_indented(
        &mut self,
        text: &str,
        style: &TextStyle,
        indent: u32,
    ) -> Vec<PaintCommand> {
        let x = self.x + indent as i32;
        let lines = wrap_text(text, self.width.saturating_sub(indent), style);
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            out.push(text_cmd(x, self.y, line, style));
            self.y += style.line_height() as i32;
        }
        out
    }

    /// Wrapped text with every line centered in the column
    pub fn centered(&mut self, text: &str, style: &TextStyle) -> Vec<PaintCommand> {
        let lines = wrap_text(text, self.width, style);
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let w = text_width(&line, style).min(self.width);
            let x = self.x + ((self.width - w) / 2) as i32;
            out.push(text_cmd(x, self.y, line, style));
            self.y += style.line_height() as i32;
        }
        out
    }

    /// Label on the left and the value right-aligned on the same line
    pub fn spread_row(
        &mut self,
        label: &str,
        value: &str,
        label_style: &TextStyle,
        value_style: &TextStyle,
    ) -> Vec<PaintCommand> {
        let mut out = vec![text_cmd(self.x, self.y, label.to_string(), label_style)];
        let label_w = text_width(label, label_style) + 8;
        let value_lines = wrap_text(value, self.width.saturating_sub(label_w), value_style);
        let mut y = self.y;
        for line in &value_lines {
            let w = text_width(line, value_style).min(self.width);
            let x = self.x + (self.width - w) as i32;
            out.push(text_cmd(x, y, line.clone(), value_style));
            y += value_style.line_height() as i32;
        }
        let rows = value_lines.len().max(1) as u32;
        self.y += (rows * value_style.line_height()).max(label_style.line_height()) as i32;
        out
    }

    /// `Label : value` with the colon at a fixed offset and the value wrapping
    /// in the remaining width
    pub fn colon_row(
        &mut self,
        label: &str,
        value: &str,
        label_width: u32,
        label_style: &TextStyle,
        value_style: &TextStyle,
    ) -> Vec<PaintCommand> {
        let colon_x = self.x + label_width as i32;
        let value_x = colon_x + 10;
        let mut out = vec![
            text_cmd(self.x, self.y, label.to_string(), label_style),
            text_cmd(colon_x, self.y, ":".to_string(), label_style),
        ];
        let value_width = self.width.saturating_sub(label_width + 10);
        let value_lines = wrap_text(value, value_width, value_style);
        let mut y = self.y;
        for line in &value_lines {
            out.push(text_cmd(value_x, y, line.clone(), value_style));
            y += value_style.line_height() as i32;
        }
        let rows = value_lines.len().max(1) as u32;
        self.y += (rows * value_style.line_height()).max(label_style.line_height()) as i32;
        out
    }

    /// Label immediately followed by its value, continuation lines aligned
    /// under the value
    pub fn inline_pair(
        &mut self,
        label: &str,
        value: &str,
        label_style: &TextStyle,
        value_style: &TextStyle,
        indent: u32,
    ) -> Vec<PaintCommand> {
        let label_x = self.x + indent as i32;
        let label_w = text_width(label, label_style) + value_style.advance().ceil() as u32;
        let value_x = label_x + label_w as i32;
        let mut out = vec![text_cmd(label_x, self.y, label.to_string(), label_style)];
        let value_width = self.width.saturating_sub(indent + label_w);
        let value_lines = wrap_text(value, value_width, value_style);
        let mut y = self.y;
        for line in &value_lines {
            out.push(text_cmd(value_x, y, line.clone(), value_style));
            y += value_style.line_height() as i32;
        }
        let rows = value_lines.len().max(1) as u32;
        self.y += (rows * value_style.line_height()).max(label_style.line_height()) as i32;
        out
    }
}

//! Templates: render a record into the faces of its document
//!
//! Rendering is a pure function of the record and the render context. Empty
//! fields show a fixed placeholder instead of failing.

pub mod staff;
pub mod student;
pub mod welcome;

use crate::records::Record;
use crate::rendering::{Display, PaintCommand, Size};
use crate::{palette, GeneratorConfig};

/// Card faces keep the 53.98 x 85.6 ID-1 aspect ratio
pub const CARD_SIZE: Size = Size {
    width: 256,
    height: 406,
};

pub const LETTER_WIDTH: u32 = 448;
pub const LETTER_MIN_HEIGHT: u32 = 664;

/// Values shared by every template that do not come from the record
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub institution: String,
    pub website: String,
    /// Shown as `Date:` on the welcome letter
    pub letter_date: String,
    pub card_pixel_ratio: f32,
    pub letter_pixel_ratio: f32,
}

impl RenderContext {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            institution: config.institution.clone(),
            website: config.website.clone(),
            letter_date: config
                .letter_date
                .clone()
                .unwrap_or_else(|| chrono::Local::now().format("%d/%m/%Y").to_string()),
            card_pixel_ratio: config.card_pixel_ratio,
            letter_pixel_ratio: config.letter_pixel_ratio,
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

/// A record that knows how to draw its document.
pub trait Template: Record {
    /// Region ids in the order they are placed on the page
    const REGIONS: &'static [&'static str];

    fn render(&self, ctx: &RenderContext) -> Display;
}

/// `value`, or `placeholder` when the value is empty
pub(crate) fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// One-pixel border drawn over the finished face
pub(crate) fn card_border(size: Size) -> PaintCommand {
    PaintCommand::StrokeRect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
        thickness: 1,
        rgba: palette::GRAY_200,
    }
}

/// Header band filled with a left-to-right gradient
pub(crate) fn header_band(height: u32, gradient: (palette::Rgba, palette::Rgba)) -> PaintCommand {
    PaintCommand::Gradient {
        x: 0,
        y: 0,
        width: CARD_SIZE.width,
        height,
        from: gradient.0,
        to: gradient.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_only_for_empty_values() {
        assert_eq!(or_placeholder("", "Name Here"), "Name Here");
        assert_eq!(or_placeholder(" ", "Name Here"), " ");
        assert_eq!(or_placeholder("Asha", "Name Here"), "Asha");
    }

    #[test]
    fn configured_date_overrides_today() {
        let cfg = GeneratorConfig {
            letter_date: Some("01/07/2025".into()),
            ..Default::default()
        };
        assert_eq!(RenderContext::from_config(&cfg).letter_date, "01/07/2025");
    }
}

/// Paint command set for template faces
///
/// Coordinates and sizes are in CSS pixels relative to the face origin; the
/// rasterizer multiplies them by the face's pixel ratio.

use crate::palette::Rgba;
use crate::records::PhotoAsset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: Rgba,
    },
    /// Left-to-right linear gradient
    Gradient {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        from: Rgba,
        to: Rgba,
    },
    StrokeRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        thickness: u32,
        rgba: Rgba,
    },
    Triangle {
        points: [(i32, i32); 3],
        rgba: Rgba,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: u32,
        rgba: Rgba,
    },
    /// One line of text; `y` is the top of the line box
    Text {
        x: i32,
        y: i32,
        text: String,
        size: f32,
        weight: FontWeight,
        rgba: Rgba,
    },
    /// Photo cover-fitted into the box, or a placeholder silhouette
    Photo {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        photo: Option<PhotoAsset>,
    },
}

impl PaintCommand {
    /// Text carried by the command, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            PaintCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_text_commands_carry_text() {
        let rect = PaintCommand::SolidRect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            rgba: (255, 0, 0, 255),
        };
        assert_eq!(rect.text(), None);

        let text = PaintCommand::Text {
            x: 4,
            y: 4,
            text: "Emp ID".into(),
            size: 12.0,
            weight: FontWeight::Bold,
            rgba: (0, 0, 0, 255),
        };
        assert_eq!(text.text(), Some("Emp ID"));
    }
}

/// Rasterizer: paints a face's display list into an RGBA bitmap

use super::paint::{FontWeight, PaintCommand};
use super::{Display, Face};
use crate::palette::{self, Rgba as Color};
use crate::{Error, GeneratorConfig, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_polygon_mut,
    draw_text_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect as PixelRect;
use log::{debug, warn};
use rusttype::{Font, Scale};
use std::io::Cursor;
use std::path::{Path, PathBuf};

const REGULAR_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BOLD_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// A captured face
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
}

impl Bitmap {
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(self.pixels.clone())
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)?;
        Ok(buf)
    }

    /// Packed RGB samples with alpha flattened onto white
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.width * self.height * 3) as usize);
        for px in self.pixels.pixels() {
            let [r, g, b, a] = px.0;
            let a = a as u16;
            for c in [r, g, b] {
                out.push(((c as u16 * a + 255 * (255 - a)) / 255) as u8);
            }
        }
        out
    }
}

/// Regular and bold faces used for text runs
pub struct FontSet {
    regular: Option<Font<'static>>,
    bold: Option<Font<'static>>,
}

impl FontSet {
    /// No fonts: text runs are skipped, everything else still paints
    pub fn empty() -> Self {
        Self {
            regular: None,
            bold: None,
        }
    }

    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<Self> {
        let regular = Font::try_from_vec(regular)
            .ok_or_else(|| Error::ConfigError("regular font data is not a usable font".into()))?;
        let bold = match bold {
            Some(data) => Some(
                Font::try_from_vec(data)
                    .ok_or_else(|| Error::ConfigError("bold font data is not a usable font".into()))?,
            ),
            None => None,
        };
        Ok(Self {
            regular: Some(regular),
            bold,
        })
    }

    /// Configured font paths first, then well-known system locations
    pub fn load(config: &GeneratorConfig) -> Self {
        Self {
            regular: load_font(config.font_path.as_deref(), REGULAR_FONT_CANDIDATES),
            bold: load_font(config.bold_font_path.as_deref(), BOLD_FONT_CANDIDATES),
        }
    }

    pub fn has_text(&self) -> bool {
        self.regular.is_some() || self.bold.is_some()
    }

    fn get(&self, weight: FontWeight) -> Option<&Font<'static>> {
        match weight {
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
            FontWeight::Regular => self.regular.as_ref().or(self.bold.as_ref()),
        }
    }
}

fn load_font(explicit: Option<&Path>, candidates: &[&str]) -> Option<Font<'static>> {
    if let Some(path) = explicit {
        match std::fs::read(path).ok().and_then(Font::try_from_vec) {
            Some(font) => return Some(font),
            None => warn!("Configured font {} could not be loaded", path.display()),
        }
    }
    for candidate in candidates.iter().map(PathBuf::from) {
        if let Some(font) = std::fs::read(&candidate).ok().and_then(Font::try_from_vec) {
            debug!("Using font {}", candidate.display());
            return Some(font);
        }
    }
    None
}

fn px(c: Color) -> Rgba<u8> {
    Rgba([c.0, c.1, c.2, c.3])
}

fn scaled(v: i32, ratio: f32) -> i32 {
    (v as f32 * ratio).round() as i32
}

fn scaled_len(v: u32, ratio: f32) -> u32 {
    (v as f32 * ratio).round() as u32
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2), mix(a.3, b.3))
}

fn fill_rect(canvas: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, color: Color) {
    if w == 0 || h == 0 {
        return;
    }
    draw_filled_rect_mut(canvas, PixelRect::at(x, y).of_size(w, h), px(color));
}

fn fill_polygon(canvas: &mut RgbaImage, points: &[(i32, i32)], color: Color) {
    let poly: Vec<Point<i32>> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    // the polygon must be open and non-degenerate
    if poly.len() < 3 || poly.first() == poly.last() {
        return;
    }
    draw_polygon_mut(canvas, &poly, px(color));
}

/// Paints faces at their pixel ratio on a white background
pub struct Rasterizer {
    fonts: FontSet,
}

impl Rasterizer {
    pub fn new(fonts: FontSet) -> Self {
        Self { fonts }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        let fonts = FontSet::load(config);
        if !fonts.has_text() {
            warn!("No usable font found; text will be left out of captured faces");
        }
        Self::new(fonts)
    }

    /// Capture a region of the display. Fails when the region is not on
    /// display.
    pub fn capture(&self, display: &Display, region_id: &str) -> Result<Bitmap> {
        let face = display
            .get(region_id)
            .ok_or_else(|| Error::MissingRenderTarget(region_id.to_string()))?;
        self.rasterize(face)
    }

    pub fn rasterize(&self, face: &Face) -> Result<Bitmap> {
        let ratio = face.pixel_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(Error::RenderError(format!(
                "invalid pixel ratio {} for {}",
                ratio, face.id
            )));
        }
        let width = scaled_len(face.size.width, ratio);
        let height = scaled_len(face.size.height, ratio);
        if width == 0 || height == 0 {
            return Err(Error::RenderError(format!("{} has an empty area", face.id)));
        }

        let mut canvas = RgbaImage::from_pixel(width, height, px(palette::WHITE));
        for cmd in &face.commands {
            self.paint(&mut canvas, cmd, ratio);
        }
        debug!(
            "Captured {} at {}x{} ({} commands)",
            face.id,
            width,
            height,
            face.commands.len()
        );
        Ok(Bitmap {
            width,
            height,
            pixels: canvas,
        })
    }

    fn paint(&self, canvas: &mut RgbaImage, cmd: &PaintCommand, ratio: f32) {
        match cmd {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                rgba,
            } => fill_rect(
                canvas,
                scaled(*x, ratio),
                scaled(*y, ratio),
                scaled_len(*width, ratio),
                scaled_len(*height, ratio),
                *rgba,
            ),
            PaintCommand::Gradient {
                x,
                y,
                width,
                height,
                from,
                to,
            } => {
                let (x, y) = (scaled(*x, ratio), scaled(*y, ratio));
                let (w, h) = (scaled_len(*width, ratio), scaled_len(*height, ratio));
                for col in 0..w {
                    let t = if w > 1 { col as f32 / (w - 1) as f32 } else { 0.0 };
                    fill_rect(canvas, x + col as i32, y, 1, h, lerp(*from, *to, t));
                }
            }
            PaintCommand::StrokeRect {
                x,
                y,
                width,
                height,
                thickness,
                rgba,
            } => {
                let (x, y) = (scaled(*x, ratio), scaled(*y, ratio));
                let (w, h) = (scaled_len(*width, ratio), scaled_len(*height, ratio));
                let t = scaled_len(*thickness, ratio).max(1);
                for i in 0..t {
                    let (iw, ih) = (w.saturating_sub(2 * i), h.saturating_sub(2 * i));
                    if iw == 0 || ih == 0 {
                        break;
                    }
                    draw_hollow_rect_mut(
                        canvas,
                        PixelRect::at(x + i as i32, y + i as i32).of_size(iw, ih),
                        px(*rgba),
                    );
                }
            }
            PaintCommand::Triangle { points, rgba } => {
                let pts: Vec<(i32, i32)> = points
                    .iter()
                    .map(|&(x, y)| (scaled(x, ratio), scaled(y, ratio)))
                    .collect();
                fill_polygon(canvas, &pts, *rgba);
            }
            PaintCommand::Circle {
                cx,
                cy,
                radius,
                rgba,
            } => draw_filled_circle_mut(
                canvas,
                (scaled(*cx, ratio), scaled(*cy, ratio)),
                scaled_len(*radius, ratio) as i32,
                px(*rgba),
            ),
            PaintCommand::Text {
                x,
                y,
                text,
                size,
                weight,
                rgba,
            } => {
                if let Some(font) = self.fonts.get(*weight) {
                    draw_text_mut(
                        canvas,
                        px(*rgba),
                        scaled(*x, ratio),
                        scaled(*y, ratio),
                        Scale::uniform(size * ratio),
                        font,
                        text,
                    );
                }
            }
            PaintCommand::Photo {
                x,
                y,
                width,
                height,
                photo,
            } => {
                let (x, y) = (scaled(*x, ratio), scaled(*y, ratio));
                let (w, h) = (scaled_len(*width, ratio), scaled_len(*height, ratio));
                match photo.as_ref().map(|p| p.decode()) {
                    Some(Ok(img)) if w > 0 && h > 0 => {
                        let fitted = img.resize_to_fill(w, h, FilterType::Triangle).to_rgba8();
                        imageops::overlay(canvas, &fitted, x as i64, y as i64);
                    }
                    Some(Err(e)) => {
                        warn!("Photo could not be painted, using placeholder: {}", e);
                        paint_silhouette(canvas, x, y, w, h);
                    }
                    _ => paint_silhouette(canvas, x, y, w, h),
                }
            }
        }
    }
}

/// Generic user silhouette shown in an empty photo box
fn paint_silhouette(canvas: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32) {
    fill_rect(canvas, x, y, w, h, palette::GRAY_100);
    let (wf, hf) = (w as f32, h as f32);
    let cx = x + (wf / 2.0).round() as i32;
    let head_y = y + (hf * 0.4).round() as i32;
    draw_filled_circle_mut(
        canvas,
        (cx, head_y),
        (wf / 8.0).round() as i32,
        px(palette::GRAY_400),
    );
    let shoulders = y + (hf * 0.56).round() as i32;
    let base = y + (hf * 0.7).round() as i32;
    let (narrow, wide) = ((wf / 8.0).round() as i32, (wf / 4.0).round() as i32);
    fill_polygon(
        canvas,
        &[
            (cx - narrow, shoulders),
            (cx + narrow, shoulders),
            (cx + wide, base),
            (cx - wide, base),
        ],
        palette::GRAY_400,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::{Face, Size};

    fn swatch(ratio: f32) -> Face {
        let mut face = Face::new("swatch", Size { width: 20, height: 10 }, ratio);
        face.push(PaintCommand::SolidRect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            rgba: (255, 0, 0, 255),
        });
        face
    }

    #[test]
    fn capture_scales_by_pixel_ratio() {
        let r = Rasterizer::new(FontSet::empty());
        let bmp = r.rasterize(&swatch(3.0)).unwrap();
        assert_eq!((bmp.width, bmp.height), (60, 30));
        assert_eq!(bmp.pixels.get_pixel(5, 5).0, [255, 0, 0, 255]);
        // right half stays on the white background
        assert_eq!(bmp.pixels.get_pixel(45, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn capture_of_absent_region_fails() {
        let r = Rasterizer::new(FontSet::empty());
        let mut display = Display::new();
        display.insert(swatch(1.0));
        assert!(r.capture(&display, "swatch").is_ok());
        assert!(matches!(
            r.capture(&display, "student-id-card-back"),
            Err(Error::MissingRenderTarget(_))
        ));
    }

    #[test]
    fn rejects_non_positive_ratio() {
        let r = Rasterizer::new(FontSet::empty());
        assert!(r.rasterize(&swatch(0.0)).is_err());
    }

    #[test]
    fn png_and_rgb_encodings() {
        let r = Rasterizer::new(FontSet::empty());
        let bmp = r.rasterize(&swatch(1.0)).unwrap();
        let png = bmp.to_png().unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
        let rgb = bmp.to_rgb_bytes();
        assert_eq!(rgb.len(), 20 * 10 * 3);
        assert_eq!(&rgb[0..3], &[255, 0, 0]);
    }

    #[test]
    fn empty_photo_box_gets_placeholder() {
        let r = Rasterizer::new(FontSet::empty());
        let mut face = Face::new("photo", Size { width: 96, height: 112 }, 1.0);
        face.push(PaintCommand::Photo {
            x: 0,
            y: 0,
            width: 96,
            height: 112,
            photo: None,
        });
        let bmp = r.rasterize(&face).unwrap();
        let p = palette::GRAY_100;
        assert_eq!(bmp.pixels.get_pixel(2, 2).0, [p.0, p.1, p.2, p.3]);
    }
}

//! Page composition: place captured faces on an A4 page and encode a PDF
//!
//! All geometry is in millimetres with the origin at the top-left corner of
//! the page. Conversion to PDF user space (points, bottom-left origin) only
//! happens while writing the content stream.

use crate::rendering::Bitmap;
use crate::{Error, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Write;

/// ISO/IEC 7810 ID-1 card
pub const CARD_WIDTH_MM: f32 = 53.98;
pub const CARD_HEIGHT_MM: f32 = 85.6;
pub const CARD_GAP_MM: f32 = 10.0;
pub const LETTER_MARGIN_MM: f32 = 10.0;

const A4_SHORT_MM: f32 = 210.0;
const A4_LONG_MM: f32 = 297.0;
const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Page dimensions in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
}

impl PageSpec {
    pub const A4_PORTRAIT: PageSpec = PageSpec {
        width: A4_SHORT_MM,
        height: A4_LONG_MM,
    };
    pub const A4_LANDSCAPE: PageSpec = PageSpec {
        width: A4_LONG_MM,
        height: A4_SHORT_MM,
    };

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Where one image lands on the page, in millimetres from the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// How captured faces are arranged on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageLayout {
    /// Two fixed-size cards side by side, the pair centred on the page
    TwoUp {
        page: PageSpec,
        card_width: f32,
        card_height: f32,
        gap: f32,
    },
    /// One image scaled to fit inside the margins, centred on both axes
    FitSingle { page: PageSpec, margin: f32 },
}

impl PageLayout {
    /// Front and back of an ID card on A4 landscape
    pub const fn id_cards() -> Self {
        PageLayout::TwoUp {
            page: PageSpec::A4_LANDSCAPE,
            card_width: CARD_WIDTH_MM,
            card_height: CARD_HEIGHT_MM,
            gap: CARD_GAP_MM,
        }
    }

    /// A letter on A4 portrait
    pub const fn letter() -> Self {
        PageLayout::FitSingle {
            page: PageSpec::A4_PORTRAIT,
            margin: LETTER_MARGIN_MM,
        }
    }

    pub fn page(&self) -> PageSpec {
        match *self {
            PageLayout::TwoUp { page, .. } | PageLayout::FitSingle { page, .. } => page,
        }
    }

    /// Number of images the layout consumes
    pub fn slots(&self) -> usize {
        match self {
            PageLayout::TwoUp { .. } => 2,
            PageLayout::FitSingle { .. } => 1,
        }
    }

    /// Placements for `bitmaps`, in the order given
    pub fn place(&self, bitmaps: &[Bitmap]) -> Result<Vec<Placement>> {
        if bitmaps.len() != self.slots() {
            return Err(Error::ComposeError(format!(
                "layout takes {} image(s), got {}",
                self.slots(),
                bitmaps.len()
            )));
        }
        match *self {
            PageLayout::TwoUp {
                page,
                card_width,
                card_height,
                gap,
            } => Ok(two_up_placements(page, card_width, card_height, gap).to_vec()),
            PageLayout::FitSingle { page, margin } => {
                let bmp = &bitmaps[0];
                Ok(vec![fit_placement(page, margin, bmp.width, bmp.height)?])
            }
        }
    }
}

/// Left and right card slots. The pair and its gap are centred horizontally,
/// each card centred vertically.
pub fn two_up_placements(page: PageSpec, card_width: f32, card_height: f32, gap: f32) -> [Placement; 2] {
    let x0 = (page.width - (card_width * 2.0 + gap)) / 2.0;
    let y = (page.height - card_height) / 2.0;
    [
        Placement {
            x: x0,
            y,
            width: card_width,
            height: card_height,
        },
        Placement {
            x: x0 + card_width + gap,
            y,
            width: card_width,
            height: card_height,
        },
    ]
}

/// Scale an image of `px_width` x `px_height` to fit inside the page minus
/// `margin` on every side, keeping its aspect ratio, and centre it
pub fn fit_placement(page: PageSpec, margin: f32, px_width: u32, px_height: u32) -> Result<Placement> {
    if px_width == 0 || px_height == 0 {
        return Err(Error::ComposeError("cannot place an empty image".into()));
    }
    let avail_w = page.width - margin * 2.0;
    let avail_h = page.height - margin * 2.0;
    let scale = (avail_w / px_width as f32).min(avail_h / px_height as f32);
    let width = px_width as f32 * scale;
    let height = px_height as f32 * scale;
    Ok(Placement {
        x: (page.width - width) / 2.0,
        y: (page.height - height) / 2.0,
        width,
        height,
    })
}

/// An encoded single-page PDF
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub bytes: Vec<u8>,
    pub page: PageSpec,
    pub placements: Vec<Placement>,
}

impl ComposedDocument {
    /// Hex SHA-256 of the encoded bytes
    pub fn sha256(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

fn mm(v: f32) -> Object {
    (v * PT_PER_MM).into()
}

fn image_xobject(bmp: &Bitmap) -> Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&bmp.to_rgb_bytes())?;
    let compressed = encoder.finish()?;
    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => bmp.width as i64,
            "Height" => bmp.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        compressed,
    ))
}

/// Encode `bitmaps` onto one page arranged by `layout`.
///
/// The output carries no timestamps or random ids, so identical input gives
/// byte-identical output.
pub fn compose(bitmaps: &[Bitmap], layout: &PageLayout) -> Result<ComposedDocument> {
    let placements = layout.place(bitmaps)?;
    let page = layout.page();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut xobjects = lopdf::Dictionary::new();
    let mut operations = Vec::new();
    for (i, (bmp, p)) in bitmaps.iter().zip(&placements).enumerate() {
        let name = format!("Im{}", i + 1);
        let image_id = doc.add_object(image_xobject(bmp)?);
        xobjects.set(name.as_bytes().to_vec(), Object::Reference(image_id));

        // PDF space grows upwards from the bottom edge
        let bottom = page.height - p.y - p.height;
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![mm(p.width), 0.into(), 0.into(), mm(p.height), mm(p.x), mm(bottom)],
        ));
        operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        operations.push(Operation::new("Q", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), mm(page.width), mm(page.height)],
        "Contents" => content_id,
        "Resources" => dictionary! { "XObject" => xobjects },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(ComposedDocument {
        bytes,
        page,
        placements,
    })
}

//! idforge
//!
//! Generates printable documents from filled-in forms: staff ID cards,
//! student ID cards and onboarding welcome letters.
//!
//! A record is edited through a [`records::FormState`], rendered by its
//! [`templates::Template`] into faces, rasterized by the
//! [`rendering::Rasterizer`] and placed on an A4 page by the
//! [`compose`] module. [`Studio`] drives the whole pipeline from async code.
//!
//! # Example
//!
//! ```no_run
//! use idforge::records::{StudentField, StudentRecord};
//! use idforge::{GeneratorConfig, Studio};
//!
//! # #[tokio::main]
//! # async fn main() -> idforge::Result<()> {
//! let studio = Studio::<StudentRecord>::new(GeneratorConfig::default()).await?;
//! studio.set(StudentField::Name, "Asha Rao").await?;
//! studio.set(StudentField::School, "DPS").await?;
//! let report = studio.export(std::path::Path::new("out")).await?;
//! assert_eq!(report.file_name, "Asha Rao_ID_Card.pdf");
//! studio.close().await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod error;
pub use error::{Error, Result};

pub mod compose;
pub mod export;
pub mod palette;
pub mod records;
pub mod rendering;
pub mod templates;

pub use compose::{ComposedDocument, PageLayout, Placement};
pub use export::{export_batch, BatchFile, ExportReport, Studio};
pub use records::{FormState, PhotoAsset, Record};
pub use rendering::TextSnapshot;
pub use templates::{RenderContext, Template};

/// Configuration for document generation
///
/// Defaults reproduce the stock documents. Every field may be given in a
/// TOML file; missing keys keep their default.
///
/// # Examples
///
/// ```
/// let cfg = idforge::GeneratorConfig::default();
/// assert_eq!(cfg.card_pixel_ratio, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Device pixels per CSS pixel when capturing card faces
    pub card_pixel_ratio: f32,
    /// Device pixels per CSS pixel when capturing the letter
    pub letter_pixel_ratio: f32,
    /// TrueType font for regular text; well-known system fonts are tried when unset
    pub font_path: Option<PathBuf>,
    /// TrueType font for bold text; falls back to the regular font
    pub bold_font_path: Option<PathBuf>,
    /// Directory exported documents are written to
    pub output_dir: PathBuf,
    /// Institution named on staff cards and letters
    pub institution: String,
    pub website: String,
    /// Fixed `dd/mm/yyyy` date for letters (today when unset)
    pub letter_date: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            card_pixel_ratio: 3.0,
            letter_pixel_ratio: 1.2,
            font_path: None,
            bold_font_path: None,
            output_dir: PathBuf::from("."),
            institution: "Geeta University".to_string(),
            website: "www.geetauniversity.edu.in".to_string(),
            letter_date: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).map_err(|e| Error::ConfigError(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&s)
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        for (name, ratio) in [
            ("card_pixel_ratio", self.card_pixel_ratio),
            ("letter_pixel_ratio", self.letter_pixel_ratio),
        ] {
            if !(ratio.is_finite() && ratio > 0.0 && ratio <= 8.0) {
                return Err(Error::ConfigError(format!(
                    "{} must be in (0, 8], got {}",
                    name, ratio
                )));
            }
        }
        Ok(())
    }
}

/// The kinds of document the generator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    StaffIdCard,
    StudentIdCard,
    WelcomeLetter,
}

impl DocumentKind {
    /// File name stem used when the identifying field is empty
    pub fn default_label(&self) -> &'static str {
        match self {
            DocumentKind::StaffIdCard => "Staff",
            DocumentKind::StudentIdCard => "Student",
            DocumentKind::WelcomeLetter => "Employee",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            DocumentKind::StaffIdCard | DocumentKind::StudentIdCard => "ID_Card",
            DocumentKind::WelcomeLetter => "Welcome_Letter",
        }
    }

    /// Human readable name for logs and errors
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::StaffIdCard => "staff ID card",
            DocumentKind::StudentIdCard => "student ID card",
            DocumentKind::WelcomeLetter => "welcome letter",
        }
    }

    /// `<primary>_<suffix>.pdf`, with the default label standing in for an
    /// empty primary value. Path separators are replaced so the name stays a
    /// single path component.
    pub fn file_name(&self, primary: &str) -> String {
        let stem = if primary.is_empty() {
            self.default_label().to_string()
        } else {
            primary.replace(['/', '\\'], "_")
        };
        format!("{}_{}.pdf", stem, self.suffix())
    }

    pub fn layout(&self) -> PageLayout {
        match self {
            DocumentKind::StaffIdCard | DocumentKind::StudentIdCard => PageLayout::id_cards(),
            DocumentKind::WelcomeLetter => PageLayout::letter(),
        }
    }
}

/// In-memory photo payloads attached to records

use crate::{Error, Result};
use base64::Engine as Base64Engine;
use image::{DynamicImage, ImageFormat};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// An encoded image owned by a record. Replaced wholesale on re-upload and
/// never written anywhere except into rendered output.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoAsset {
    mime: &'static str,
    bytes: Arc<[u8]>,
}

impl fmt::Debug for PhotoAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoAsset")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn mime_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        ImageFormat::Tiff => Some("image/tiff"),
        ImageFormat::Ico => Some("image/x-icon"),
        _ => None,
    }
}

impl PhotoAsset {
    /// Wrap encoded image bytes. The format is sniffed from the content; only
    /// image payloads are accepted.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| Error::PhotoError(format!("unrecognised image data: {}", e)))?;
        let mime = mime_for(format)
            .ok_or_else(|| Error::PhotoError(format!("unsupported image format {:?}", format)))?;
        Ok(Self {
            mime,
            bytes: bytes.into(),
        })
    }

    /// Parse a `data:<mime>;base64,<payload>` URI
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::PhotoError("not a data URI".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::PhotoError("data URI has no payload".into()))?;
        let declared = header
            .strip_suffix(";base64")
            .ok_or_else(|| Error::PhotoError("data URI is not base64 encoded".into()))?;
        if !declared.starts_with("image/") {
            return Err(Error::PhotoError(format!("`{}` is not an image type", declared)));
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::PhotoError(format!("bad base64 payload: {}", e)))?;
        Self::from_bytes(bytes)
    }

    /// Read a photo from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            Error::PhotoError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_bytes(bytes)
    }

    /// Encode as a data URI
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode into pixels
    pub fn decode(&self) -> Result<DynamicImage> {
        image::load_from_memory(&self.bytes)
            .map_err(|e| Error::PhotoError(format!("failed to decode {}: {}", self.mime, e)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{GenericImageView, ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    pub(crate) fn tiny_png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 6, Rgba([200, 40, 40, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    pub(crate) fn tiny_png_asset() -> PhotoAsset {
        PhotoAsset::from_bytes(tiny_png_bytes()).unwrap()
    }

    #[test]
    fn data_uri_carries_sniffed_mime() {
        let photo = tiny_png_asset();
        let uri = photo.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(PhotoAsset::from_data_uri(&uri).unwrap(), photo);
    }

    #[test]
    fn rejects_non_image_payloads() {
        assert!(PhotoAsset::from_bytes(b"plain text".to_vec()).is_err());
        assert!(PhotoAsset::from_data_uri("data:text/plain;base64,aGk=").is_err());
        assert!(PhotoAsset::from_data_uri("image/png;base64,aGk=").is_err());
    }

    #[test]
    fn decodes_to_original_dimensions() {
        let img = tiny_png_asset().decode().unwrap();
        assert_eq!((img.width(), img.height()), (4, 6));
    }

    #[tokio::test]
    async fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        std::fs::write(&path, tiny_png_bytes()).unwrap();
        let photo = PhotoAsset::load(&path).await.unwrap();
        assert_eq!(photo.mime(), "image/png");
        assert!(PhotoAsset::load(&dir.path().join("missing.png")).await.is_err());
    }
}

use std::path::Path;

use anyhow::{Context, Result};

/// Decoded window icon pixels (RGBA8, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl IconImage {
    /// Loads and decodes an image file; the format is taken from its contents.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::ImageReader::open(path)
            .with_context(|| format!("failed to open icon {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("failed to read icon {}", path.display()))?
            .decode()
            .with_context(|| format!("failed to decode icon {}", path.display()))?;
        Self::from_dynamic(img)
    }

    /// Decodes an in-memory image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).context("failed to decode icon")?;
        Self::from_dynamic(img)
    }

    fn from_dynamic(img: image::DynamicImage) -> Result<Self> {
        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();
        anyhow::ensure!(width > 0 && height > 0, "icon image is empty");
        Ok(Self {
            rgba: rgba.into_raw(),
            width,
            height,
        })
    }

    pub fn into_window_icon(self) -> Result<winit::window::Icon> {
        winit::window::Icon::from_rgba(self.rgba, self.width, self.height)
            .context("invalid icon pixel data")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([120, 90, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn png_decodes_to_rgba8() {
        let icon = IconImage::from_bytes(&png(3, 2)).unwrap();
        assert_eq!((icon.width, icon.height), (3, 2));
        assert_eq!(icon.rgba.len(), 3 * 2 * 4);
        assert_eq!(&icon.rgba[..4], &[120, 90, 40, 255]);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(IconImage::from_bytes(b"not an image").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = IconImage::load("does/not/exist.png").unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.png"));
    }

    #[test]
    fn converts_to_window_icon() {
        let icon = IconImage::from_bytes(&png(16, 16)).unwrap();
        assert!(icon.into_window_icon().is_ok());
    }

    #[test]
    fn bundled_icon_decodes() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/lbs-icon.png");
        let icon = IconImage::load(path).unwrap();
        assert!(icon.width > 0 && icon.height > 0);
    }
}

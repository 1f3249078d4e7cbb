use std::path::Path;

use anyhow::{Context, Result};
use gc_core::frame::PixelBuffer;

/// Charge une image depuis le disque et la convertit en RGBA8.
///
/// Any format enabled on the `image` crate is accepted (PNG, JPEG, BMP, GIF).
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use gc_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let frame = into_buffer(&img)?;
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Decode an in-memory encoded image.
///
/// # Errors
/// Returns an error if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory(bytes).context("Image illisible")?;
    into_buffer(&img)
}

fn into_buffer(img: &image::DynamicImage) -> Result<PixelBuffer> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_rgba(width, height, rgba.into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]));
        img.put_pixel(2, 1, Rgba([10, 20, 30, 40]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let frame = decode_image(&png_bytes()).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.pixel(2, 1), (10, 20, 30, 40));
        assert_eq!(frame.pixel(0, 0), (255, 255, 255, 255));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        std::fs::write(&path, png_bytes()).unwrap();
        let frame = load_image(&path).unwrap();
        assert_eq!(frame.data.len(), 3 * 2 * 4);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode_image(b"definitely not an image").is_err());
        assert!(load_image(Path::new("/nonexistent/image.png")).is_err());
    }
}

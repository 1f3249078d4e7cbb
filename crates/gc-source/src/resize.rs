use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer as FirResizer};
use gc_core::error::{ConvertError, Result as ConvertResult};
use gc_core::frame::PixelBuffer;
use gc_core::traits::ImageRasterizer;

/// Resizer réutilisable wrappant fast_image_resize.
///
/// # Example
/// ```
/// use gc_source::resize::Resizer;
/// use gc_core::frame::PixelBuffer;
/// use gc_core::traits::ImageRasterizer;
///
/// let mut r = Resizer::new();
/// let src = PixelBuffer::filled(100, 100, [255, 255, 255, 255]);
/// let dst = r.resize_to_buffer(&src, 20, 10).unwrap();
/// assert_eq!((dst.width, dst.height), (20, 10));
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (fast_image_resize wants a mutable slice).
    src_buf: Vec<u8>,
}

impl Resizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new(),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns an error if either buffer is empty or the resize operation fails.
    pub fn resize_into(&mut self, src: &PixelBuffer, dst: &mut PixelBuffer) -> Result<()> {
        if src.width == 0 || src.height == 0 || dst.width == 0 || dst.height == 0 {
            anyhow::bail!(
                "Redimensionnement impossible : {}×{} → {}×{}",
                src.width,
                src.height,
                dst.width,
                dst.height
            );
        }
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .context("Invalid source dimensions")?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageRasterizer for Resizer {
    fn resize_to_buffer(
        &mut self,
        image: &PixelBuffer,
        width: u32,
        height: u32,
    ) -> ConvertResult<PixelBuffer> {
        let mut dst = PixelBuffer::new(width, height);
        self.resize_into(image, &mut dst)
            .map_err(|e| ConvertError::Raster(format!("{e:#}")))?;
        log::trace!(
            "Image {}×{} redimensionnée en {width}×{height}",
            image.width,
            image.height
        );
        Ok(dst)
    }
}

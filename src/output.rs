//! Naming and encoding the finished canvas.

use image::png::PNGEncoder;
use image::{ColorType, RgbImage};

use error::RenderError;
use render::RenderParams;

/// The object key for a render: `{width}x{height}_{iterations}.png`.
pub fn filename(params: &RenderParams) -> String {
    format!(
        "{}x{}_{}.png",
        params.width(),
        params.height(),
        params.iterations()
    )
}

/// Encode the canvas as an 8-bit RGB PNG.
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    let (width, height) = canvas.dimensions();
    PNGEncoder::new(&mut bytes)
        .encode(canvas, width, height, ColorType::RGB(8))
        .map_err(RenderError::Encode)?;
    Ok(bytes)
}

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Luma};
use qrcode::render::unicode;
use qrcode::{EcLevel, QrCode};

use crate::error::KhqrError;

/// Pixels per QR module in the rasterized image.
const MODULE_PIXELS: u32 = 10;

// Error correction level L is the KHQR profile default; it maximizes the
// payload capacity of a given symbol version.
fn encode(payload: &str) -> Result<QrCode, KhqrError> {
    QrCode::with_error_correction_level(payload, EcLevel::L)
        .map_err(|e| KhqrError::RenderError(e.to_string()))
}

/// Render a payload as a PNG image wrapped in a base64 data URI
/// (`data:image/png;base64,<...>`), ready to embed in a JSON response
/// without a separate file fetch.
pub fn render_data_uri(payload: &str) -> Result<String, KhqrError> {
    let code = encode(payload)?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .build();

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::L8,
        )
        .map_err(|e| KhqrError::RenderError(e.to_string()))?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

/// Render a payload as a Unicode string for terminal display.
///
/// Uses Unicode block characters to display the QR code in the terminal.
/// Each "pixel" is represented using block characters for a compact display.
pub fn render_to_terminal(payload: &str) -> Result<String, KhqrError> {
    let code = encode(payload)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Dark)
        .light_color(unicode::Dense1x2::Light)
        .build())
}

//! Last-resort synthetic image backend.
//!
//! Draws a bordered placeholder with the static word "CERTIFICATE" so the
//! image chain still terminates successfully on hosts with no rendering
//! tools installed at all. Probe is always true and conversion cannot fail
//! short of an encoder error.

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};

use super::{BackendFailure, RenderBackend, RenderTarget};
use crate::format::OutputFormat;

const BACKGROUND: Rgb<u8> = Rgb([248, 246, 240]);
const INK: Rgb<u8> = Rgb([52, 58, 64]);
const BORDER_WIDTH: u32 = 6;
const TEXT: &str = "CERTIFICATE";

pub struct PlaceholderBackend;

#[async_trait]
impl RenderBackend for PlaceholderBackend {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn probe(&self) -> bool {
        true
    }

    async fn convert(
        &self,
        _markup: &str,
        target: &RenderTarget,
    ) -> Result<Vec<u8>, BackendFailure> {
        let RenderTarget::Image(options) = target else {
            return Err(BackendFailure::WrongTarget {
                tool: self.name().to_string(),
            });
        };

        let width = options.width.max(64);
        let height = options.height.max(64);
        let canvas = draw_placeholder(width, height);

        let mut encoded = Vec::new();
        match options.format {
            OutputFormat::Png => PngEncoder::new(&mut encoded)
                .write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(BackendFailure::Encode)?,
            _ => JpegEncoder::new_with_quality(&mut encoded, options.quality.clamp(1, 100))
                .write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(BackendFailure::Encode)?,
        }
        Ok(encoded)
    }
}

fn draw_placeholder(width: u32, height: u32) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    for y in 0..height {
        for x in 0..width {
            let in_border = x < BORDER_WIDTH
                || y < BORDER_WIDTH
                || x >= width - BORDER_WIDTH
                || y >= height - BORDER_WIDTH;
            if in_border {
                canvas.put_pixel(x, y, INK);
            }
        }
    }

    draw_centered_text(&mut canvas, TEXT);
    canvas
}

/// 5x7 bitmap glyphs for the letters of the placeholder word, one row per
/// byte with the low five bits used.
fn glyph(ch: char) -> Option<[u8; 7]> {
    match ch {
        'A' => Some([0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'C' => Some([0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
        'E' => Some([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
        'F' => Some([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
        'I' => Some([0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        'R' => Some([0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
        'T' => Some([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
        _ => None,
    }
}

fn draw_centered_text(canvas: &mut RgbImage, text: &str) {
    let (width, height) = canvas.dimensions();
    // 5 columns per glyph plus one of spacing.
    let cell_columns = (text.len() as u32) * 6 - 1;
    let scale = (width / (cell_columns * 2)).clamp(2, 12);
    let text_width = cell_columns * scale;
    let text_height = 7 * scale;
    let origin_x = width.saturating_sub(text_width) / 2;
    let origin_y = height.saturating_sub(text_height) / 2;

    for (index, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else { continue };
        let glyph_x = origin_x + (index as u32) * 6 * scale;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5u32 {
                if bits & (1 << (4 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = glyph_x + col * scale + dx;
                        let y = origin_y + (row as u32) * scale + dy;
                        if x < width && y < height {
                            canvas.put_pixel(x, y, INK);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ImageOptions;

    #[tokio::test]
    async fn placeholder_always_probes_available() {
        assert!(PlaceholderBackend.probe().await);
    }

    #[tokio::test]
    async fn placeholder_produces_a_decodable_png() {
        let target = RenderTarget::Image(ImageOptions {
            format: OutputFormat::Png,
            width: 640,
            height: 480,
            quality: 90,
        });
        let bytes = PlaceholderBackend.convert("<html></html>", &target).await.unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 640);
        assert_eq!(decoded.height(), 480);
    }

    #[tokio::test]
    async fn placeholder_produces_jpeg_for_jpg_requests() {
        let target = RenderTarget::Image(ImageOptions {
            format: OutputFormat::Jpg,
            width: 320,
            height: 240,
            quality: 80,
        });
        let bytes = PlaceholderBackend.convert("", &target).await.unwrap();
        // JPEG SOI marker.
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}

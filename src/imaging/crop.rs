use image::DynamicImage;

use crate::model::{scale_factors, SelectionRect};

/// Result of a region extraction: the crop at display resolution plus its
/// JPEG encoding, ready for preview, saving, or upload
pub struct CropOutput {
    pub image: DynamicImage,
    pub jpeg_bytes: Vec<u8>,
    pub base64_jpeg: String,
    pub size: (u32, u32),
}

/// Crop the display-space selection out of the full-resolution source.
///
/// The selection rectangle lives in display pixels; `client_size` is the size
/// the source is currently rendered at. The matching source-space region is
/// resampled into a raster sized at the display-space rectangle, so the crop
/// comes out at display resolution sampled from the higher-resolution source.
pub fn extract_region(
    source: &DynamicImage,
    rect: &SelectionRect,
    client_size: (f32, f32),
) -> Result<CropOutput, String> {
    use base64::Engine;

    let natural = (source.width(), source.height());
    let (scale_x, scale_y) = scale_factors(natural, client_size)?;
    let scaled = rect.scaled(scale_x, scale_y);

    // Output raster is sized in display pixels, not source pixels
    let out_w = rect.width.round() as u32;
    let out_h = rect.height.round() as u32;
    if out_w == 0 || out_h == 0 {
        return Err("selection rectangle is empty".to_string());
    }

    // Clamp the source region to the image bounds
    let x = (scaled.left.max(0.0).round() as u32).min(natural.0.saturating_sub(1));
    let y = (scaled.top.max(0.0).round() as u32).min(natural.1.saturating_sub(1));
    let w = (scaled.width.round() as u32).clamp(1, natural.0 - x);
    let h = (scaled.height.round() as u32).clamp(1, natural.1 - y);

    let region = source.crop_imm(x, y, w, h);
    let image = if (w, h) == (out_w, out_h) {
        region
    } else {
        region.resize_exact(out_w, out_h, image::imageops::FilterType::Triangle)
    };

    // Encode as JPEG (alpha dropped: JPEG has no alpha channel)
    let mut jpeg_bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut jpeg_bytes);
    DynamicImage::ImageRgb8(image.to_rgb8())
        .write_to(&mut cursor, image::ImageFormat::Jpeg)
        .map_err(|e| format!("Failed to encode JPEG: {}", e))?;

    let base64_jpeg = base64::engine::general_purpose::STANDARD.encode(&jpeg_bytes);

    Ok(CropOutput {
        image,
        jpeg_bytes,
        base64_jpeg,
        size: (out_w, out_h),
    })
}

/// Write the encoded crop to disk.
pub fn save_crop(path: &str, output: &CropOutput) -> Result<(), String> {
    std::fs::write(path, &output.jpeg_bytes).map_err(|e| format!("Failed to write crop: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    // Left half red, right half blue
    fn two_tone_source(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_output_is_display_sized() {
        // 200x100 natural rendered at 100x50 -> scale factors (2, 2)
        let source = two_tone_source(200, 100);
        let rect = SelectionRect {
            left: 10.0,
            top: 10.0,
            width: 40.0,
            height: 20.0,
        };
        let crop = extract_region(&source, &rect, (100.0, 50.0)).unwrap();
        assert_eq!(crop.size, (40, 20));
        assert_eq!(crop.image.width(), 40);
        assert_eq!(crop.image.height(), 20);
        assert!(!crop.jpeg_bytes.is_empty());
        assert!(!crop.base64_jpeg.is_empty());
    }

    #[test]
    fn test_crop_samples_the_scaled_region() {
        let source = two_tone_source(200, 100);
        // Right half of the displayed image -> right (blue) half of the source
        let rect = SelectionRect {
            left: 50.0,
            top: 0.0,
            width: 50.0,
            height: 50.0,
        };
        let crop = extract_region(&source, &rect, (100.0, 50.0)).unwrap();
        let rgb = crop.image.to_rgb8();
        let center = rgb.get_pixel(crop.size.0 / 2, crop.size.1 / 2);
        assert_eq!(center.0, [0, 0, 255]);
    }

    #[test]
    fn test_region_clamped_to_source_bounds() {
        let source = two_tone_source(100, 100);
        // Selection runs past the displayed edge
        let rect = SelectionRect {
            left: 80.0,
            top: 80.0,
            width: 40.0,
            height: 40.0,
        };
        let crop = extract_region(&source, &rect, (100.0, 100.0)).unwrap();
        assert_eq!(crop.size, (40, 40));
    }

    #[test]
    fn test_invalid_render_size_fails_loudly() {
        let source = two_tone_source(100, 100);
        let rect = SelectionRect {
            left: 0.0,
            top: 0.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(extract_region(&source, &rect, (0.0, 0.0)).is_err());
    }

    #[test]
    fn test_empty_selection_fails() {
        let source = two_tone_source(100, 100);
        let rect = SelectionRect {
            left: 10.0,
            top: 10.0,
            width: 0.0,
            height: 0.0,
        };
        assert!(extract_region(&source, &rect, (100.0, 100.0)).is_err());
    }
}

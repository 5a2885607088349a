use bevy_egui::egui;
use image::DynamicImage;
use std::fs;

const MAX_TEXTURE_SIZE: u32 = 2048;

/// Scale an image down to the GPU texture limit, preserving aspect ratio
fn fit_texture_limit(img: DynamicImage) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if width <= MAX_TEXTURE_SIZE && height <= MAX_TEXTURE_SIZE {
        return img;
    }
    let scale = (MAX_TEXTURE_SIZE as f32 / width as f32)
        .min(MAX_TEXTURE_SIZE as f32 / height as f32);
    let new_width = (width as f32 * scale) as u32;
    let new_height = (height as f32 * scale) as u32;
    img.resize(new_width, new_height, image::imageops::FilterType::Triangle)
}

/// Upload a decoded image as an egui texture
pub fn texture_from_image(
    ctx: &egui::Context,
    name: &str,
    img: &DynamicImage,
) -> egui::TextureHandle {
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

/// Load and decode a source photo from disk. The natural dimensions of the
/// returned image drive the display-to-source scale factors later on.
pub fn load_source_image(path: &str) -> Result<DynamicImage, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read file: {}", e))?;
    image::load_from_memory(&bytes).map_err(|e| format!("Invalid image: {}", e))
}

/// Load a frame asset into an egui texture, returning its natural size.
pub fn load_texture_from_path(
    ctx: &egui::Context,
    path: &str,
) -> Result<(egui::TextureHandle, (u32, u32)), String> {
    let img = fit_texture_limit(load_source_image(path)?);
    let natural = (img.width(), img.height());
    Ok((texture_from_image(ctx, path, &img), natural))
}

/// Scale factor that fits an image inside the available area while
/// preserving aspect ratio
pub fn calculate_fit_scale(image_size: (u32, u32), available: (f32, f32)) -> f32 {
    if image_size.0 == 0 || image_size.1 == 0 {
        return 1.0;
    }
    let scale_x = available.0 / image_size.0 as f32;
    let scale_y = available.1 / image_size.1 as f32;
    scale_x.min(scale_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale_uses_limiting_axis() {
        let scale = calculate_fit_scale((1000, 500), (500.0, 500.0));
        assert_eq!(scale, 0.5);
        let scale = calculate_fit_scale((500, 1000), (500.0, 250.0));
        assert_eq!(scale, 0.25);
    }

    #[test]
    fn test_fit_scale_degenerate_image() {
        assert_eq!(calculate_fit_scale((0, 100), (500.0, 500.0)), 1.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_source_image("does/not/exist.png").is_err());
    }
}

mod crop;
mod texture;

pub use crop::{extract_region, save_crop, CropOutput};
pub use texture::{
    calculate_fit_scale, load_source_image, load_texture_from_path, texture_from_image,
};

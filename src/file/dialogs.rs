use std::path::PathBuf;

#[cfg(target_os = "windows")]
use rfd::FileDialog;

// Native file dialog functions (Windows only)
#[cfg(target_os = "windows")]
pub fn pick_image_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
        .pick_file()
}

#[cfg(target_os = "windows")]
pub fn pick_crop_save_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("JPEG Image", &["jpg", "jpeg"])
        .set_file_name("crop.jpg")
        .save_file()
}

// Fallback for non-Windows (returns None, uses text input instead)
#[cfg(not(target_os = "windows"))]
pub fn pick_image_file() -> Option<PathBuf> {
    None
}
#[cfg(not(target_os = "windows"))]
pub fn pick_crop_save_file() -> Option<PathBuf> {
    None
}

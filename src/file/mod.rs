mod dialogs;

pub use dialogs::{pick_crop_save_file, pick_image_file};

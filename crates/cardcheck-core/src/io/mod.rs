pub mod image_io;

pub use image_io::{is_frame_file, list_frame_files, load_frame};

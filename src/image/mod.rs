pub mod io;
pub mod rgba;

pub use self::io::{load_rgba_image, read_json_file, write_json_file};
pub use self::rgba::{ImageRgba8, RgbaImage8, BYTES_PER_PIXEL};

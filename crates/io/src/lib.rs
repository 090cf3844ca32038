pub mod export;

pub use export::{export_ffe, export_ffe_to_path, export_filename, FFE_CSV_COLUMNS};

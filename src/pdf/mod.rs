//! PDF output module

pub mod font;
pub mod image;
pub mod metadata;
pub mod sheet;

// Re-export commonly used items
pub use font::{encode_win_ansi, TagFont};
pub use image::LogoImage;
pub use metadata::{count_pages, extract_metadata, PdfMetadata};
pub use sheet::{DocumentInfo, SheetWriter};

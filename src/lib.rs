//! Tag Sheets Library
//!
//! Builds printable PDF sheets of foldable, double-sided name tags sized for
//! standard 85mm × 54mm badge holders. This library provides functionality to:
//! - Read name and role lists and duplicate each entry for folding
//! - Shrink long names until they fit their tag
//! - Lay out cut lines, brand stripes, text and a logo, ten tags per page
//! - Write and read back the resulting PDF
//!
//! # Example
//!
//! ```no_run
//! use tag_sheets::generate::{generate_tag_sheet, TagSheetOptions};
//! use std::path::PathBuf;
//!
//! let options = TagSheetOptions {
//!     names_path: PathBuf::from("names.txt"),
//!     roles_path: PathBuf::from("roles.txt"),
//!     output_path: PathBuf::from("namnlappar.pdf"),
//!     ..Default::default()
//! };
//!
//! generate_tag_sheet(&options).expect("Failed to create tag sheet");
//! ```

pub mod error;
pub mod entries;
pub mod fit;
pub mod generate;
pub mod layout;
pub mod pdf;
pub mod plan;

// Re-export commonly used items
pub use error::{Error, Result};
pub use generate::{generate_tag_sheet, TagSheetOptions, TagSheetSummary};

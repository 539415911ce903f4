//! End-to-end tag sheet generation

use std::path::PathBuf;
use crate::entries::{duplicate_for_folding, load_entries, RolePolicy};
use crate::error::Result;
use crate::layout::{Column, SheetGeometry};
use crate::pdf::{DocumentInfo, LogoImage, SheetWriter, TagFont};
use crate::plan::{plan_pages, TextStyle};

/// Everything needed to produce one tag sheet
///
/// The defaults are the file names the tool has always used, relative to the
/// current directory.
#[derive(Debug, Clone)]
pub struct TagSheetOptions {
    /// Names, one per line
    pub names_path: PathBuf,
    /// Roles, one per line, matched to names by line number
    pub roles_path: PathBuf,
    pub output_path: PathBuf,
    /// Regular face of the tag font family; must be present and valid
    pub regular_font_path: PathBuf,
    /// Bold face, used for names and roles
    pub font_path: PathBuf,
    /// PNG or JPEG logo drawn on every tag
    pub logo_path: PathBuf,
    pub role_policy: RolePolicy,
    pub geometry: SheetGeometry,
    pub style: TextStyle,
    pub info: DocumentInfo,
}

impl Default for TagSheetOptions {
    fn default() -> Self {
        Self {
            names_path: PathBuf::from("names.txt"),
            roles_path: PathBuf::from("roles.txt"),
            output_path: PathBuf::from("namnlappar.pdf"),
            regular_font_path: PathBuf::from("Fonts/Exo/Exo-Regular.ttf"),
            font_path: PathBuf::from("Fonts/Exo/Exo-Bold.ttf"),
            logo_path: PathBuf::from("au-logotyp.jpg"),
            role_policy: RolePolicy::default(),
            geometry: SheetGeometry::default(),
            style: TextStyle::default(),
            info: DocumentInfo::default(),
        }
    }
}

/// What a generation run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSheetSummary {
    /// Lines read from the names file
    pub entries: usize,
    /// Tags drawn, two per entry
    pub tags: usize,
    pub pages: usize,
    /// Names still too wide at the smallest allowed size, once each
    pub overflowing: Vec<String>,
}

/// Read the input files, lay out every tag and write the PDF
///
/// All inputs are read and checked before the output file is touched, so a
/// missing file or a name/role mismatch never leaves a partial PDF behind.
///
/// # Example
///
/// ```no_run
/// use tag_sheets::generate::{generate_tag_sheet, TagSheetOptions};
/// use std::path::PathBuf;
///
/// let options = TagSheetOptions {
///     output_path: PathBuf::from("tags.pdf"),
///     ..Default::default()
/// };
///
/// let summary = generate_tag_sheet(&options).expect("Failed to make tags");
/// println!("{} pages", summary.pages);
/// ```
pub fn generate_tag_sheet(options: &TagSheetOptions) -> Result<TagSheetSummary> {
    let entries = load_entries(&options.names_path, &options.roles_path, options.role_policy)?;
    let working = duplicate_for_folding(&entries);

    // The regular face must load even though only bold is drawn
    TagFont::load(&options.regular_font_path)?;
    let font = TagFont::load(&options.font_path)?;
    let logo = LogoImage::load(&options.logo_path)?;

    let pages = plan_pages(&working, &options.geometry, &options.style, &font, logo.aspect());

    let mut writer = SheetWriter::new(&options.geometry);
    writer.set_font(&font);
    writer.set_logo(&logo)?;
    for page in &pages {
        writer.draw_page(page)?;
    }
    let page_count = writer.save(&options.output_path, &options.info)?;

    let overflowing = pages
        .iter()
        .flat_map(|page| page.tags.iter())
        .filter(|tag| !tag.name_fits && tag.slot.column == Column::Left)
        .map(|tag| tag.name.text.clone())
        .collect();

    Ok(TagSheetSummary {
        entries: entries.len(),
        tags: working.len(),
        pages: page_count,
        overflowing,
    })
}

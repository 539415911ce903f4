//! Drawing page plans into a PDF
//!
//! [`SheetWriter`] owns the document for the whole run. Pages are built one
//! at a time: a page stays open until the next one starts or the document is
//! saved, so a partial last page is never lost.

use std::path::Path;
use chrono::Local;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use crate::error::{Error, Result};
use crate::layout::{Color, GuideLine, SheetGeometry};
use crate::plan::{PagePlan, PlacedTag, PlacedText};
use super::font::{encode_win_ansi, TagFont};
use super::image::LogoImage;

/// Resource name of the tag font
const FONT_NAME: &str = "F1";
/// Resource name of the logo image
const LOGO_NAME: &str = "Logo";

/// Document information written on save
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "Name tags".to_string(),
            producer: format!("tag-sheets {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Owned PDF builder for a tag sheet
pub struct SheetWriter {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    fonts: Dictionary,
    xobjects: Dictionary,
    media_box: Vec<Object>,
    page_ids: Vec<ObjectId>,
    /// Operations of the page being drawn
    current: Option<Vec<Operation>>,
}

impl SheetWriter {
    pub fn new(geometry: &SheetGeometry) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let resources_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            resources_id,
            fonts: Dictionary::new(),
            xobjects: Dictionary::new(),
            media_box: vec![
                0.into(),
                0.into(),
                geometry.page_width().into(),
                geometry.page_height().into(),
            ],
            page_ids: Vec::new(),
            current: None,
        }
    }

    /// Embed the font used for names and roles
    pub fn set_font(&mut self, font: &TagFont) {
        let font_id = font.embed(&mut self.doc);
        self.fonts.set(FONT_NAME, font_id);
    }

    /// Embed the logo drawn on every tag
    pub fn set_logo(&mut self, logo: &LogoImage) -> Result<()> {
        let logo_id = logo.embed(&mut self.doc)?;
        self.xobjects.set(LOGO_NAME, logo_id);
        Ok(())
    }

    /// Finish the open page, if any, and start an empty one
    pub fn start_page(&mut self) -> Result<()> {
        self.finish_page()?;
        self.current = Some(Vec::new());
        Ok(())
    }

    /// Pages finished or in progress
    pub fn page_count(&self) -> usize {
        self.page_ids.len() + usize::from(self.current.is_some())
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        self.current.get_or_insert_with(Vec::new)
    }

    pub fn draw_guides(&mut self, guides: &[GuideLine]) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        for line in guides {
            ops.push(Operation::new("w", vec![line.width.into()]));
            ops.push(stroke_color(line.color));
            ops.push(Operation::new("m", vec![line.from.x.into(), line.from.y.into()]));
            ops.push(Operation::new("l", vec![line.to.x.into(), line.to.y.into()]));
            ops.push(Operation::new("S", vec![]));
        }
        ops.push(Operation::new("Q", vec![]));
    }

    pub fn draw_tag(&mut self, tag: &PlacedTag) {
        self.draw_text(&tag.name);
        self.draw_text(&tag.role);

        let logo = tag.logo;
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                logo.width.into(),
                0.into(),
                0.into(),
                logo.height.into(),
                logo.x.into(),
                logo.y.into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![LOGO_NAME.into()]));
        ops.push(Operation::new("Q", vec![]));
    }

    fn draw_text(&mut self, text: &PlacedText) {
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("g", vec![0.into()]));
        ops.push(Operation::new("Tf", vec![FONT_NAME.into(), text.size.into()]));
        ops.push(Operation::new("Td", vec![text.x.into(), text.y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&text.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Draw a whole page plan on a fresh page
    pub fn draw_page(&mut self, page: &PagePlan) -> Result<()> {
        self.start_page()?;
        self.draw_guides(&page.guides);
        for tag in &page.tags {
            self.draw_tag(tag);
        }
        Ok(())
    }

    fn finish_page(&mut self) -> Result<()> {
        let Some(operations) = self.current.take() else {
            return Ok(());
        };

        let content = Content { operations }.encode()?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => self.media_box.clone(),
            "Resources" => self.resources_id,
            "Contents" => content_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Finish the last page and write the document to `path`
    pub fn save(mut self, path: &Path, info: &DocumentInfo) -> Result<usize> {
        self.finish_page()?;
        if self.page_ids.is_empty() {
            return Err(Error::EmptyPdf(path.to_path_buf()));
        }

        let page_count = self.page_ids.len();
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();

        self.doc.objects.insert(
            self.resources_id,
            Object::Dictionary(dictionary! {
                "Font" => self.fonts.clone(),
                "XObject" => self.xobjects.clone(),
            }),
        );
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal(info.title.as_str()),
            "Producer" => Object::string_literal(info.producer.as_str()),
            "CreationDate" => Object::string_literal(pdf_date_now()),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        self.doc.compress();
        self.doc.save(path)?;

        log::info!("Wrote {} pages to {}", page_count, path.display());
        Ok(page_count)
    }
}

fn stroke_color(color: Color) -> Operation {
    match color {
        Color::Rgb(r, g, b) => Operation::new("RG", vec![r.into(), g.into(), b.into()]),
        Color::Cmyk(c, m, y, k) => Operation::new("K", vec![c.into(), m.into(), y.into(), k.into()]),
    }
}

/// Current local time as a PDF date string
fn pdf_date_now() -> String {
    let now = Local::now();
    let offset = now.format("%:z").to_string().replace(':', "'");
    format!("D:{}{}'", now.format("%Y%m%d%H%M%S"), offset)
}

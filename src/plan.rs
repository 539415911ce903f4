//! Page plans: what goes where, before anything is drawn
//!
//! Planning is pure so the page cadence, placement and font sizing can be
//! checked without a font file or a PDF writer.

use crate::entries::Entry;
use crate::fit::{fit_font_size, FitRule, TextMeasure};
use crate::layout::{page_count, GuideLine, Rect, SheetGeometry, Slot, TAGS_PER_PAGE};

/// Font sizes for tag text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Starting size for names before shrinking
    pub name_size: f32,
    pub role_size: f32,
    /// Floor for name shrinking; `None` shrinks without limit
    pub min_name_size: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            name_size: 24.0,
            role_size: 14.0,
            min_name_size: Some(1.0),
        }
    }
}

/// A line of text with its baseline origin
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// One tag with everything positioned
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTag {
    /// Index in the working sequence
    pub index: usize,
    pub slot: Slot,
    pub name: PlacedText,
    pub role: PlacedText,
    pub logo: Rect,
    /// False when the name is still too wide at the smallest allowed size
    pub name_fits: bool,
}

/// Everything drawn on one page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Zero-based page number
    pub number: usize,
    pub guides: Vec<GuideLine>,
    pub tags: Vec<PlacedTag>,
}

/// Lay out a working sequence (already duplicated for folding) onto pages
///
/// `logo_aspect` is the logo's height divided by its width.
pub fn plan_pages<M: TextMeasure + ?Sized>(
    working: &[Entry],
    geometry: &SheetGeometry,
    style: &TextStyle,
    measure: &M,
    logo_aspect: f32,
) -> Vec<PagePlan> {
    let rule = FitRule {
        default_size: style.name_size,
        max_width: geometry.fit_width(),
        min_size: style.min_name_size,
    };

    let pages = page_count(working.len());
    log::info!("Laying out {} tags on {} pages", working.len(), pages);

    let mut plans = Vec::with_capacity(pages);
    for (number, group) in working.chunks(TAGS_PER_PAGE).enumerate() {
        let tags = group
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let index = number * TAGS_PER_PAGE + offset;
                place_tag(index, entry, geometry, style, &rule, measure, logo_aspect)
            })
            .collect();

        plans.push(PagePlan {
            number,
            guides: geometry.guide_lines(),
            tags,
        });
    }
    plans
}

fn place_tag<M: TextMeasure + ?Sized>(
    index: usize,
    entry: &Entry,
    geometry: &SheetGeometry,
    style: &TextStyle,
    rule: &FitRule,
    measure: &M,
    logo_aspect: f32,
) -> PlacedTag {
    let slot = Slot::for_index(index);
    let fitted = fit_font_size(measure, &entry.name, rule);
    if !fitted.fits {
        log::warn!(
            "Name {:?} is {:.1}pt wide at the minimum size {}pt and will overflow its tag",
            entry.name,
            fitted.width,
            fitted.size
        );
    }

    let role_width = measure.text_width(&entry.role, style.role_size);

    log::debug!(
        "Tag {} on page {} row {} {:?}: {:?} at {}pt",
        index,
        slot.page + 1,
        slot.row,
        slot.column,
        entry.name,
        fitted.size
    );

    PlacedTag {
        index,
        slot,
        name: PlacedText {
            text: entry.name.clone(),
            size: fitted.size,
            x: geometry.centered_x(slot.column, fitted.width),
            y: geometry.name_baseline(slot.row),
            width: fitted.width,
        },
        role: PlacedText {
            text: entry.role.clone(),
            size: style.role_size,
            x: geometry.centered_x(slot.column, role_width),
            y: geometry.role_baseline(slot.row),
            width: role_width,
        },
        logo: geometry.logo_rect(slot.row, slot.column, logo_aspect),
        name_fits: fitted.fits,
    }
}

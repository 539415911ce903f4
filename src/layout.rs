//! Sheet geometry and tag placement
//!
//! All coordinates are PDF points with the origin at the bottom-left of the
//! page. A page holds five rows of folded badges; each row is two tags wide,
//! the left and right halves of one badge.

/// Working-sequence entries drawn on one page
pub const TAGS_PER_PAGE: usize = 10;

/// Rows of badges per page
pub const ROWS_PER_PAGE: usize = TAGS_PER_PAGE / 2;

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        self.0 * 72.0 / 25.4
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self {
            width: Length::from_mm(210.0),
            height: Length::from_mm(297.0),
        }
    }
}

/// Left or right half of a folded badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

impl Column {
    fn offset(self) -> f32 {
        match self {
            Column::Left => 0.0,
            Column::Right => 1.0,
        }
    }
}

/// Where a working-sequence index lands on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Zero-based page number
    pub page: usize,
    /// Zero-based row on the page, top to bottom
    pub row: usize,
    pub column: Column,
}

impl Slot {
    pub fn for_index(index: usize) -> Self {
        let in_page = index % TAGS_PER_PAGE;
        Self {
            page: index / TAGS_PER_PAGE,
            row: in_page / 2,
            column: if index % 2 == 0 { Column::Left } else { Column::Right },
        }
    }
}

/// Number of pages needed for a working sequence of `len` entries
pub fn page_count(len: usize) -> usize {
    len.div_ceil(TAGS_PER_PAGE)
}

/// Stroke color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgb(f32, f32, f32),
    Cmyk(f32, f32, f32, f32),
}

/// Light gray used for cut lines
pub const CUT_GRAY: Color = Color::Rgb(0.95, 0.95, 0.95);
/// Yellow brand stripe
pub const STRIPE_YELLOW: Color = Color::Cmyk(0.0, 0.29, 1.0, 0.0);
/// Blue brand stripe
pub const STRIPE_BLUE: Color = Color::Cmyk(0.52, 0.23, 0.0, 0.12);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box, `(x, y)` is the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A straight cut line or stripe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub from: Point,
    pub to: Point,
    pub width: f32,
    pub color: Color,
}

/// Fixed geometry of a tag sheet
///
/// The defaults fit 85mm × 54mm badge holders: each tag is 250pt wide and a
/// fifth of an A4 page tall, folded along the line between the two columns.
#[derive(Debug, Clone)]
pub struct SheetGeometry {
    pub page: PageDimensions,
    /// Distance from the left page edge to the first cut line
    pub margin: f32,
    /// Width of one tag (half a badge)
    pub tag_width: f32,
    /// Drop from the top of a row to the name baseline
    pub name_drop: f32,
    /// Drop from the top of a row to the role baseline
    pub role_drop: f32,
    /// Fraction of the tag width a name may occupy
    pub fit_ratio: f32,
    /// Drop from the top of a row to the yellow stripe
    pub yellow_drop: f32,
    /// Drop from the top of a row to the blue stripe
    pub blue_drop: f32,
    pub stripe_width: f32,
    pub cut_width: f32,
    /// Largest logo size; the logo keeps its aspect ratio inside this box
    pub logo_width: f32,
    pub logo_height: f32,
    /// Drop from the top of a row to the bottom of the logo box
    pub logo_drop: f32,
}

impl Default for SheetGeometry {
    fn default() -> Self {
        Self {
            page: PageDimensions::a4(),
            margin: 50.0,
            tag_width: 250.0,
            name_drop: 40.0,
            role_drop: 67.0,
            fit_ratio: 0.9,
            yellow_drop: 89.0,
            blue_drop: 85.0,
            stripe_width: 4.0,
            cut_width: 2.0,
            logo_width: 200.0,
            logo_height: 60.0,
            logo_drop: 160.0,
        }
    }
}

impl SheetGeometry {
    pub fn page_width(&self) -> f32 {
        self.page.width.pt() as f32
    }

    pub fn page_height(&self) -> f32 {
        self.page.height.pt() as f32
    }

    /// Height of one row of badges
    pub fn row_height(&self) -> f32 {
        self.page_height() / ROWS_PER_PAGE as f32
    }

    /// Y coordinate of the top edge of `row`
    pub fn row_top(&self, row: usize) -> f32 {
        self.page_height() - row as f32 * self.row_height()
    }

    pub fn name_baseline(&self, row: usize) -> f32 {
        self.row_top(row) - self.name_drop
    }

    pub fn role_baseline(&self, row: usize) -> f32 {
        self.row_top(row) - self.role_drop
    }

    /// Widest a name may be drawn
    pub fn fit_width(&self) -> f32 {
        self.tag_width * self.fit_ratio
    }

    pub fn column_center(&self, column: Column) -> f32 {
        self.margin + self.tag_width * (column.offset() + 0.5)
    }

    /// Left x of a run of `width` points centered in `column`
    pub fn centered_x(&self, column: Column, width: f32) -> f32 {
        self.column_center(column) - width / 2.0
    }

    /// Right edge of the two tag columns
    fn right_edge(&self) -> f32 {
        self.margin + self.tag_width * 2.0
    }

    /// Logo rectangle for a slot, given the image's height / width ratio
    pub fn logo_rect(&self, row: usize, column: Column, aspect: f32) -> Rect {
        let (mut width, mut height) = (self.logo_width, self.logo_width * aspect);
        if height > self.logo_height {
            height = self.logo_height;
            width = self.logo_height / aspect;
        }

        let box_bottom = self.row_top(row) - self.logo_drop;
        Rect {
            x: self.centered_x(column, width),
            y: box_bottom + (self.logo_height - height) / 2.0,
            width,
            height,
        }
    }

    /// Cut lines and brand stripes, drawn once per page
    pub fn guide_lines(&self) -> Vec<GuideLine> {
        let (left, right) = (self.margin, self.right_edge());
        let row_height = self.row_height();
        let horizontal = |y: f32, width: f32, color: Color| GuideLine {
            from: Point::new(left, y),
            to: Point::new(right, y),
            width,
            color,
        };

        let mut lines = Vec::with_capacity(ROWS_PER_PAGE * 3 + 5);
        for k in 0..=ROWS_PER_PAGE {
            let top = (k + 1) as f32 * row_height;
            lines.push(horizontal(k as f32 * row_height, self.cut_width, CUT_GRAY));
            lines.push(horizontal(top - self.yellow_drop, self.stripe_width, STRIPE_YELLOW));
            lines.push(horizontal(top - self.blue_drop, self.stripe_width, STRIPE_BLUE));
        }

        let height = self.page_height();
        for x in [right, left] {
            lines.push(GuideLine {
                from: Point::new(x, 0.0),
                to: Point::new(x, height),
                width: self.cut_width,
                color: CUT_GRAY,
            });
        }

        lines
    }
}

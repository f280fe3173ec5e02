//! Page layout for the daily report.
//!
//! Produces a backend-independent list of pages, each a list of positioned
//! elements. Coordinates are millimetres from the top-left corner of the page.

use crate::model::ReportRow;

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 0.352_778;

/// Average glyph advance of the body font, as a fraction of the font size.
const AVERAGE_GLYPH_EM: f32 = 0.5;

/// Horizontal padding inside a cell.
const CELL_PADDING_MM: f32 = 1.0;

/// Fixed page geometry and type sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Page width.
    pub page_width_mm: f32,
    /// Page height.
    pub page_height_mm: f32,
    /// Margin on every side.
    pub margin_mm: f32,
    /// Title font size in points.
    pub title_size_pt: f32,
    /// Title cell height.
    pub title_height_mm: f32,
    /// Space below the title.
    pub title_gap_mm: f32,
    /// Header and body font size in points.
    pub body_size_pt: f32,
    /// Entry header cell height.
    pub header_height_mm: f32,
    /// Height of one wrapped body line.
    pub line_height_mm: f32,
    /// Space between entries.
    pub entry_gap_mm: f32,
}

impl Default for LayoutSettings {
    /// A4 portrait with a 190 mm content width.
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            title_size_pt: 16.0,
            title_height_mm: 10.0,
            title_gap_mm: 5.0,
            body_size_pt: 10.0,
            header_height_mm: 8.0,
            line_height_mm: 7.0,
            entry_gap_mm: 2.0,
        }
    }
}

impl LayoutSettings {
    /// Width available between the side margins.
    #[must_use]
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Number of body-font characters that fit the content width.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn wrap_columns(&self) -> usize {
        let glyph_mm = self.body_size_pt * MM_PER_PT * AVERAGE_GLYPH_EM;
        let usable = self.content_width_mm() - 2.0 * CELL_PADDING_MM;
        // at least one column
        (usable / glyph_mm).floor().max(1.0) as usize
    }

    fn bottom_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }

    /// Estimated printed width of a string in the given size.
    #[allow(clippy::cast_precision_loss)]
    fn text_width_mm(text: &str, size_pt: f32) -> f32 {
        text.chars().count() as f32 * size_pt * MM_PER_PT * AVERAGE_GLYPH_EM
    }

    /// Baseline that vertically centers text of `size_pt` in a cell.
    fn baseline(top_mm: f32, height_mm: f32, size_pt: f32) -> f32 {
        top_mm + (height_mm + size_pt * MM_PER_PT * 0.7) / 2.0
    }
}

/// Font weight of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    /// Body text.
    Regular,
    /// Titles and entry headers.
    Bold,
}

/// A positioned drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A single line of text; `y_mm` is the baseline.
    Text {
        /// Left edge.
        x_mm: f32,
        /// Baseline.
        y_mm: f32,
        /// Font size in points.
        size_pt: f32,
        /// Font weight.
        weight: Weight,
        /// The text.
        text: String,
    },
    /// A light grey band behind an entry header.
    Shade {
        /// Left edge.
        x_mm: f32,
        /// Top edge.
        y_mm: f32,
        /// Width.
        width_mm: f32,
        /// Height.
        height_mm: f32,
    },
    /// A thin horizontal divider.
    Rule {
        /// Left end.
        x_mm: f32,
        /// Vertical position.
        y_mm: f32,
        /// Length.
        width_mm: f32,
    },
}

/// One page of elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Elements in drawing order.
    pub elements: Vec<Element>,
}

/// A laid-out report.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document title, also drawn on the first page.
    pub title: String,
    /// Geometry the pages were laid out with.
    pub settings: LayoutSettings,
    /// Pages in order; never empty.
    pub pages: Vec<Page>,
}

struct Cursor {
    settings: LayoutSettings,
    pages: Vec<Page>,
    y_mm: f32,
}

impl Cursor {
    fn new(settings: LayoutSettings) -> Self {
        Self {
            settings,
            pages: vec![Page::default()],
            y_mm: settings.margin_mm,
        }
    }

    /// Start a new page when `height_mm` does not fit above the bottom margin.
    fn reserve(&mut self, height_mm: f32) {
        if self.y_mm + height_mm > self.settings.bottom_mm() && self.y_mm > self.settings.margin_mm
        {
            self.pages.push(Page::default());
            self.y_mm = self.settings.margin_mm;
        }
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn rule(&mut self) {
        let element = Element::Rule {
            x_mm: self.settings.margin_mm,
            y_mm: self.y_mm,
            width_mm: self.settings.content_width_mm(),
        };
        self.push(element);
    }
}

/// Lay out a report: a centered title, then one block per row in the given order.
///
/// Each block is a shaded bold `[time] name` header with a rule above it, the
/// description wrapped to the content width, and a rule below it.
#[must_use]
pub fn layout(title: &str, rows: &[ReportRow], settings: LayoutSettings) -> Document {
    let mut cursor = Cursor::new(settings);
    let margin = settings.margin_mm;
    let content_width = settings.content_width_mm();

    let title_width = LayoutSettings::text_width_mm(title, settings.title_size_pt);
    cursor.push(Element::Text {
        x_mm: margin + ((content_width - title_width) / 2.0).max(0.0),
        y_mm: LayoutSettings::baseline(cursor.y_mm, settings.title_height_mm, settings.title_size_pt),
        size_pt: settings.title_size_pt,
        weight: Weight::Bold,
        text: title.to_string(),
    });
    cursor.y_mm += settings.title_height_mm + settings.title_gap_mm;

    let columns = settings.wrap_columns();
    for row in rows {
        cursor.reserve(settings.header_height_mm + settings.line_height_mm);
        cursor.push(Element::Shade {
            x_mm: margin,
            y_mm: cursor.y_mm,
            width_mm: content_width,
            height_mm: settings.header_height_mm,
        });
        cursor.rule();
        cursor.push(Element::Text {
            x_mm: margin + CELL_PADDING_MM,
            y_mm: LayoutSettings::baseline(
                cursor.y_mm,
                settings.header_height_mm,
                settings.body_size_pt,
            ),
            size_pt: settings.body_size_pt,
            weight: Weight::Bold,
            text: format!("[{}] {}", row.activity.time, row.employee_name()),
        });
        cursor.y_mm += settings.header_height_mm;

        for line in textwrap::wrap(&row.activity.description, columns) {
            cursor.reserve(settings.line_height_mm);
            cursor.push(Element::Text {
                x_mm: margin + CELL_PADDING_MM,
                y_mm: LayoutSettings::baseline(
                    cursor.y_mm,
                    settings.line_height_mm,
                    settings.body_size_pt,
                ),
                size_pt: settings.body_size_pt,
                weight: Weight::Regular,
                text: line.into_owned(),
            });
            cursor.y_mm += settings.line_height_mm;
        }
        cursor.rule();
        cursor.y_mm += settings.entry_gap_mm;
    }

    Document {
        title: title.to_string(),
        settings,
        pages: cursor.pages,
    }
}

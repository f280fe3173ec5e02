//! PDF backend for laid-out reports, built on `printpdf` builtin fonts.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use crate::error::{Error, Result};

use super::layout::{Document, Element, Weight, MM_PER_PT};

const LAYER_NAME: &str = "Report";
const RULE_THICKNESS_PT: f32 = 0.5;
const SHADE_GREY: f32 = 0.94;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: Weight) -> &IndirectFontRef {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

/// Render a laid-out document to PDF bytes.
///
/// # Errors
///
/// Returns [`Error::ReportRender`] if the PDF backend fails.
pub fn render(document: &Document) -> Result<Vec<u8>> {
    let settings = document.settings;
    let width = Mm(settings.page_width_mm);
    let height = Mm(settings.page_height_mm);

    let (doc, first_page, first_layer) =
        PdfDocument::new(document.title.as_str(), width, height, LAYER_NAME);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::report_render(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::report_render(e.to_string()))?,
    };

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };

        for element in &page.elements {
            draw(&layer, &fonts, settings.page_height_mm, element);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| Error::report_render(e.to_string()))
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, page_height_mm: f32, element: &Element) {
    // PDF coordinates grow upwards from the bottom-left corner.
    let flip = |y_mm: f32| Mm(page_height_mm - y_mm);

    match element {
        Element::Text {
            x_mm,
            y_mm,
            size_pt,
            weight,
            text,
        } => {
            layer.set_fill_color(grey(0.0));
            layer.use_text(text.as_str(), *size_pt, Mm(*x_mm), flip(*y_mm), fonts.get(*weight));
        }
        Element::Shade {
            x_mm,
            y_mm,
            width_mm,
            height_mm,
        } => {
            // a stroke as thick as the band fills it
            let middle = *y_mm + height_mm / 2.0;
            layer.set_outline_color(grey(SHADE_GREY));
            layer.set_outline_thickness(height_mm / MM_PER_PT);
            layer.add_line(horizontal(*x_mm, *width_mm, flip(middle)));
        }
        Element::Rule {
            x_mm,
            y_mm,
            width_mm,
        } => {
            layer.set_outline_color(grey(0.0));
            layer.set_outline_thickness(RULE_THICKNESS_PT);
            layer.add_line(horizontal(*x_mm, *width_mm, flip(*y_mm)));
        }
    }
}

fn horizontal(x_mm: f32, width_mm: f32, y: Mm) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x_mm), y), false),
            (Point::new(Mm(x_mm + width_mm), y), false),
        ],
        is_closed: false,
    }
}

fn grey(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

//! Custom `genpdf` elements used by the report table.

use genpdf::error::Error;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Size};

/// Light grey used behind header and totals rows.
pub const SHADE_COLOR: Color = Color::Rgb(240, 240, 240);

const SHADE_STEP_MM: f64 = 0.3;

/// Converts millimetres given as `f64` into `genpdf`'s unit type.
pub fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// A single line of text drawn on top of a filled background.
///
/// `genpdf` has no fill primitive for table cells, so the background is painted with closely
/// spaced horizontal strokes before the text is printed.
pub struct ShadedCell {
    text: String,
    alignment: Alignment,
    style: Style,
    padding: Mm,
}

impl ShadedCell {
    /// Creates a shaded cell with the default shade and no padding.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Left,
            style: Style::new(),
            padding: Mm::default(),
        }
    }

    /// Sets the alignment and returns the updated element.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the text style and returns the updated element.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets the padding around the text on all sides and returns the updated element.
    pub fn with_padding(mut self, padding: Mm) -> Self {
        self.padding = padding;
        self
    }

    /// Paints the background with strokes `SHADE_STEP_MM` apart. The default 1pt stroke is
    /// slightly wider than the step, so neighbouring strokes overlap.
    fn fill(&self, area: &render::Area<'_>, height: Mm) {
        let width = area.size().width;
        let height = mm_to_f64(height);
        let mut y = SHADE_STEP_MM / 2.0;
        while y < height {
            let offset = mm_from_f64(y);
            area.draw_line(
                vec![Position::new(0, offset), Position::new(width, offset)],
                Style::new().with_color(SHADE_COLOR),
            );
            y += SHADE_STEP_MM;
        }
    }
}

impl Element for ShadedCell {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let mut result = RenderResult::default();

        let line_height = style.line_height(&context.font_cache);
        let height = line_height + self.padding + self.padding;
        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        self.fill(&area, height);

        let text_width = StyledString::new(self.text.clone(), style).width(&context.font_cache);
        let available_width = area.size().width;
        let x_offset = match self.alignment {
            Alignment::Left => self.padding,
            Alignment::Center => (available_width - text_width) / 2.0,
            Alignment::Right => available_width - text_width - self.padding,
        };

        match area.text_section(
            &context.font_cache,
            Position::new(x_offset, self.padding),
            style,
        ) {
            Some(mut section) => section.print_str(&self.text, style)?,
            None => {
                result.has_more = true;
                return Ok(result);
            }
        }

        result.size = Size::new(available_width, height);
        Ok(result)
    }
}

//! Renders a [`ReportDocument`] into PDF bytes with `genpdf`.
//!
//! A report whose footer shows `Page X of Y` is rendered twice: the first pass only counts pages,
//! the second one prints the known total. The footer occupies a fixed height, so both passes lay
//! out identically.

use std::cell::RefCell;
use std::rc::Rc;

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Element, Margins, PaperSize};

use crate::builder::DocumentBuilder;
use crate::elements::{mm_from_f64, ShadedCell};
use crate::error::RenderError;
use crate::fonts;
use crate::model::{Footer, HorizontalAlignment, ReportDocument, ReportTable, RowKind, TableRow};

/// Page margin on every side: 50pt.
pub const PAGE_MARGIN_MM: f64 = 17.64;

const CELL_PADDING_MM: f64 = 1.0;
const HEADER_FONT_SIZE: u8 = 11;
const BODY_FONT_SIZE: u8 = 10;
const PAGE_NUMBER_FONT_SIZE: u8 = 8;
const DISCLAIMER_FONT_SIZE: u8 = 7;
const PAGE_NUMBER_FOOTER_MM: f64 = 8.0;
const DISCLAIMER_FOOTER_MM: f64 = 12.0;

/// The PDF file signature every rendered report starts with.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// PDF bytes of a finished report together with the footer printed on each page.
#[derive(Clone, Debug)]
pub struct RenderedReport {
    bytes: Vec<u8>,
    footers: Vec<String>,
}

impl RenderedReport {
    /// The serialized PDF.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Footer text of every page, first page first.
    pub fn footers(&self) -> &[String] {
        &self.footers
    }

    pub fn page_count(&self) -> usize {
        self.footers.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Renders `report` with the default font family.
pub fn render_report(report: &ReportDocument) -> Result<Vec<u8>, RenderError> {
    let family = fonts::default_font_family().map_err(|err| {
        if fonts::fonts_missing(&err) {
            log::error!("no font family available: {}", err);
        } else {
            log::error!("font family could not be loaded: {}", err);
        }
        RenderError::FontUnavailable(err)
    })?;
    render_report_with_fonts(report, family).map(RenderedReport::into_bytes)
}

/// Renders `report` with an explicitly provided font family.
pub fn render_report_with_fonts(
    report: &ReportDocument,
    family: FontFamily<FontData>,
) -> Result<RenderedReport, RenderError> {
    match report.footer() {
        Footer::PageNumbers => {
            let draft = render_pass(report, family.clone(), None)?;
            log::debug!("first pass laid out {} page(s)", draft.page_count());
            render_pass(report, family, Some(draft.page_count()))
        }
        Footer::Disclaimer(_) => render_pass(report, family, None),
    }
}

fn render_pass(
    report: &ReportDocument,
    family: FontFamily<FontData>,
    total_pages: Option<usize>,
) -> Result<RenderedReport, RenderError> {
    let footer = report.footer().clone();
    let (footer_height, footer_font_size) = match footer {
        Footer::PageNumbers => (PAGE_NUMBER_FOOTER_MM, PAGE_NUMBER_FONT_SIZE),
        Footer::Disclaimer(_) => (DISCLAIMER_FOOTER_MM, DISCLAIMER_FONT_SIZE),
    };

    let printed = Rc::new(RefCell::new(Vec::new()));
    let footers = Rc::clone(&printed);

    let builder = DocumentBuilder::new()
        .with_title(report.title())
        .with_paper_size(PaperSize::A4)
        .with_margins(Margins::all(mm_from_f64(PAGE_MARGIN_MM)))
        .with_font_size(BODY_FONT_SIZE)
        .with_footer(mm_from_f64(footer_height), move |page| {
            let text = footer.text(page, total_pages.unwrap_or(page));
            footers.borrow_mut().push(text.clone());
            Paragraph::new(text)
                .aligned(Alignment::Center)
                .styled(Style::new().with_font_size(footer_font_size))
        });
    let pages = builder.page_count();
    let mut document = builder.build(family);

    if let Some(preface) = report.preface() {
        document.push(Paragraph::new(preface));
        document.push(Break::new(1));
    }
    document.push(table_layout(report.table()).map_err(RenderError::Layout)?);

    let mut bytes = Vec::new();
    document.render(&mut bytes).map_err(classify_render_error)?;
    let footers = printed.replace(Vec::new());
    debug_assert_eq!(footers.len(), pages.get());
    Ok(RenderedReport { bytes, footers })
}

fn classify_render_error(err: Error) -> RenderError {
    log::error!("rendering report failed: {}", err);
    match err.kind() {
        ErrorKind::IoError(_) | ErrorKind::PdfError(_) | ErrorKind::PdfIndexError(_) => {
            RenderError::Serialization(err)
        }
        _ => RenderError::Layout(err),
    }
}

fn table_layout(table: &ReportTable) -> Result<TableLayout, Error> {
    let mut layout = TableLayout::new(table.column_weights());
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    for row in table.rows() {
        layout.push_row(row_elements(row))?;
    }
    Ok(layout)
}

fn row_elements(row: &TableRow) -> Vec<Box<dyn Element>> {
    let padding = mm_from_f64(CELL_PADDING_MM);
    row.cells()
        .iter()
        .map(|cell| -> Box<dyn Element> {
            let alignment = Alignment::from(cell.alignment());
            if row.is_emphasized() {
                let font_size = match row.kind() {
                    RowKind::Header => HEADER_FONT_SIZE,
                    _ => BODY_FONT_SIZE,
                };
                Box::new(
                    ShadedCell::new(cell.text())
                        .with_alignment(alignment)
                        .with_padding(padding)
                        .with_style(Style::new().bold().with_font_size(font_size)),
                )
            } else {
                Box::new(
                    Paragraph::new(cell.text())
                        .aligned(alignment)
                        .padded(Margins::all(padding)),
                )
            }
        })
        .collect()
}

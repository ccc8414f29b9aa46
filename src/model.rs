//! Data structures describing the logical content of a report.
//!
//! The types in this module capture everything that ends up on the page (texts, alignments,
//! emphasis, column weights) without referencing the rendering crate, so the report can be
//! inspected and tested without loading fonts. [`crate::render`] maps them onto `genpdf`
//! elements.

use chrono::NaiveDate;

use crate::dates;
use crate::locale::{self, LocalizationEntry};
use crate::payload::{DailyReport, RequestPayload};

/// Relative column widths in percent: date, total km, occupied km, tour, revenue.
pub const COLUMN_WEIGHTS: [usize; 5] = [20, 20, 20, 15, 25];

/// Horizontal placement of a cell's text.
///
/// The variants map directly to [`genpdf::Alignment`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Text of a single table cell together with its alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableCell {
    text: String,
    alignment: HorizontalAlignment,
}

impl TableCell {
    /// Creates a cell with the given text and alignment.
    pub fn new(text: impl Into<String>, alignment: HorizontalAlignment) -> Self {
        Self {
            text: text.into(),
            alignment,
        }
    }

    /// Returns the cell text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }
}

/// Visual treatment of a table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Shaded row with bold labels.
    Header,
    /// Plain row for one record.
    Body,
    /// Shaded row with bold sums.
    Totals,
}

/// One row of the report table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    kind: RowKind,
    cells: Vec<TableCell>,
}

impl TableRow {
    fn new(kind: RowKind, cells: Vec<TableCell>) -> Self {
        Self { kind, cells }
    }

    /// Returns the row kind.
    pub fn kind(&self) -> RowKind {
        self.kind
    }

    /// Returns the cells in column order.
    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    /// Returns the texts of all cells in column order.
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(TableCell::text).collect()
    }

    /// Whether the row is drawn with a shaded background and bold text.
    pub fn is_emphasized(&self) -> bool {
        matches!(self.kind, RowKind::Header | RowKind::Totals)
    }
}

/// The five-column activity table: one header row, one row per record and an optional totals row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportTable {
    rows: Vec<TableRow>,
}

impl ReportTable {
    /// Returns every row, header first.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Returns the header row.
    pub fn header(&self) -> &TableRow {
        &self.rows[0]
    }

    /// Returns the rows generated from the input records, in input order.
    pub fn body(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|row| row.kind == RowKind::Body)
    }

    /// Returns the totals row, if the report has one.
    pub fn totals(&self) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.kind == RowKind::Totals)
    }

    /// Relative column widths used for layout.
    pub fn column_weights(&self) -> Vec<usize> {
        COLUMN_WEIGHTS.to_vec()
    }
}

/// Content of the footer drawn on every page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Footer {
    /// `Page X of Y`.
    PageNumbers,
    /// Localized disclaimer with the generation date already filled in.
    Disclaimer(String),
}

impl Footer {
    /// Text printed on page `page` of `total`.
    pub fn text(&self, page: usize, total: usize) -> String {
        match self {
            Footer::PageNumbers => format!("Page {} of {}", page, total),
            Footer::Disclaimer(text) => text.clone(),
        }
    }
}

/// Everything needed to render one report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportDocument {
    title: String,
    locale: &'static str,
    preface: Option<String>,
    table: ReportTable,
    footer: Footer,
}

impl ReportDocument {
    /// Builds the report for `payload`.
    ///
    /// Payloads that carry batch metadata get a preface, a totals row and the dated disclaimer
    /// footer; flat record lists get only the table and page numbers. `today` is the date printed
    /// into the disclaimer.
    pub fn from_payload(payload: &RequestPayload, today: NaiveDate) -> Self {
        let entry = locale::resolve(payload.language(), payload.has_records());
        let mut rows = Vec::with_capacity(payload.records().len() + 2);
        rows.push(header_row(entry));
        rows.extend(
            payload
                .records()
                .iter()
                .map(|record| record_row(record, entry.family())),
        );

        let mut title = entry.title.to_owned();
        let (preface, footer) = match payload.meta() {
            Some(meta) => {
                rows.push(totals_row(payload.records(), entry));
                let period = format!("{} {}", meta.month, meta.year);
                if !period.trim().is_empty() {
                    title = format!("{} {}", title, period.trim());
                }
                let generated = dates::format_long_date(today, entry.date_style);
                (
                    Some(locale::fill_template(
                        entry.preface_template,
                        &[meta.month.as_str(), meta.year.as_str()],
                    )),
                    Footer::Disclaimer(locale::fill_template(
                        entry.footer_template,
                        &[generated.as_str()],
                    )),
                )
            }
            None => (None, Footer::PageNumbers),
        };

        Self {
            title,
            locale: entry.tag,
            preface,
            table: ReportTable { rows },
            footer,
        }
    }

    /// Document title stored in the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tag of the locale the report was localized with.
    pub fn locale(&self) -> &'static str {
        self.locale
    }

    /// Paragraph printed above the table, if any.
    pub fn preface(&self) -> Option<&str> {
        self.preface.as_deref()
    }

    /// Returns the activity table.
    pub fn table(&self) -> &ReportTable {
        &self.table
    }

    /// Returns the footer drawn on every page.
    pub fn footer(&self) -> &Footer {
        &self.footer
    }
}

fn header_row(entry: &LocalizationEntry) -> TableRow {
    let cells = entry
        .headers
        .as_array()
        .iter()
        .map(|label| TableCell::new(*label, HorizontalAlignment::Center))
        .collect();
    TableRow::new(RowKind::Header, cells)
}

fn record_row(record: &DailyReport, family: &str) -> TableRow {
    TableRow::new(
        RowKind::Body,
        vec![
            TableCell::new(
                dates::format_date(&record.date, family),
                HorizontalAlignment::Center,
            ),
            TableCell::new(
                format!("{:.1}", record.total_distance),
                HorizontalAlignment::Right,
            ),
            TableCell::new(
                format!("{:.1}", record.occupied_distance),
                HorizontalAlignment::Right,
            ),
            TableCell::new(record.tour.to_string(), HorizontalAlignment::Center),
            TableCell::new(format!("{:.2}", record.revenue), HorizontalAlignment::Right),
        ],
    )
}

fn totals_row(records: &[DailyReport], entry: &LocalizationEntry) -> TableRow {
    // `f64::sum` of nothing is -0.0, which would print as "-0.0".
    let total_distance = records.iter().fold(0.0, |acc, r| acc + r.total_distance);
    let occupied_distance = records.iter().fold(0.0, |acc, r| acc + r.occupied_distance);
    let tours: i64 = records.iter().map(|r| r.tour).sum();
    let revenue = records.iter().fold(0.0, |acc, r| acc + r.revenue);

    TableRow::new(
        RowKind::Totals,
        vec![
            TableCell::new(entry.total_label, HorizontalAlignment::Center),
            TableCell::new(format!("{:.1}", total_distance), HorizontalAlignment::Right),
            TableCell::new(
                format!("{:.1}", occupied_distance),
                HorizontalAlignment::Right,
            ),
            TableCell::new(tours.to_string(), HorizontalAlignment::Center),
            TableCell::new(format!("{:.2}", revenue), HorizontalAlignment::Right),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{self, ReportMetadata};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    fn record(date: &str, total: f64, occupied: f64, tour: i64, revenue: f64) -> DailyReport {
        DailyReport {
            date: date.to_owned(),
            total_distance: total,
            occupied_distance: occupied,
            tour,
            revenue,
            language: None,
        }
    }

    #[test]
    fn french_payload_produces_rounded_cells() {
        let payload = payload::decode(
            r#"{"records":[{"date":"2024-03-05","total_distance":120.4,"occupied_distance":80.15,"tour":3,"revenue":245.6}],"meta":{"language":"fr-FR","month":"Mars","year":"2024"}}"#,
        )
        .unwrap();
        let report = ReportDocument::from_payload(&payload, today());

        assert_eq!(report.locale(), "fr-FR");
        assert_eq!(
            report.table().header().texts(),
            vec!["Date", "Total km", "Km occupé", "Tour", "Recette"]
        );
        let rows: Vec<_> = report.table().body().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].texts(),
            vec!["Mar 05", "120.4", "80.2", "3", "245.60"]
        );
    }

    #[test]
    fn cell_alignments_follow_column_roles() {
        let payload = RequestPayload::new(vec![record("2024-01-01", 1.0, 1.0, 1, 1.0)], None);
        let report = ReportDocument::from_payload(&payload, today());
        let row = report.table().body().next().unwrap();
        let alignments: Vec<_> = row.cells().iter().map(TableCell::alignment).collect();
        assert_eq!(
            alignments,
            vec![
                HorizontalAlignment::Center,
                HorizontalAlignment::Right,
                HorizontalAlignment::Right,
                HorizontalAlignment::Center,
                HorizontalAlignment::Right,
            ]
        );
        assert!(report
            .table()
            .header()
            .cells()
            .iter()
            .all(|cell| cell.alignment() == HorizontalAlignment::Center));
    }

    #[test]
    fn flat_payload_has_page_numbers_and_no_extras() {
        let mut first = record("2024-01-01", 10.0, 5.0, 1, 20.0);
        first.language = Some("de-DE".to_owned());
        let payload = RequestPayload::new(vec![first, record("2024-01-07", 0.0, 0.0, 0, 0.0)], None);
        let report = ReportDocument::from_payload(&payload, today());

        assert_eq!(report.locale(), "de-DE");
        assert_eq!(report.preface(), None);
        assert_eq!(report.footer(), &Footer::PageNumbers);
        assert!(report.table().totals().is_none());
        assert_eq!(report.table().rows().len(), 3);
        let dates: Vec<_> = report
            .table()
            .body()
            .map(|row| row.cells()[0].text().to_owned())
            .collect();
        assert_eq!(dates, vec!["Mo 01", "So 07"]);
    }

    #[test]
    fn metadata_adds_preface_totals_and_disclaimer() {
        let payload = RequestPayload::new(
            vec![
                record("2024-03-04", 100.0, 60.0, 4, 180.5),
                record("2024-03-05", 50.3, 20.0, 2, -10.0),
            ],
            Some(ReportMetadata {
                language: "de-CH".to_owned(),
                month: "März".to_owned(),
                year: "2024".to_owned(),
            }),
        );
        let report = ReportDocument::from_payload(&payload, today());

        let preface = report.preface().unwrap();
        assert!(preface.contains("März 2024"));
        assert_eq!(report.title(), "Tagesbericht März 2024");
        match report.footer() {
            Footer::Disclaimer(text) => assert!(text.contains("02.04.2024")),
            other => panic!("unexpected footer {:?}", other),
        }
        let totals = report.table().totals().unwrap();
        assert_eq!(totals.texts(), vec!["Total", "150.3", "80.0", "6", "170.50"]);
        assert!(totals.is_emphasized());
    }

    #[test]
    fn empty_report_uses_default_locale() {
        let payload = RequestPayload::new(
            Vec::new(),
            Some(ReportMetadata {
                language: "fr-FR".to_owned(),
                month: "Mars".to_owned(),
                year: "2024".to_owned(),
            }),
        );
        let report = ReportDocument::from_payload(&payload, today());
        assert_eq!(report.locale(), locale::DEFAULT_LOCALE_TAG);
        assert_eq!(report.table().header().texts()[4], "Daily Revenue");
        assert_eq!(report.table().body().count(), 0);
        assert_eq!(
            report.table().totals().unwrap().texts(),
            vec!["Total", "0.0", "0.0", "0", "0.00"]
        );
    }

    #[test]
    fn bad_dates_do_not_abort_the_table() {
        let payload = RequestPayload::new(
            vec![
                record("garbage", 1.0, 1.0, 1, 1.0),
                record("2024-01-02", 1.0, 1.0, 1, 1.0),
            ],
            None,
        );
        let report = ReportDocument::from_payload(&payload, today());
        let dates: Vec<_> = report
            .table()
            .body()
            .map(|row| row.cells()[0].text().to_owned())
            .collect();
        assert_eq!(dates, vec!["garbage", "Tue 02"]);
    }

    #[test]
    fn page_number_footer_text() {
        assert_eq!(Footer::PageNumbers.text(2, 5), "Page 2 of 5");
        assert_eq!(Footer::Disclaimer("x".to_owned()).text(1, 1), "x");
    }
}

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use taxi_report::fonts;
use taxi_report::model::ReportDocument;
use taxi_report::payload;
use taxi_report::locale::LOCALES;
use taxi_report::render::{self, RenderedReport, PDF_SIGNATURE};

const FLAT_BODY: &str = r#"[
    {"date":"2024-01-01","total_distance":210.5,"occupied_distance":140.25,"tour":12,"revenue":385.4,"language":"de-CH"},
    {"date":"2024-01-02","total_distance":180.0,"occupied_distance":95.0,"tour":9,"revenue":290.0,"language":"de-CH"},
    {"date":"broken","total_distance":0.0,"occupied_distance":0.0,"tour":0,"revenue":0.0,"language":"de-CH"}
]"#;

const EXTENDED_BODY: &str = r#"{
    "records":[{"date":"2024-03-05","total_distance":120.4,"occupied_distance":80.15,"tour":3,"revenue":245.6}],
    "meta":{"language":"fr-FR","month":"Mars","year":"2024"}
}"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
}

fn render_body(body: &str) -> Option<Vec<u8>> {
    if !fonts::default_fonts_available() {
        return None;
    }

    let payload = payload::decode(body).expect("decode payload");
    let report = ReportDocument::from_payload(&payload, today());
    Some(render::render_report(&report).expect("render report"))
}

fn render_detailed(body: &str) -> Option<RenderedReport> {
    let family = fonts::default_font_family().ok()?;
    let payload = payload::decode(body).expect("decode payload");
    let report = ReportDocument::from_payload(&payload, today());
    Some(render::render_report_with_fonts(&report, family).expect("render report"))
}

fn long_flat_body(records: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let rows: Vec<String> = start
        .iter_days()
        .take(records)
        .map(|date| {
            format!(
                r#"{{"date":"{}","total_distance":100.0,"occupied_distance":50.0,"tour":4,"revenue":120.0,"language":"en-GB"}}"#,
                date.format("%Y-%m-%d")
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    Sha256::digest(&normalized).into()
}

fn skip(test: &str) {
    eprintln!(
        "Skipping {}: no font family available. Set {} or install Liberation/DejaVu fonts.",
        test,
        fonts::FONTS_DIR_ENV
    );
}

#[test]
fn flat_report_starts_with_pdf_signature() {
    let Some(bytes) = render_body(FLAT_BODY) else {
        skip("flat_report_starts_with_pdf_signature");
        return;
    };
    assert!(bytes.starts_with(PDF_SIGNATURE));
}

#[test]
fn extended_report_starts_with_pdf_signature() {
    let Some(bytes) = render_body(EXTENDED_BODY) else {
        skip("extended_report_starts_with_pdf_signature");
        return;
    };
    assert!(bytes.starts_with(PDF_SIGNATURE));
}

#[test]
fn empty_report_still_renders() {
    let Some(bytes) = render_body("[]") else {
        skip("empty_report_still_renders");
        return;
    };
    assert!(bytes.starts_with(PDF_SIGNATURE));
}

#[test]
fn multi_page_report_renders() {
    let body = long_flat_body(120);
    let Some(long) = render_body(&body) else {
        skip("multi_page_report_renders");
        return;
    };
    let short = render_body(FLAT_BODY).expect("fonts available");
    assert!(long.starts_with(PDF_SIGNATURE));
    assert!(long.len() > short.len());
}

#[test]
fn every_page_shows_its_number_and_the_final_total() {
    let body = long_flat_body(120);
    let Some(rendered) = render_detailed(&body) else {
        skip("every_page_shows_its_number_and_the_final_total");
        return;
    };

    let pages = rendered.page_count();
    assert!(pages > 1, "120 rows should span several pages, got {}", pages);
    let expected: Vec<String> = (1..=pages)
        .map(|page| format!("Page {} of {}", page, pages))
        .collect();
    assert_eq!(rendered.footers(), expected.as_slice());
}

#[test]
fn disclaimer_is_printed_on_every_page() {
    let rows: Vec<String> = (0..150)
        .map(|_| {
            r#"{"date":"2024-03-05","total_distance":1,"occupied_distance":1,"tour":1,"revenue":1}"#
                .to_owned()
        })
        .collect();
    let body = format!(
        r#"{{"records":[{}],"meta":{{"language":"de-DE","month":"März","year":"2024"}}}}"#,
        rows.join(",")
    );
    let Some(rendered) = render_detailed(&body) else {
        skip("disclaimer_is_printed_on_every_page");
        return;
    };

    assert!(rendered.page_count() > 1);
    assert!(rendered
        .footers()
        .iter()
        .all(|footer| footer.contains("02.04.2024")));
}

#[test]
fn shaded_rows_render_in_every_locale() {
    for entry in LOCALES.iter() {
        let body = format!(
            r#"{{"records":[{{"date":"2024-03-05","total_distance":120.4,"occupied_distance":80.15,"tour":3,"revenue":245.6}}],"meta":{{"language":"{}","month":"03","year":"2024"}}}}"#,
            entry.tag
        );
        let Some(rendered) = render_detailed(&body) else {
            skip("shaded_rows_render_in_every_locale");
            return;
        };
        assert!(rendered.bytes().starts_with(PDF_SIGNATURE), "{}", entry.tag);
        assert_eq!(rendered.page_count(), 1, "{}", entry.tag);
    }
}

#[test]
fn rendering_is_deterministic() {
    let Some(bytes_a) = render_body(EXTENDED_BODY) else {
        skip("rendering_is_deterministic");
        return;
    };
    let Some(bytes_b) = render_body(EXTENDED_BODY) else {
        skip("rendering_is_deterministic");
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

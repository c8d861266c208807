//! Integration tests for the lopdf-backed text source.

use std::fs;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdf_outline::error::Error;
use pdf_outline::{
    extract_outline, extract_outline_from_bytes, HeadingLevel, LopdfSource, PageTextSource,
    SourceOptions,
};

/// Text placed at `(x, y)` in PDF user space with a font resource name.
struct Placed<'a> {
    font: &'a str,
    size: i64,
    x: i64,
    y: i64,
    text: &'a str,
}

fn text_ops(items: &[Placed<'_>]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for item in items {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![item.font.into(), item.size.into()]));
        ops.push(Operation::new("Td", vec![item.x.into(), item.y.into()]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(item.text)]));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Build a PDF with one page per entry; an empty entry yields a blank page.
fn build_pdf(pages: &[Vec<Placed<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for items in pages {
        let page_id = if items.is_empty() {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            })
        } else {
            let content = Content {
                operations: text_ops(items),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })
        };
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn report_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![
            Placed { font: "F1", size: 24, x: 72, y: 760, text: "Quarterly Planning Notes" },
            Placed { font: "F2", size: 12, x: 72, y: 700, text: "1. Introduction" },
            Placed { font: "F1", size: 11, x: 72, y: 660, text: "Body text for the report" },
        ],
        vec![],
        vec![Placed { font: "F1", size: 12, x: 72, y: 760, text: "1.1 Background" }],
    ])
}

#[test]
fn test_load_reads_pages_and_fragments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    fs::write(&path, report_pdf()).unwrap();

    let doc = LopdfSource::new().load(&path).unwrap();
    assert_eq!(doc.info.page_count, 3);
    assert_eq!(doc.pages.len(), 3);

    let first = &doc.pages[0];
    assert_eq!(first.number, 1);
    assert_eq!(first.width, 595.0);
    assert_eq!(first.height, 842.0);
    assert_eq!(first.fragments.len(), 3);

    let heading = &first.fragments[1];
    assert_eq!(heading.text, "1. Introduction");
    assert_eq!(heading.size, 12.0);
    assert_eq!(heading.font, "Helvetica-Bold");
    assert!(heading.bold);
    assert!(!first.fragments[0].bold);

    // Top-down coordinates: earlier text sits higher on the page.
    assert!(first.fragments[0].bbox.y0 < heading.bbox.y0);

    assert!(doc.pages[1].fragments.is_empty());
}

#[test]
fn test_extract_outline_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    fs::write(&path, report_pdf()).unwrap();

    let result = extract_outline(&path).unwrap();
    assert_eq!(result.title, "Quarterly Planning Notes ");

    let outline: Vec<(HeadingLevel, &str, u32)> = result
        .outline
        .iter()
        .map(|h| (h.level, h.text.trim_end(), h.page))
        .collect();
    assert_eq!(
        outline,
        vec![
            (HeadingLevel::H1, "1. Introduction", 0),
            (HeadingLevel::H2, "1.1 Background", 2)
        ]
    );
}

#[test]
fn test_extract_outline_from_bytes() {
    let result = extract_outline_from_bytes(&report_pdf()).unwrap();
    assert_eq!(result.heading_count(), 2);
}

#[test]
fn test_blank_document_is_empty() {
    let bytes = build_pdf(&[vec![]]);
    let result = extract_outline_from_bytes(&bytes).unwrap();
    assert_eq!(result.title, "Empty Document");
    assert!(result.outline.is_empty());
}

#[test]
fn test_non_pdf_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.pdf");
    fs::write(&path, "just some text, not a pdf").unwrap();

    let err = LopdfSource::with_options(SourceOptions::new().lenient())
        .load(&path)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownFormat));
}

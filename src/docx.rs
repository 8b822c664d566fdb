//! Docx packaging: write assembled paragraphs as a Word document.
//!
//! A .docx file is a ZIP archive of Open XML parts; the main content lives
//! in `word/document.xml`. This writer emits the minimal package a word
//! processor needs (content types, the package relationship, and the
//! document part) with one `<w:p>` per paragraph. Right-to-left paragraphs
//! carry `<w:bidi/>` plus right justification, matching how word processors
//! represent Arabic-script text; everything else is justified left.
//!
//! No styling, headings, or tables: the output is deliberately plain
//! editable text.

use crate::error::ScanDocxError;
use crate::output::{Direction, Paragraph};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// Package paragraphs into docx bytes.
///
/// An empty paragraph list produces a valid document with an empty body.
pub fn write_docx(paragraphs: &[Paragraph]) -> Result<Vec<u8>, ScanDocxError> {
    let document_xml = write_document_xml(paragraphs)?;

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/document.xml", document_xml.as_slice()),
    ] {
        archive
            .start_file(name, options)
            .map_err(|e| ScanDocxError::DocxWrite {
                detail: format!("{name}: {e}"),
            })?;
        archive
            .write_all(content)
            .map_err(|e| ScanDocxError::DocxWrite {
                detail: format!("{name}: {e}"),
            })?;
    }

    let cursor = archive.finish().map_err(|e| ScanDocxError::DocxWrite {
        detail: e.to_string(),
    })?;
    Ok(cursor.into_inner())
}

fn xml_err(e: impl std::fmt::Display) -> ScanDocxError {
    ScanDocxError::DocxWrite {
        detail: e.to_string(),
    }
}

/// Emit `word/document.xml` for the given paragraphs.
fn write_document_xml(paragraphs: &[Paragraph]) -> Result<Vec<u8>, ScanDocxError> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)?;

    let mut document = BytesStart::new("w:document");
    document.push_attribute(("xmlns:w", WORDPROCESSING_NS));
    writer.write_event(Event::Start(document)).map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("w:body")))
        .map_err(xml_err)?;

    for paragraph in paragraphs {
        writer
            .write_event(Event::Start(BytesStart::new("w:p")))
            .map_err(xml_err)?;

        writer
            .write_event(Event::Start(BytesStart::new("w:pPr")))
            .map_err(xml_err)?;
        if paragraph.direction == Direction::Rtl {
            writer
                .write_event(Event::Empty(BytesStart::new("w:bidi")))
                .map_err(xml_err)?;
        }
        let mut jc = BytesStart::new("w:jc");
        jc.push_attribute((
            "w:val",
            match paragraph.direction {
                Direction::Rtl => "right",
                Direction::Ltr => "left",
            },
        ));
        writer.write_event(Event::Empty(jc)).map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("w:pPr")))
            .map_err(xml_err)?;

        writer
            .write_event(Event::Start(BytesStart::new("w:r")))
            .map_err(xml_err)?;
        let mut text = BytesStart::new("w:t");
        text.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(text)).map_err(xml_err)?;
        writer
            .write_event(Event::Text(BytesText::new(&paragraph.text)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("w:t")))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("w:r")))
            .map_err(xml_err)?;

        writer
            .write_event(Event::End(BytesEnd::new("w:p")))
            .map_err(xml_err)?;
    }

    // A body must end with section properties to be well-formed for Word.
    writer
        .write_event(Event::Empty(BytesStart::new("w:sectPr")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("w:body")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("w:document")))
        .map_err(xml_err)?;

    Ok(writer.into_inner())
}

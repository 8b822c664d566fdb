//! Shared helpers for the integration suites: minimal PDF generation and
//! stub implementations of the external tools.
//!
//! The stubs let the pipeline's sequencing and cleanup invariants run in CI
//! without poppler or tesseract installed: each is a small shell script the
//! config's tool-path overrides point at.

#![allow(dead_code)] // each test binary uses a subset of these helpers

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

/// Build a valid PDF with `page_count` pages, each carrying one line of
/// Courier text naming its page number.
pub fn minimal_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for page in 1..=page_count {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 48.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("Page {page}"))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialise test PDF");
    bytes
}

/// Write an executable stub script into `dir` and return its path.
#[cfg(unix)]
pub fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, script).expect("write stub script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("mark stub executable");
    path
}

/// A pdftoppm stand-in: writes `<prefix>.png` for whatever page it is asked
/// to render. argv is `-f N -l N -png -r DPI -singlefile <input> <prefix>`,
/// so `$2` is the page number and the last argument is the prefix.
pub fn stub_pdftoppm() -> String {
    "#!/bin/sh\n\
     for last; do :; done\n\
     echo \"raster of page $2\" > \"$last.png\"\n"
        .to_string()
}

/// A pdftoppm stand-in that fails when asked for `fail_page`.
pub fn stub_pdftoppm_failing_on(fail_page: usize) -> String {
    format!(
        "#!/bin/sh\n\
         if [ \"$2\" = \"{fail_page}\" ]; then echo 'render error' >&2; exit 1; fi\n\
         for last; do :; done\n\
         echo \"raster of page $2\" > \"$last.png\"\n"
    )
}

/// A tesseract stand-in: emits one deterministic line per page, including a
/// count of raster artifacts currently present in `artifact_dir` so tests
/// can assert the one-artifact-in-flight invariant at recognition time.
pub fn stub_tesseract(artifact_dir: &Path) -> String {
    format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then echo 'tesseract 5.3.0 stub'; exit 0; fi\n\
         page=$(basename \"$1\" .png | sed 's/.*-page//')\n\
         count=$(ls \"{dir}\"/*.png 2>/dev/null | wc -l | tr -d ' ')\n\
         echo \"page $page sees $count artifact\" > \"$2.txt\"\n",
        dir = artifact_dir.display()
    )
}

/// A tesseract stand-in that recognises Arabic text on `arabic_page` and
/// English text everywhere else.
pub fn stub_tesseract_arabic_on(arabic_page: usize) -> String {
    format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then echo 'tesseract 5.3.0 stub'; exit 0; fi\n\
         case \"$1\" in\n\
         *page{arabic_page}.png) printf 'مرحبا بالعالم\\n' > \"$2.txt\" ;;\n\
         *) echo 'plain english text' > \"$2.txt\" ;;\n\
         esac\n"
    )
}

/// A tesseract stand-in that fails on `fail_page`.
pub fn stub_tesseract_failing_on(fail_page: usize) -> String {
    format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then echo 'tesseract 5.3.0 stub'; exit 0; fi\n\
         case \"$1\" in\n\
         *page{fail_page}.png) echo 'unreadable image' >&2; exit 1 ;;\n\
         *) echo 'plain english text' > \"$2.txt\" ;;\n\
         esac\n"
    )
}

/// Count leftover raster artifacts in a directory.
pub fn png_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "png"))
                .count()
        })
        .unwrap_or(0)
}

//! Pipeline integration tests.
//!
//! These run the full conversion against stub `pdftoppm`/`tesseract`
//! scripts (see `common`), so they exercise sequencing, accumulation order,
//! failure propagation, and artifact cleanup without any external installs.
//! Unix-only: the stubs are shell scripts.

#![cfg(unix)]

mod common;

use common::*;
use scandocx::{convert_bytes, ConversionConfig, Direction, ScanDocxError};
use std::path::Path;

/// Build a config pointing every external tool at a stub in `tool_dir`,
/// with raster artifacts placed in `artifact_dir` so tests can inspect them.
fn stub_config(tool_dir: &Path, artifact_dir: &Path) -> ConversionConfig {
    ConversionConfig::builder()
        .pdftoppm_path(tool_dir.join("pdftoppm"))
        .tesseract_path(tool_dir.join("tesseract"))
        .work_dir(artifact_dir)
        .build()
        .unwrap()
}

#[tokio::test]
async fn converts_pages_in_order_and_releases_every_artifact() {
    let tools = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    write_stub(tools.path(), "pdftoppm", &stub_pdftoppm());
    write_stub(tools.path(), "tesseract", &stub_tesseract(artifacts.path()));
    let config = stub_config(tools.path(), artifacts.path());

    let output = convert_bytes(&minimal_pdf(3), &config).await.unwrap();

    assert_eq!(output.stats.page_count, 3);
    assert_eq!(output.paragraphs.len(), 3);
    for (i, paragraph) in output.paragraphs.iter().enumerate() {
        // One paragraph per page, in page order, and at the moment each
        // page was recognised, exactly one raster artifact existed.
        assert_eq!(
            paragraph.text,
            format!("page {} sees 1 artifact", i + 1),
            "paragraph {i} out of order or invariant broken"
        );
    }

    // No artifact survives the conversion.
    assert_eq!(png_count(artifacts.path()), 0);
    assert!(!output.docx.is_empty());
}

#[tokio::test]
async fn zero_page_document_is_rejected_before_any_tool_runs() {
    let tools = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    // Stubs that would leave evidence if they ever ran.
    write_stub(tools.path(), "pdftoppm", &stub_pdftoppm());
    write_stub(tools.path(), "tesseract", &stub_tesseract(artifacts.path()));
    let config = stub_config(tools.path(), artifacts.path());

    let result = convert_bytes(&minimal_pdf(0), &config).await;

    assert!(matches!(result, Err(ScanDocxError::EmptyDocument)));
    assert_eq!(png_count(artifacts.path()), 0);
    // The artifact directory is only created once the pipeline starts, so
    // rejection up front leaves it untouched as well.
    assert!(std::fs::read_dir(artifacts.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn rasterization_failure_aborts_and_leaves_no_artifacts() {
    let tools = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    write_stub(tools.path(), "pdftoppm", &stub_pdftoppm_failing_on(2));
    write_stub(tools.path(), "tesseract", &stub_tesseract(artifacts.path()));
    let config = stub_config(tools.path(), artifacts.path());

    let result = convert_bytes(&minimal_pdf(3), &config).await;

    match result {
        Err(ScanDocxError::RasterizationFailed { page, stderr, .. }) => {
            assert_eq!(page, 2);
            assert!(stderr.contains("render error"), "stderr: {stderr}");
        }
        other => panic!("expected RasterizationFailed, got {other:?}"),
    }
    // Page 1's artifact was already released; page 2 never produced one;
    // page 3 was never attempted.
    assert_eq!(png_count(artifacts.path()), 0);
}

#[tokio::test]
async fn recognition_failure_aborts_and_leaves_no_artifacts() {
    let tools = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    write_stub(tools.path(), "pdftoppm", &stub_pdftoppm());
    write_stub(
        tools.path(),
        "tesseract",
        &stub_tesseract_failing_on(2),
    );
    let config = stub_config(tools.path(), artifacts.path());

    let result = convert_bytes(&minimal_pdf(3), &config).await;

    match result {
        Err(ScanDocxError::RecognitionFailed { page, detail }) => {
            assert_eq!(page, 2);
            assert!(detail.contains("unreadable image"), "detail: {detail}");
        }
        other => panic!("expected RecognitionFailed, got {other:?}"),
    }
    // Page 2's artifact must have been released even though its recognition
    // failed and aborted the request.
    assert_eq!(png_count(artifacts.path()), 0);
}

#[tokio::test]
async fn missing_rasterizer_is_a_launch_failure() {
    let tools = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    // tesseract exists, pdftoppm does not.
    write_stub(tools.path(), "tesseract", &stub_tesseract(artifacts.path()));
    let config = stub_config(tools.path(), artifacts.path());

    let result = convert_bytes(&minimal_pdf(1), &config).await;
    assert!(matches!(
        result,
        Err(ScanDocxError::RasterizerLaunchFailed { .. })
    ));
    assert_eq!(png_count(artifacts.path()), 0);
}

#[tokio::test]
async fn mixed_script_pages_keep_direction_per_page() {
    let tools = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    write_stub(tools.path(), "pdftoppm", &stub_pdftoppm());
    write_stub(tools.path(), "tesseract", &stub_tesseract_arabic_on(2));
    let config = stub_config(tools.path(), artifacts.path());

    let output = convert_bytes(&minimal_pdf(3), &config).await.unwrap();

    let directions: Vec<Direction> = output.paragraphs.iter().map(|p| p.direction).collect();
    assert_eq!(
        directions,
        [Direction::Ltr, Direction::Rtl, Direction::Ltr]
    );
}

#[tokio::test]
async fn repeated_conversion_is_structurally_identical() {
    let tools = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    write_stub(tools.path(), "pdftoppm", &stub_pdftoppm());
    write_stub(tools.path(), "tesseract", &stub_tesseract(artifacts.path()));
    let config = stub_config(tools.path(), artifacts.path());

    let pdf = minimal_pdf(2);
    let first = convert_bytes(&pdf, &config).await.unwrap();
    let second = convert_bytes(&pdf, &config).await.unwrap();

    assert_eq!(first.paragraphs, second.paragraphs);
    assert_eq!(first.stats.page_count, second.stats.page_count);
    // Nothing leaked between the runs.
    assert_eq!(png_count(artifacts.path()), 0);
}

#[tokio::test]
async fn garbage_bytes_are_rejected_as_input() {
    let config = ConversionConfig::default();
    let result = convert_bytes(b"definitely not a pdf", &config).await;
    assert!(matches!(result, Err(ScanDocxError::NotAPdf { .. })));
}

// End-to-end: study file -> figure -> PNG/SVG export.

use forest_plot::charts::{FigureSpec, RenderError, StaticChartRenderer};
use forest_plot::data::{RiskEstimate, StudyInput, StudyLoader};
use forest_plot::stats::{NonInferiorityCalculator, Verdict};
use std::fs;

fn fonts_or_skip() -> bool {
    if StaticChartRenderer::fonts_available() {
        true
    } else {
        eprintln!("skipping: no sans-serif font available");
        false
    }
}

#[test]
fn test_study_file_drives_figure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.json");
    fs::write(
        &path,
        r#"{
            "difference": { "estimate": -0.33, "lower": -2.45, "upper": 1.79 },
            "margin": 2.0,
            "figure": { "width": 800, "height": 360 }
        }"#,
    )
    .unwrap();

    let study = StudyLoader::load_json(&path).unwrap();
    assert_eq!(study.control, StudyInput::default().control);

    let fig = FigureSpec::build(&study).unwrap();
    // min(-2.45 - 1, 0), max(1.79 + 1, 2 + 1)
    assert!((fig.difference.x_range.min + 3.45).abs() < 1e-9);
    assert!((fig.difference.x_range.max - 3.0).abs() < 1e-9);
    assert_eq!(fig.difference.reference_lines[0].x, 2.0);
    assert_eq!((fig.width, fig.height), (800, 360));

    assert_eq!(
        NonInferiorityCalculator::report(&study).verdict,
        Verdict::NonInferior
    );
}

#[test]
fn test_png_export_has_configured_size() {
    if !fonts_or_skip() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forest.png");
    let fig = FigureSpec::build(&StudyInput::default()).unwrap();

    StaticChartRenderer::render_to_file(&fig, &path).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!(img.width(), 1050);
    assert_eq!(img.height(), 450);
}

#[test]
fn test_png_bytes_decode() {
    if !fonts_or_skip() {
        return;
    }
    let fig = FigureSpec::build(&StudyInput::default()).unwrap();
    let bytes = StaticChartRenderer::render_png_bytes(&fig).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (1050, 450));

    // Same inputs, same pixels
    let again = StaticChartRenderer::render_png_bytes(&fig).unwrap();
    assert_eq!(bytes, again);
}

#[test]
fn test_svg_export_contains_labels() {
    if !fonts_or_skip() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forest.svg");
    let fig = FigureSpec::build(&StudyInput::default()).unwrap();

    StaticChartRenderer::render_to_file(&fig, &path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg") || svg.contains("<svg"));
    assert!(svg.contains("Absolute Risk Difference"));
    assert!(svg.contains("Suture"));
    assert!(svg.contains("No difference (0%)"));
}

#[test]
fn test_malformed_interval_still_renders() {
    if !fonts_or_skip() {
        return;
    }
    let mut study = StudyInput::default();
    study.treatment.risk = RiskEstimate::new(1.0, 2.5, 3.0);
    assert_eq!(StudyLoader::check(&study).len(), 1);

    let fig = FigureSpec::build(&study).unwrap();
    assert!(StaticChartRenderer::render_rgb(&fig).is_ok());
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let fig = FigureSpec::build(&StudyInput::default()).unwrap();
    let err = StaticChartRenderer::render_to_file(&fig, &dir.path().join("forest.jpg")).unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFormat(_)));
}

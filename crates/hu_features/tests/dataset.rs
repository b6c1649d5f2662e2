use std::path::{Path, PathBuf};

use hu_features::{
    build, DatasetBuilder, DatasetConfig, HeadlessReview, HuError, NoReview, SkipReason,
};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const HEADER: &str = "hu1,hu2,hu3,hu4,hu5,hu6,hu7,label";

fn write_shape(path: &Path, w: u32, h: u32) {
    let mut img = GrayImage::from_pixel(140, 140, Luma([230u8]));
    draw_filled_rect_mut(&mut img, Rect::at(35, 40).of_size(w, h), Luma([20u8]));
    img.save(path).unwrap();
}

fn write_blank(path: &Path) {
    GrayImage::from_pixel(60, 60, Luma([230u8])).save(path).unwrap();
}

/// `root/<label>/<name>` for every entry, each a rectangle of a different size
fn make_tree(root: &Path, files: &[(&str, &str)]) {
    for (i, (label, name)) in files.iter().enumerate() {
        let dir = root.join(label);
        std::fs::create_dir_all(&dir).unwrap();
        write_shape(&dir.join(name), 30 + 5 * i as u32, 20 + 3 * i as u32);
    }
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn config(root: &Path, names: &[&str], max_per_label: usize) -> DatasetConfig {
    DatasetConfig {
        labels: labels(names),
        input_root: root.join("images"),
        output_csv: root.join("out").join("hu.csv"),
        max_per_label,
        ..Default::default()
    }
}

#[test]
fn test_cap_and_empty_label() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    make_tree(&input, &[("a", "one.png"), ("a", "two.png")]);
    std::fs::create_dir_all(input.join("b")).unwrap();

    let mut out = Vec::new();
    let report = build(&labels(&["a", "b"]), &input, 1, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].ends_with(",a"));
    assert_eq!(lines[1].split(',').count(), 8);

    assert_eq!(report.rows_written(), 1);
    assert_eq!(report.written, vec![input.join("a").join("one.png")]);
    assert_eq!(report.empty_labels, ["b"]);
}

#[test]
fn test_never_more_than_cap_per_label() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    make_tree(
        &input,
        &[("x", "1.png"), ("x", "2.png"), ("x", "3.png"), ("x", "4.png"), ("y", "1.png")],
    );

    let mut out = Vec::new();
    let report = build(&labels(&["x", "y"]), &input, 2, &mut out).unwrap();

    assert_eq!(report.per_label, vec![("x".to_string(), 2), ("y".to_string(), 1)]);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().filter(|l| l.ends_with(",x")).count(), 2);
    assert_eq!(text.lines().filter(|l| l.ends_with(",y")).count(), 1);
}

#[test]
fn test_rows_follow_label_then_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    make_tree(&input, &[("second", "b.png"), ("second", "a.png"), ("first", "z.png")]);

    let mut out = Vec::new();
    let report = build(&labels(&["second", "first"]), &input, 15, &mut out).unwrap();

    let expected: Vec<PathBuf> = vec![
        input.join("second").join("a.png"),
        input.join("second").join("b.png"),
        input.join("first").join("z.png"),
    ];
    assert_eq!(report.written, expected);

    let text = String::from_utf8(out).unwrap();
    let row_labels: Vec<&str> = text.lines().skip(1).map(|l| l.rsplit(',').next().unwrap()).collect();
    assert_eq!(row_labels, ["second", "second", "first"]);
}

#[test]
fn test_unreadable_and_shapeless_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    make_tree(&input, &[("a", "good.png")]);
    std::fs::write(input.join("a").join("notes.txt"), b"not an image").unwrap();
    write_blank(&input.join("a").join("blank.png"));

    let mut out = Vec::new();
    let report = build(&labels(&["a"]), &input, 15, &mut out).unwrap();

    assert_eq!(report.rows_written(), 1);
    let reasons: Vec<(String, SkipReason)> = report
        .skipped
        .iter()
        .map(|s| (s.path.file_name().unwrap().to_string_lossy().into_owned(), s.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("blank.png".to_string(), SkipReason::NoShape),
            ("notes.txt".to_string(), SkipReason::Unreadable),
        ]
    );
}

#[test]
fn test_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    make_tree(
        &dir.path().join("images"),
        &[("a", "1.png"), ("a", "2.png"), ("b", "1.png")],
    );

    let builder = DatasetBuilder::new(config(dir.path(), &["a", "b"], 15)).unwrap();
    let first_report = builder.build(&mut NoReview).unwrap();
    let first = std::fs::read(dir.path().join("out").join("hu.csv")).unwrap();
    builder.build(&mut NoReview).unwrap();
    let second = std::fs::read(dir.path().join("out").join("hu.csv")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_report.output, Some(dir.path().join("out").join("hu.csv")));
    assert_eq!(String::from_utf8(first).unwrap().lines().count(), 4);
}

#[test]
fn test_headless_run_saves_annotated_images() {
    let dir = tempfile::tempdir().unwrap();
    make_tree(&dir.path().join("images"), &[("apple", "logo.png")]);

    let mut config = config(dir.path(), &["apple"], 15);
    config.headless_save = true;
    let report = DatasetBuilder::new(config).unwrap().run().unwrap();

    assert_eq!(report.rows_written(), 1);
    assert!(dir.path().join("out").join("contours").join("apple__logo.png").is_file());
}

#[test]
fn test_review_failure_keeps_row() {
    let dir = tempfile::tempdir().unwrap();
    make_tree(&dir.path().join("images"), &[("apple", "logo.png")]);

    // Target directory does not exist, so saving fails.
    let mut review = HeadlessReview::new(dir.path().join("missing"));
    let builder = DatasetBuilder::new(config(dir.path(), &["apple"], 15)).unwrap();
    let report = builder.build(&mut review).unwrap();
    assert_eq!(report.rows_written(), 1);
}

#[test]
fn test_unopenable_sink_aborts() {
    let dir = tempfile::tempdir().unwrap();
    make_tree(&dir.path().join("images"), &[("a", "1.png")]);

    let mut config = config(dir.path(), &["a"], 15);
    config.output_csv = dir.path().join("images");
    let err = DatasetBuilder::new(config).unwrap().build(&mut NoReview).unwrap_err();
    assert!(matches!(err, HuError::SinkOpen { .. }));
}

#[test]
fn test_images_decoded_by_content() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    let label_dir = input.join("a");
    std::fs::create_dir_all(&label_dir).unwrap();

    let good = label_dir.join("good.png");
    write_shape(&good, 40, 30);
    std::fs::copy(&good, label_dir.join("logo_noext")).unwrap();
    std::fs::copy(&good, label_dir.join("mislabeled.jpg")).unwrap();

    let mut out = Vec::new();
    let report = build(&labels(&["a"]), &input, 15, &mut out).unwrap();

    assert!(report.skipped.is_empty(), "{:?}", report.skipped);
    assert_eq!(report.rows_written(), 3);
    let text = String::from_utf8(out).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| *row == rows[0]));
}

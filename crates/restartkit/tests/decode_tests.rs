//! End-to-end tests against real files on disk.

#![allow(clippy::float_cmp)]

use std::fs;
use std::path::PathBuf;

use restartkit::{
    read_restart_file, read_restart_file_with, RestartError, SamplerMethod, ScalarField,
};

/// Render a restart file body for `records`, where each record is
/// (scalars, mean vector, lower-triangular rows).
fn render(records: &[(Vec<f64>, Vec<f64>, Vec<Vec<f64>>)]) -> String {
    let mut text = String::new();
    for (scalars, mean_vec, triangle) in records {
        for (field, value) in [
            "meanAcceptanceRateSinceStart",
            "sampleSize",
            "logSqrtDeterminant",
            "adaptiveScaleFactorSquared",
        ]
        .iter()
        .zip(scalars)
        {
            text.push_str(field);
            text.push('\n');
            text.push_str(&value.to_string());
            text.push('\n');
        }
        text.push_str("meanVec\n");
        for value in mean_vec {
            text.push_str(&value.to_string());
            text.push('\n');
        }
        text.push_str("covMat\n");
        for row in triangle {
            for value in row {
                text.push_str(&value.to_string());
                text.push('\n');
            }
        }
    }
    text
}

fn scenario_a() -> Vec<(Vec<f64>, Vec<f64>, Vec<Vec<f64>>)> {
    vec![(
        vec![0.5, 100.0, -1.2, 0.9],
        vec![1.0, 2.0],
        vec![vec![4.0], vec![1.0, 9.0]],
    )]
}

fn write_fixture(name: &str, text: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    (dir, path)
}

#[test]
fn reads_scenario_a_from_disk() {
    let (_dir, path) = write_fixture("pd_restart.txt", &render(&scenario_a()));
    let contents = read_restart_file(&path).unwrap();

    assert_eq!(contents.dimensionality, 2);
    assert_eq!(contents.snapshot_count(), 1);
    let snap = &contents.snapshots[0];
    assert_eq!(snap.cov_mat.row(0), &[4.0, 1.0]);
    assert_eq!(snap.cov_mat.row(1), &[1.0, 9.0]);
    assert_eq!(snap.cor_mat.get(0, 1), 1.0 / 6.0);
    assert_eq!(
        contents.scalar_table.column(ScalarField::SampleSize),
        &[100.0]
    );
}

#[test]
fn missing_file_is_file_not_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = read_restart_file(dir.path().join("absent_restart.txt")).unwrap_err();
    assert!(matches!(err, RestartError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn corrupt_file_error_names_the_path_and_method() {
    let (_dir, path) = write_fixture("bad_restart.txt", "this is not a restart file\n");
    let err = read_restart_file(&path).unwrap_err();

    match &err {
        RestartError::CorruptFile {
            path: reported,
            method,
            ..
        } => {
            assert_eq!(reported, &path);
            assert_eq!(method, "ParaDRAM");
        }
        other => panic!("expected CorruptFile, got {other:?}"),
    }
    let rendered = err.to_string();
    assert!(rendered.contains("bad_restart.txt"));
    assert!(rendered.contains("does not match a ParaDRAM restart file"));
}

#[test]
fn truncated_file_is_reported_corrupt() {
    let mut records = scenario_a();
    records.push(records[0].clone());
    let text = render(&records);
    // Drop the last record's final triangle line.
    let truncated: Vec<&str> = text.lines().collect();
    let truncated = truncated[..truncated.len() - 1].join("\n");

    let (_dir, path) = write_fixture("short_restart.txt", &truncated);
    let err = read_restart_file(&path).unwrap_err();
    assert!(err.is_corruption());
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn unsupported_method_is_surfaced_before_reading_lines() {
    let (_dir, path) = write_fixture("nest_restart.txt", &render(&scenario_a()));
    let err = read_restart_file_with(&path, SamplerMethod::ParaNest).unwrap_err();
    assert!(matches!(err, RestartError::UnsupportedMethod { .. }));
}

#[test]
fn crlf_files_decode_like_unix_files() {
    let unix_text = render(&scenario_a());
    let (_dir_a, unix_path) = write_fixture("unix_restart.txt", &unix_text);
    let (_dir_b, dos_path) =
        write_fixture("dos_restart.txt", &unix_text.replace('\n', "\r\n"));

    assert_eq!(
        read_restart_file(&unix_path).unwrap(),
        read_restart_file(&dos_path).unwrap()
    );
}

#[test]
fn contents_serialize_with_file_vocabulary() {
    let (_dir, path) = write_fixture("pd_restart.txt", &render(&scenario_a()));
    let contents = read_restart_file(&path).unwrap();
    let json = serde_json::to_value(&contents).unwrap();

    assert_eq!(json["dimensionality"], 2);
    assert_eq!(json["snapshots"][0]["covMat"][1][0], 1.0);
    assert_eq!(
        json["scalarTable"]["meanAcceptanceRateSinceStart"][0],
        0.5
    );
}

#[test]
fn degenerate_covariance_file_fails_typed() {
    let records = vec![(
        vec![0.5, 10.0, -1.0, 0.8],
        vec![3.0],
        vec![vec![0.0]],
    )];
    let (_dir, path) = write_fixture("flat_restart.txt", &render(&records));
    let err = read_restart_file(&path).unwrap_err();
    assert!(matches!(
        err,
        RestartError::DegenerateCovariance { index: 0, .. }
    ));
}

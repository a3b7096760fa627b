//! End-to-end tests for the preparation pipeline.

use std::path::PathBuf;

use vf_cli::pipeline::prepare;

const HEADER: &str =
    "subject_id,eye,exam_date,birth_date,test_pattern,pdf_filename,source_filename\n";

fn fixture(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("cohort.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn prepares_the_documented_scenario() {
    // Two 24-2 left-eye tests for S1 and one 30-2 test that must not
    // appear in the output.
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(
        &dir,
        &format!(
            "{HEADER}S1,L,2020-01-01,2000-01-01,24-2,p1.pdf,s1.opv\n\
             S1,L,2021-01-01,2000-01-01,24-2,p2.pdf,s2.opv\n\
             S1,R,2020-06-01,2000-01-01,30-2,p3.pdf,s3.opv\n"
        ),
    );
    let output = dir.path().join("prepared.csv");

    let result = prepare(&input, &output, "24-2").unwrap();

    assert_eq!(result.rows_read, 3);
    assert_eq!(result.rows_skipped, 0);
    assert_eq!(result.rows_matched, 2);
    assert_eq!(result.group_count, 1);
    assert_eq!(result.largest_group, 2);

    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "subject_id,eye,age,birth_date,exam_date,pdf_filename,source_filename,\
         visual_field_count,visual_field_number"
    );
    assert_eq!(
        lines[1],
        "S1,L,20.0,2000-01-01,2020-01-01,p1.pdf,s1.opv,2,1"
    );
    assert!(lines[2].starts_with("S1,L,"));
    assert!(lines[2].ends_with(",2021-01-01,p2.pdf,s2.opv,2,2"));
    assert!(!contents.contains("p3.pdf"));
}

#[test]
fn rerun_produces_byte_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(
        &dir,
        &format!(
            "{HEADER}S2,lefteye,2020-01-01,1955-04-10,24-2,a.pdf,a.opv\n\
             S1,lefteye,2020-01-01,1960-02-29,24-2,b.pdf,b.opv\n\
             S1,lefteye,2020-01-01,1960-02-29,24-2,c.pdf,c.opv\n"
        ),
    );
    let output = dir.path().join("prepared.csv");

    prepare(&input, &output, "24-2").unwrap();
    let first = std::fs::read(&output).unwrap();
    prepare(&input, &output, "24-2").unwrap();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn zero_matches_writes_header_only_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(
        &dir,
        &format!("{HEADER}S1,L,2020-01-01,2000-01-01,30-2,p.pdf,s.opv\n"),
    );
    let output = dir.path().join("prepared.csv");

    let result = prepare(&input, &output, "24-2").unwrap();

    assert_eq!(result.rows_matched, 0);
    assert_eq!(result.group_count, 0);
    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

#[test]
fn skipped_rows_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(
        &dir,
        &format!(
            "{HEADER},L,2020-01-01,2000-01-01,24-2,p1.pdf,s1.opv\n\
             S1,L,2021-01-01,2000-01-01,24-2,p2.pdf,s2.opv\n"
        ),
    );
    let output = dir.path().join("prepared.csv");

    let result = prepare(&input, &output, "24-2").unwrap();

    assert_eq!(result.rows_read, 2);
    assert_eq!(result.rows_skipped, 1);
    assert_eq!(result.rows_matched, 1);
    assert_eq!(result.issues.len(), 1);
}

#[test]
fn missing_column_aborts_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(
        &dir,
        "subject_id,eye,exam_date,birth_date,pdf_filename,source_filename\n\
         S1,L,2020-01-01,2000-01-01,p.pdf,s.opv\n",
    );
    let output = dir.path().join("prepared.csv");

    assert!(prepare(&input, &output, "24-2").is_err());
    assert!(!output.exists());
}

#[test]
fn unwritable_output_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(
        &dir,
        &format!("{HEADER}S1,L,2020-01-01,2000-01-01,24-2,p.pdf,s.opv\n"),
    );
    let output = dir.path().join("missing-subdir").join("prepared.csv");

    assert!(prepare(&input, &output, "24-2").is_err());
    assert!(!output.exists());
}

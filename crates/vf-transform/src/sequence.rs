//! Per-subject/eye sequence assignment.
//!
//! Builds an explicit grouping map keyed by `(subject_id, eye)`, orders
//! each group by exam date ascending, then assigns the 1-based rank and
//! the group size to every row.

use std::collections::BTreeMap;

use tracing::debug;
use vf_model::{CohortRow, SourceRow};

use crate::age::derive_age;

/// Assign `visual_field_number` and `visual_field_count` within each
/// `(subject_id, eye)` group.
///
/// Ordering rules:
/// - within a group, rows sort by `exam_date` ascending;
/// - equal dates keep their original input order (`row_number`);
/// - rows with a missing `exam_date` sort after all dated rows, again in
///   input order, and still consume a sequence number;
/// - groups emit in `(subject_id, eye)` key order.
///
/// The result is deterministic for a given input, so repeat runs produce
/// byte-identical output.
#[must_use]
pub fn assign_sequence(rows: &[SourceRow]) -> Vec<CohortRow> {
    let mut groups: BTreeMap<(String, String), Vec<usize>> = BTreeMap::new();
    for (idx, row) in rows.iter().enumerate() {
        groups
            .entry((row.subject_id.clone(), row.eye.clone()))
            .or_default()
            .push(idx);
    }
    debug!(rows = rows.len(), groups = groups.len(), "grouping complete");

    let mut out = Vec::with_capacity(rows.len());
    for indices in groups.into_values() {
        let mut ordered = indices;
        ordered.sort_by_key(|&idx| {
            let row = &rows[idx];
            (row.exam_date.is_none(), row.exam_date, row.row_number)
        });
        let count = ordered.len();
        for (rank, &idx) in ordered.iter().enumerate() {
            let row = &rows[idx];
            out.push(CohortRow {
                subject_id: row.subject_id.clone(),
                eye: row.eye.clone(),
                age: derive_age(row.birth_date, row.exam_date),
                birth_date: row.birth_date,
                exam_date: row.exam_date,
                pdf_filename: row.pdf_filename.clone(),
                source_filename: row.source_filename.clone(),
                visual_field_count: count,
                visual_field_number: rank + 1,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn row(
        subject_id: &str,
        eye: &str,
        exam_date: Option<NaiveDate>,
        row_number: usize,
    ) -> SourceRow {
        SourceRow {
            subject_id: subject_id.to_string(),
            eye: eye.to_string(),
            exam_date,
            birth_date: date(2000, 1, 1),
            test_pattern: "24-2".to_string(),
            pdf_filename: format!("{subject_id}_{eye}_{row_number}.pdf"),
            source_filename: format!("{subject_id}_{eye}_{row_number}.opv"),
            row_number,
        }
    }

    #[test]
    fn numbers_are_contiguous_per_group() {
        let rows = vec![
            row("S1", "lefteye", date(2021, 1, 1), 1),
            row("S1", "righteye", date(2020, 1, 1), 2),
            row("S1", "lefteye", date(2019, 1, 1), 3),
            row("S2", "lefteye", date(2020, 1, 1), 4),
            row("S1", "lefteye", date(2020, 1, 1), 5),
        ];

        let out = assign_sequence(&rows);
        assert_eq!(out.len(), 5);

        let left_s1: Vec<&CohortRow> = out
            .iter()
            .filter(|r| r.group_key() == ("S1", "lefteye"))
            .collect();
        assert_eq!(left_s1.len(), 3);
        assert!(left_s1.iter().all(|r| r.visual_field_count == 3));
        let numbers: Vec<usize> = left_s1.iter().map(|r| r.visual_field_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        // Ordered by date: 2019, 2020, 2021.
        assert_eq!(left_s1[0].exam_date, date(2019, 1, 1));
        assert_eq!(left_s1[2].exam_date, date(2021, 1, 1));
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let rows = vec![
            row("S1", "lefteye", date(2020, 1, 1), 1),
            row("S1", "lefteye", date(2020, 1, 1), 2),
            row("S1", "lefteye", date(2020, 1, 1), 3),
        ];

        let out = assign_sequence(&rows);
        let pdfs: Vec<&str> = out.iter().map(|r| r.pdf_filename.as_str()).collect();
        assert_eq!(
            pdfs,
            vec!["S1_lefteye_1.pdf", "S1_lefteye_2.pdf", "S1_lefteye_3.pdf"]
        );
        let numbers: Vec<usize> = out.iter().map(|r| r.visual_field_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn missing_exam_dates_sort_last_but_still_count() {
        let rows = vec![
            row("S1", "lefteye", None, 1),
            row("S1", "lefteye", date(2020, 1, 1), 2),
            row("S1", "lefteye", None, 3),
        ];

        let out = assign_sequence(&rows);
        assert!(out.iter().all(|r| r.visual_field_count == 3));
        assert_eq!(out[0].exam_date, date(2020, 1, 1));
        assert_eq!(out[0].visual_field_number, 1);
        // Undated rows follow in input order.
        assert_eq!(out[1].pdf_filename, "S1_lefteye_1.pdf");
        assert_eq!(out[1].visual_field_number, 2);
        assert_eq!(out[2].pdf_filename, "S1_lefteye_3.pdf");
        assert_eq!(out[2].visual_field_number, 3);
    }

    #[test]
    fn singleton_group_gets_one_of_one() {
        let out = assign_sequence(&[row("S9", "righteye", date(2022, 3, 4), 1)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].visual_field_count, 1);
        assert_eq!(out[0].visual_field_number, 1);
    }

    #[test]
    fn groups_emit_in_key_order() {
        let rows = vec![
            row("S2", "lefteye", date(2020, 1, 1), 1),
            row("S1", "righteye", date(2020, 1, 1), 2),
            row("S1", "lefteye", date(2020, 1, 1), 3),
        ];

        let out = assign_sequence(&rows);
        let keys: Vec<(String, String)> = out
            .iter()
            .map(|r| (r.subject_id.clone(), r.eye.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("S1".to_string(), "lefteye".to_string()),
                ("S1".to_string(), "righteye".to_string()),
                ("S2".to_string(), "lefteye".to_string()),
            ]
        );
    }
}

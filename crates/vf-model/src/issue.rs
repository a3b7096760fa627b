//! Row-level data issues recorded during ingestion.
//!
//! Issues never abort a run. Rows missing a grouping key are skipped;
//! unparseable dates propagate as nulls. Both are reported so the run
//! summary can account for every source row.

use std::fmt;

/// What went wrong on a single source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The subject identifier cell was empty; the row was skipped.
    MissingSubjectId,
    /// The eye cell was empty; the row was skipped.
    MissingEye,
    /// A date cell was empty or unparseable; the value became null.
    BadDate {
        /// Column the value came from.
        column: &'static str,
        /// Raw cell content ("" when the cell was empty).
        value: String,
    },
}

impl IssueKind {
    /// True when the issue caused the whole row to be dropped.
    #[must_use]
    pub fn skips_row(&self) -> bool {
        matches!(self, IssueKind::MissingSubjectId | IssueKind::MissingEye)
    }
}

/// A single issue tied to its source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based row number in the source file (excluding the header).
    pub row_number: usize,
    pub kind: IssueKind,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::MissingSubjectId => {
                write!(f, "row {}: missing subject_id, row skipped", self.row_number)
            }
            IssueKind::MissingEye => {
                write!(f, "row {}: missing eye, row skipped", self.row_number)
            }
            IssueKind::BadDate { column, value } => {
                if value.is_empty() {
                    write!(f, "row {}: empty {column}", self.row_number)
                } else {
                    write!(f, "row {}: unparseable {column} {value:?}", self.row_number)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_issues_skip_the_row() {
        assert!(IssueKind::MissingSubjectId.skips_row());
        assert!(IssueKind::MissingEye.skips_row());
        assert!(
            !IssueKind::BadDate {
                column: "exam_date",
                value: "not-a-date".to_string(),
            }
            .skips_row()
        );
    }

    #[test]
    fn display_names_the_row_and_column() {
        let issue = RowIssue {
            row_number: 7,
            kind: IssueKind::BadDate {
                column: "birth_date",
                value: "19XX".to_string(),
            },
        };
        assert_eq!(issue.to_string(), "row 7: unparseable birth_date \"19XX\"");
    }
}

//! Sequence well-formedness checks
//!
//! Detection and planning run on sequences that are often half-built while a
//! user edits them. Rather than failing, both consult [`Validator`] first:
//! error-severity issues make the sequence "malformed" and the caller gets a
//! not-circular / not-extendable result with the issue as its reason.

use serde::Serialize;

use crate::models::{Beat, GridPosition, Sequence};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Type of validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Sequence has no motion beats
    EmptySequence,
    /// Neither the pseudo-beat nor the first beat records a start position
    MissingStartPosition,
    /// A beat has no start or end position
    MissingPosition,
    /// A beat does not start where the previous one ended
    BrokenContinuity,
    /// Beat indices are not 1, 2, 3, ...
    IndexGap,
    /// Motion locations disagree with the beat's grid position
    LocationMismatch,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::EmptySequence => write!(f, "empty_sequence"),
            IssueType::MissingStartPosition => write!(f, "missing_start_position"),
            IssueType::MissingPosition => write!(f, "missing_position"),
            IssueType::BrokenContinuity => write!(f, "broken_continuity"),
            IssueType::IndexGap => write!(f, "index_gap"),
            IssueType::LocationMismatch => write!(f, "location_mismatch"),
        }
    }
}

/// A validation issue found in a sequence
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// Beat index the issue refers to (0 for the sequence as a whole)
    pub beat: usize,
    pub severity: Severity,
    pub issue_type: IssueType,
    /// Human-readable message describing the issue
    pub message: String,
    /// Optional suggestion for fixing the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new error
    pub fn error(beat: usize, issue_type: IssueType, message: impl Into<String>) -> Self {
        Self { beat, severity: Severity::Error, issue_type, message: message.into(), suggestion: None }
    }

    /// Create a new warning
    pub fn warning(beat: usize, issue_type: IssueType, message: impl Into<String>) -> Self {
        Self {
            beat,
            severity: Severity::Warning,
            issue_type,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion to this issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] beat {}: {}", self.severity, self.issue_type, self.beat, self.message)
    }
}

/// Validator for beat sequences
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Check a whole sequence, appending any issues found
    pub fn validate_sequence(&mut self, sequence: &Sequence) {
        if sequence.start().is_none() {
            self.issues.push(
                ValidationIssue::error(0, IssueType::MissingStartPosition, "sequence has no start position")
                    .with_suggestion("add a start-position beat with index 0"),
            );
        }

        if sequence.is_empty() {
            self.issues.push(ValidationIssue::error(0, IssueType::EmptySequence, "sequence has no beats"));
            return;
        }

        let mut previous_end: Option<GridPosition> = sequence.start();
        for (i, beat) in sequence.beats.iter().enumerate() {
            if beat.index != i + 1 {
                self.issues.push(ValidationIssue::warning(
                    beat.index,
                    IssueType::IndexGap,
                    format!("expected beat index {}, found {}", i + 1, beat.index),
                ));
            }
            self.validate_beat(beat, previous_end);
            previous_end = beat.end_position;
        }
    }

    fn validate_beat(&mut self, beat: &Beat, previous_end: Option<GridPosition>) {
        let (Some(start), Some(end)) = (beat.start_position, beat.end_position) else {
            let missing = if beat.start_position.is_none() { "start" } else { "end" };
            self.issues.push(ValidationIssue::error(
                beat.index,
                IssueType::MissingPosition,
                format!("beat has no {} position", missing),
            ));
            return;
        };

        if let Some(prev) = previous_end {
            if prev != start {
                self.issues.push(
                    ValidationIssue::warning(
                        beat.index,
                        IssueType::BrokenContinuity,
                        format!("beat starts at {} but the previous beat ended at {}", start, prev),
                    )
                    .with_suggestion(format!("start the beat at {}", prev)),
                );
            }
        }

        let (blue_start, red_start) = start.hand_locations();
        let (blue_end, red_end) = end.hand_locations();
        let m = &beat.motions;
        if (m.blue.start_location, m.red.start_location) != (blue_start, red_start)
            || (m.blue.end_location, m.red.end_location) != (blue_end, red_end)
        {
            self.issues.push(ValidationIssue::warning(
                beat.index,
                IssueType::LocationMismatch,
                format!("hand locations do not match positions {} -> {}", start, end),
            ));
        }
    }

    /// Get all collected issues
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Consume the validator and return all issues
    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| matches!(i.severity, Severity::Error))
    }

    /// Count errors
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| matches!(i.severity, Severity::Error)).count()
    }

    /// Count warnings
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| matches!(i.severity, Severity::Warning)).count()
    }

    /// First error message, if any
    pub fn first_error(&self) -> Option<&ValidationIssue> {
        self.issues.iter().find(|i| matches!(i.severity, Severity::Error))
    }
}

/// Validate a sequence in one call
pub fn validate_sequence(sequence: &Sequence) -> Vec<ValidationIssue> {
    let mut validator = Validator::new();
    validator.validate_sequence(sequence);
    validator.into_issues()
}

/// Reason a sequence is malformed, or `None` when it has no errors
pub fn malformed_reason(sequence: &Sequence) -> Option<String> {
    let mut validator = Validator::new();
    validator.validate_sequence(sequence);
    validator.first_error().map(|issue| format!("malformed sequence: {}", issue.message))
}

/// Edit distance above which no suggestion is made.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Closest known name to `unknown`, if any is within a few edits.
///
/// Ties go to the name listed first.
pub fn suggest_name(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|name| (edit_distance(unknown, name), *name))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name.to_string())
}

/// Levenshtein distance over chars, keeping a single previous row.
fn edit_distance(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=target.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut row = Vec::with_capacity(target.len() + 1);
        row.push(i + 1);
        for (j, cb) in target.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != *cb);
            row.push(substitute.min(prev[j + 1] + 1).min(row[j] + 1));
        }
        prev = row;
    }

    prev[target.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MotionType;

    fn beat(index: usize, start: GridPosition, end: GridPosition) -> Beat {
        Beat::between(index, start, end, MotionType::Pro, MotionType::Pro)
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("rotated", "rotated"), 0);
        assert_eq!(edit_distance("rotatd", "rotated"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("Σ-", "Σ"), 1);
    }

    #[test]
    fn test_suggest_name() {
        let known = ["strict_rotated", "strict_swapped", "rotated_swapped"];
        assert_eq!(suggest_name("strict_rotatd", &known), Some("strict_rotated".to_string()));
        assert_eq!(suggest_name("completely_else", &known), None);
    }

    #[test]
    fn test_well_formed_sequence_has_no_issues() {
        let mut seq = Sequence::starting_at(GridPosition::Alpha1);
        seq.push(beat(0, GridPosition::Alpha1, GridPosition::Alpha3));
        seq.push(beat(0, GridPosition::Alpha3, GridPosition::Alpha5));
        assert!(validate_sequence(&seq).is_empty());
        assert_eq!(malformed_reason(&seq), None);
    }

    #[test]
    fn test_empty_sequence_is_an_error() {
        let seq = Sequence::starting_at(GridPosition::Alpha1);
        let issues = validate_sequence(&seq);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, IssueType::EmptySequence);
        assert!(malformed_reason(&seq).unwrap().contains("no beats"));
    }

    #[test]
    fn test_missing_start_position() {
        let mut seq = Sequence::default();
        seq.beats.push(Beat { start_position: None, ..beat(1, GridPosition::Beta1, GridPosition::Beta3) });
        let mut v = Validator::new();
        v.validate_sequence(&seq);
        assert!(v.has_errors());
        assert_eq!(v.issues()[0].issue_type, IssueType::MissingStartPosition);
        assert!(v.issues().iter().any(|i| i.issue_type == IssueType::MissingPosition));
    }

    #[test]
    fn test_broken_continuity_is_a_warning() {
        let mut seq = Sequence::starting_at(GridPosition::Alpha1);
        seq.push(beat(0, GridPosition::Alpha1, GridPosition::Alpha3));
        seq.push(beat(0, GridPosition::Alpha5, GridPosition::Alpha7));
        let mut v = Validator::new();
        v.validate_sequence(&seq);
        assert!(!v.has_errors());
        assert_eq!(v.warning_count(), 1);
        assert_eq!(v.issues()[0].issue_type, IssueType::BrokenContinuity);
        assert_eq!(v.issues()[0].suggestion.as_deref(), Some("start the beat at alpha3"));
    }

    #[test]
    fn test_index_gap_and_location_mismatch() {
        let mut seq = Sequence::starting_at(GridPosition::Alpha1);
        let mut b = beat(7, GridPosition::Alpha1, GridPosition::Alpha3);
        b.motions.red.end_location = crate::models::GridLocation::North;
        seq.beats.push(b);
        let issues = validate_sequence(&seq);
        let types: Vec<_> = issues.iter().map(|i| i.issue_type).collect();
        assert_eq!(types, vec![IssueType::IndexGap, IssueType::LocationMismatch]);
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::error(3, IssueType::MissingPosition, "beat has no end position");
        assert_eq!(issue.to_string(), "ERROR [missing_position] beat 3: beat has no end position");
    }
}

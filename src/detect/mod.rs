//! Circularity and LOOP pattern detection.
//!
//! Classifies a complete sequence by the symmetry between its slices. The
//! pipeline runs in a fixed order and stops at the first decisive step:
//!
//! 1. Malformed input is reported as not circular.
//! 2. The last beat must end where the sequence started.
//! 3. All-static sequences and exact repeats are `static`.
//! 4. An odd beat count cannot be halved; no structured LOOP.
//! 5. Halved candidates are checked on every `(beat[i], beat[i + half])` pair.
//! 6. Lengths divisible by four are also checked quarter by quarter, which
//!    can yield a mixed-slice pattern or a more specific quartered match.
//!
//! Detection never fails: every outcome is a [`DetectionResult`], and the
//! negative ones carry a `reason`.

pub mod predicates;
pub mod quartered;

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::loops::{
    generate_loop_type, validation_sets, ComponentSet, LoopComponent, LoopType, SliceSize,
};
use crate::models::{Beat, GridPosition, Sequence};
use crate::transforms::RotationDirection;
use crate::validate::malformed_reason;

use predicates::{halved_candidates, holds_for_all, most_specific, Candidate};
use quartered::{analyze_quarters, QuarterPattern};

/// A detected pattern label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapLabel {
    /// The second half repeats the first exactly, or nothing moves.
    Static,
    Rotated,
    Swapped,
    Mirrored,
    /// Reflected across the east-west axis (a mirror after a half turn).
    Flipped,
    Inverted,
    /// Rotated every quarter, swapped every half.
    MixedRotatedSwapped,
}

impl CapLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapLabel::Static => "static",
            CapLabel::Rotated => "rotated",
            CapLabel::Swapped => "swapped",
            CapLabel::Mirrored => "mirrored",
            CapLabel::Flipped => "flipped",
            CapLabel::Inverted => "inverted",
            CapLabel::MixedRotatedSwapped => "rotated(1/4)+swapped(1/2)",
        }
    }

    /// Components this label stands for.
    pub fn components(&self) -> ComponentSet {
        use LoopComponent::*;
        match self {
            CapLabel::Static => ComponentSet::EMPTY,
            CapLabel::Rotated => ComponentSet::of(&[Rotated]),
            CapLabel::Swapped => ComponentSet::of(&[Swapped]),
            CapLabel::Mirrored => ComponentSet::of(&[Mirrored]),
            CapLabel::Flipped => ComponentSet::of(&[Mirrored, Rotated]),
            CapLabel::Inverted => ComponentSet::of(&[Inverted]),
            CapLabel::MixedRotatedSwapped => ComponentSet::of(&[Rotated, Swapped]),
        }
    }
}

impl From<LoopComponent> for CapLabel {
    fn from(component: LoopComponent) -> Self {
        match component {
            LoopComponent::Rotated => CapLabel::Rotated,
            LoopComponent::Mirrored => CapLabel::Mirrored,
            LoopComponent::Swapped => CapLabel::Swapped,
            LoopComponent::Inverted => CapLabel::Inverted,
        }
    }
}

impl fmt::Display for CapLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which family of LOOPs can close a partial sequence from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircularityKind {
    /// Already back at the start.
    Same,
    /// Some LOOP type closes it at the half.
    Halved,
    /// Only a quarter-turn LOOP closes it.
    Quartered,
}

impl fmt::Display for CircularityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircularityKind::Same => write!(f, "same"),
            CircularityKind::Halved => write!(f, "halved"),
            CircularityKind::Quartered => write!(f, "quartered"),
        }
    }
}

/// Classify a single (start, end) boundary.
pub fn circularity_kind(start: GridPosition, end: GridPosition) -> Option<CircularityKind> {
    if start == end {
        return Some(CircularityKind::Same);
    }
    let sets = validation_sets();
    let reachable = |slice| LoopType::ALL.iter().any(|t| sets.is_valid(*t, slice, start, end));
    if reachable(SliceSize::Halved) {
        Some(CircularityKind::Halved)
    } else if reachable(SliceSize::Quartered) {
        Some(CircularityKind::Quartered)
    } else {
        None
    }
}

/// Outcome of detection on one sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    /// The last beat ends at the start position.
    pub circular: bool,
    /// Detected labels; empty means no structured LOOP.
    pub labels: Vec<CapLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice: Option<SliceSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<RotationDirection>,
    /// Catalogue type the labels resolve to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_type: Option<LoopType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DetectionResult {
    fn not_circular(reason: impl Into<String>) -> Self {
        Self {
            circular: false,
            labels: Vec::new(),
            slice: None,
            direction: None,
            loop_type: None,
            reason: Some(reason.into()),
        }
    }

    fn unstructured(reason: impl Into<String>) -> Self {
        Self { circular: true, ..Self::not_circular(reason) }
    }

    fn matched(labels: Vec<CapLabel>, slice: SliceSize) -> Self {
        let components: ComponentSet =
            labels.iter().flat_map(|l| l.components().iter().collect::<Vec<_>>()).collect();
        let loop_type =
            (!components.is_empty()).then(|| generate_loop_type(components).loop_type);
        Self {
            circular: true,
            labels,
            slice: Some(slice),
            direction: None,
            loop_type,
            reason: None,
        }
    }

    fn in_direction(mut self, direction: RotationDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// A structured LOOP was found.
    pub fn is_loop(&self) -> bool {
        !self.labels.is_empty()
    }
}

/// Detection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Report a mirror after a half turn as `flipped` instead of `mirrored`+`rotated`.
    pub report_flipped: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self { report_flipped: true }
    }
}

/// Pattern detector with a fixed candidate list.
#[derive(Debug, Clone)]
pub struct Detector {
    candidates: Vec<Candidate>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DetectOptions::default())
    }
}

impl Detector {
    pub fn new(options: DetectOptions) -> Self {
        Self { candidates: halved_candidates(options.report_flipped) }
    }

    /// Run the full pipeline on a sequence.
    pub fn detect(&self, sequence: &Sequence) -> DetectionResult {
        if let Some(reason) = malformed_reason(sequence) {
            return DetectionResult::not_circular(reason);
        }
        let (Some(start), Some(end)) = (sequence.start(), sequence.end()) else {
            return DetectionResult::not_circular("malformed sequence: missing start or end position");
        };
        if start != end {
            return DetectionResult::not_circular(format!(
                "not circular: ends at {}, started at {}",
                end, start
            ));
        }

        let beats = sequence.beats.as_slice();
        if beats.iter().all(Beat::is_static) {
            return DetectionResult::matched(vec![CapLabel::Static], SliceSize::Halved);
        }
        if beats.len() % 2 != 0 {
            return DetectionResult::unstructured(format!(
                "odd beat count ({}): halves cannot be compared",
                beats.len()
            ));
        }

        let half = beats.len() / 2;
        let pairs = || beats[..half].iter().zip(&beats[half..]);
        if pairs().all(|(a, b)| a.same_content(b)) {
            return DetectionResult::matched(vec![CapLabel::Static], SliceSize::Halved);
        }

        let halved = self.best_halved(beats);
        let quarters = if beats.len() % 4 == 0 { analyze_quarters(beats) } else { None };
        debug!(
            beats = beats.len(),
            halved = ?halved.as_ref().map(|c| c.components),
            quarters = ?quarters,
            "detection candidates"
        );

        resolve(quarters, halved)
    }

    /// Most specific halved candidate that holds on every pair.
    fn best_halved(&self, beats: &[Beat]) -> Option<Candidate> {
        let half = beats.len() / 2;
        let matched: Vec<Candidate> = self
            .candidates
            .iter()
            .filter(|c| holds_for_all(&c.step, beats[..half].iter().zip(&beats[half..]), true))
            .cloned()
            .collect();
        // Earliest wins among equally sized survivors.
        most_specific(matched)
            .into_iter()
            .rev()
            .max_by_key(|c| c.components.len())
    }
}

/// Detect with default options.
pub fn detect(sequence: &Sequence) -> DetectionResult {
    Detector::default().detect(sequence)
}

/// Labels only, with default options.
pub fn detect_completed_cap_types(sequence: &Sequence) -> Vec<CapLabel> {
    detect(sequence).labels
}

/// Combine the quarter analysis with the best halved candidate.
///
/// A quartered match wins unless the halved one carries more components.
fn resolve(quarters: Option<QuarterPattern>, halved: Option<Candidate>) -> DetectionResult {
    match quarters {
        Some(QuarterPattern::Mixed(direction)) => {
            DetectionResult::matched(vec![CapLabel::MixedRotatedSwapped], SliceSize::Quartered)
                .in_direction(direction)
        }
        Some(QuarterPattern::Irregular(_)) => DetectionResult::unstructured(
            "quarters rotate but swap hands on an odd number of boundaries",
        ),
        Some(pattern @ (QuarterPattern::Rotated(_) | QuarterPattern::RotatedSwapped(_))) => {
            let labels = match pattern {
                QuarterPattern::RotatedSwapped(_) => vec![CapLabel::Rotated, CapLabel::Swapped],
                _ => vec![CapLabel::Rotated],
            };
            match halved {
                Some(h) if h.components.len() > labels.len() => {
                    DetectionResult::matched(h.labels, SliceSize::Halved)
                }
                _ => DetectionResult::matched(labels, SliceSize::Quartered)
                    .in_direction(pattern.direction()),
            }
        }
        None => match halved {
            Some(h) => DetectionResult::matched(h.labels, SliceSize::Halved),
            None => DetectionResult::unstructured("no structured LOOP detected"),
        },
    }
}

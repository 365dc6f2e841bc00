//! Sequence extension planning.
//!
//! Given a partial sequence, works out which LOOP types can close it from
//! its current end position, and hands the chosen one to its executor.
//! The planner picks the executor and the slice size; the beat-level
//! transform is the executor's job.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::detect::{circularity_kind, CircularityKind};
use crate::loops::{format_for_display, validation_sets, LoopType, SliceSize};
use crate::models::{GridPosition, Sequence};
use crate::registry::{ExecutorRegistry, Registry};
use crate::transforms::{half_rotate, TransformError};
use crate::validate::malformed_reason;

/// Errors from [`Planner::extend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ExtendError {
    /// No slice of the LOOP type closes the sequence from its end position
    #[error("cannot extend: {reason}")]
    NotExtendable { reason: String },

    /// The LOOP type has no step at the requested slice size
    #[error("{loop_type} does not support {slice} slices")]
    UnsupportedSlice { loop_type: LoopType, slice: SliceSize },

    /// Nothing is registered to execute the LOOP type
    #[error("no executor registered for {0}")]
    MissingExecutor(LoopType),

    /// The sequence is missing data the planner needs
    #[error("{0}")]
    Malformed(String),

    /// The executor returned the wrong number of beats
    #[error("executor returned {actual} beats, expected {expected}")]
    ExecutorOutput { expected: usize, actual: usize },

    /// A beat could not be transformed
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// How a partial sequence relates to its start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionType {
    /// The end position is the start position.
    AlreadyComplete,
    /// The end closes after one halved repetition: a half turn, a
    /// reflection or a hand swap of the start.
    HalfRotation,
    /// The end is the start turned a quarter turn.
    QuarterRotation,
    NotExtendable,
}

impl ExtensionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionType::AlreadyComplete => "already_complete",
            ExtensionType::HalfRotation => "half_rotation",
            ExtensionType::QuarterRotation => "quarter_rotation",
            ExtensionType::NotExtendable => "not_extendable",
        }
    }
}

impl std::fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A LOOP type that closes the sequence, and at which slice size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionOption {
    pub loop_type: LoopType,
    pub slice: SliceSize,
    pub display_name: String,
}

/// A LOOP type that does not close the sequence, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnavailableOption {
    pub loop_type: LoopType,
    pub reason: String,
}

/// What can be appended to a partial sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionAnalysis {
    pub can_extend: bool,
    pub extension_type: ExtensionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<GridPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<GridPosition>,
    pub available_options: Vec<ExtensionOption>,
    pub unavailable_options: Vec<UnavailableOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Position a sequence must end on so that `loop_type` closes it from `start`.
///
/// Quarter turns report the clockwise end. `None` when the type cannot
/// close at that slice size.
pub fn determine_end_position(
    loop_type: LoopType,
    start: GridPosition,
    slice: SliceSize,
) -> Option<GridPosition> {
    validation_sets().required_end(loop_type, slice, start)
}

fn unavailable_reason(loop_type: LoopType, start: GridPosition) -> String {
    if loop_type == LoopType::Rewound {
        return "rewound is applied by reversing the sequence, not by a transform".to_string();
    }
    let needed: Vec<String> = loop_type
        .supported_slices()
        .iter()
        .filter_map(|slice| {
            determine_end_position(loop_type, start, *slice).map(|end| format!("{} ({})", end, slice))
        })
        .collect();
    format!("requires ending at {}", needed.join(" or "))
}

/// Classify a partial sequence and list the LOOP types that can close it.
pub fn analyze_sequence(sequence: &Sequence) -> ExtensionAnalysis {
    let malformed = malformed_reason(sequence);
    let (start, end) = match (sequence.start(), sequence.end(), malformed) {
        (Some(start), Some(end), None) => (start, end),
        (start, end, reason) => {
            let reason = reason.unwrap_or_else(|| "sequence has no start position".to_string());
            return ExtensionAnalysis {
                can_extend: false,
                extension_type: ExtensionType::NotExtendable,
                start,
                end,
                available_options: Vec::new(),
                unavailable_options: LoopType::ALL
                    .into_iter()
                    .map(|loop_type| UnavailableOption { loop_type, reason: reason.clone() })
                    .collect(),
                reason: Some(reason),
            };
        }
    };

    let sets = validation_sets();
    let mut available_options = Vec::new();
    let mut unavailable_options = Vec::new();
    for loop_type in LoopType::ALL {
        let slices: Vec<SliceSize> = loop_type
            .supported_slices()
            .iter()
            .copied()
            .filter(|slice| sets.is_valid(loop_type, *slice, start, end))
            .collect();
        if slices.is_empty() {
            unavailable_options
                .push(UnavailableOption { loop_type, reason: unavailable_reason(loop_type, start) });
        }
        for slice in slices {
            available_options.push(ExtensionOption {
                loop_type,
                slice,
                display_name: format_for_display(loop_type),
            });
        }
    }

    let extension_type = if start == end {
        ExtensionType::AlreadyComplete
    } else if available_options.iter().any(|o| o.slice == SliceSize::Quartered) {
        ExtensionType::QuarterRotation
    } else if end == half_rotate(start)
        || circularity_kind(start, end) == Some(CircularityKind::Halved)
    {
        ExtensionType::HalfRotation
    } else {
        ExtensionType::NotExtendable
    };

    let can_extend = !available_options.is_empty();
    let reason = (!can_extend).then(|| format!("no LOOP type closes {} -> {}", start, end));
    debug!(%start, %end, %extension_type, options = available_options.len(), "analyzed sequence");

    ExtensionAnalysis {
        can_extend,
        extension_type,
        start: Some(start),
        end: Some(end),
        available_options,
        unavailable_options,
        reason,
    }
}

/// Slice selection for [`Planner::extend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendOptions {
    /// Use exactly this slice size.
    pub slice: Option<SliceSize>,
    /// Slice tried first when none is forced.
    pub default_slice: SliceSize,
    /// Try quartered first whenever the type supports it.
    pub prefer_quartered: bool,
}

impl Default for ExtendOptions {
    fn default() -> Self {
        Self { slice: None, default_slice: SliceSize::Halved, prefer_quartered: true }
    }
}

impl ExtendOptions {
    fn slice_order(&self) -> [SliceSize; 2] {
        let first = if self.prefer_quartered { SliceSize::Quartered } else { self.default_slice };
        let second = match first {
            SliceSize::Halved => SliceSize::Quartered,
            SliceSize::Quartered => SliceSize::Halved,
        };
        [first, second]
    }
}

/// Extension planner: executor selection plus slice policy.
#[derive(Debug)]
pub struct Planner {
    registry: ExecutorRegistry,
    options: ExtendOptions,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(ExecutorRegistry::with_defaults(), ExtendOptions::default())
    }
}

impl Planner {
    pub fn new(registry: ExecutorRegistry, options: ExtendOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &ExecutorRegistry {
        &self.registry
    }

    /// Pick the slice size that closes `start -> end` for `loop_type`.
    pub fn choose_slice(
        &self,
        loop_type: LoopType,
        start: GridPosition,
        end: GridPosition,
    ) -> Result<SliceSize, ExtendError> {
        // Rewound is not checked against the position algebra.
        if loop_type == LoopType::Rewound {
            return Ok(self.options.slice.unwrap_or(SliceSize::Halved));
        }

        let sets = validation_sets();
        if let Some(slice) = self.options.slice {
            if !loop_type.supports(slice) {
                return Err(ExtendError::UnsupportedSlice { loop_type, slice });
            }
            if sets.is_valid(loop_type, slice, start, end) {
                return Ok(slice);
            }
            let needed = determine_end_position(loop_type, start, slice)
                .map_or_else(|| "-".to_string(), |p| p.to_string());
            return Err(ExtendError::NotExtendable {
                reason: format!(
                    "{} ({}) from {} must end at {}, sequence ends at {}",
                    loop_type, slice, start, needed, end
                ),
            });
        }

        self.options
            .slice_order()
            .into_iter()
            .find(|slice| loop_type.supports(*slice) && sets.is_valid(loop_type, *slice, start, end))
            .ok_or_else(|| ExtendError::NotExtendable {
                reason: format!(
                    "{} from {} {}, sequence ends at {}",
                    loop_type,
                    start,
                    unavailable_reason(loop_type, start),
                    end
                ),
            })
    }

    /// Close a partial sequence with `loop_type`.
    ///
    /// The sequence is not modified; the returned sequence keeps its name and
    /// start pseudo-beat and holds the executor's beats.
    pub fn extend(&self, sequence: &Sequence, loop_type: LoopType) -> Result<Sequence, ExtendError> {
        if let Some(reason) = malformed_reason(sequence) {
            return Err(ExtendError::Malformed(reason));
        }
        let (Some(start), Some(end)) = (sequence.start(), sequence.end()) else {
            return Err(ExtendError::Malformed("sequence has no start position".to_string()));
        };

        let slice = match self.choose_slice(loop_type, start, end) {
            Ok(slice) => slice,
            Err(err) => {
                warn!(%loop_type, %start, %end, error = %err, "extension rejected");
                return Err(err);
            }
        };
        let executor =
            self.registry.get(&loop_type).ok_or(ExtendError::MissingExecutor(loop_type))?;

        let beats = executor.execute(&sequence.beats, slice)?;
        let expected = sequence.beats.len() * slice.multiplier();
        if loop_type != LoopType::Rewound && beats.len() != expected {
            return Err(ExtendError::ExecutorOutput { expected, actual: beats.len() });
        }
        debug!(%loop_type, %slice, beats = beats.len(), "extended sequence");

        Ok(Sequence {
            name: sequence.name.clone(),
            start_position: sequence.start_position.clone(),
            beats,
        })
    }
}

/// Close a partial sequence with the default executors and slice policy.
pub fn generate_extension_beats(
    sequence: &Sequence,
    loop_type: LoopType,
) -> Result<Sequence, ExtendError> {
    Planner::default().extend(sequence, loop_type)
}

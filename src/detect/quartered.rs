//! Quarter-by-quarter rotation analysis.
//!
//! A sequence whose length divides by four is cut into quarters Q1..Q4 and
//! each quarter is compared with the next (Q4 wraps to Q1). A quartered LOOP
//! rotates every transition by the same quarter turn; hands may also be
//! swapped on some transitions.

use tracing::debug;

use crate::models::Beat;
use crate::transforms::{BeatTransform, RotationDirection};

use super::predicates::swap_is_meaningful;

/// How one quarter turns into the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterStep {
    /// Plain quarter turn.
    Rotated,
    /// Quarter turn with blue and red exchanged.
    RotatedSwapped,
}

/// Outcome of the quarter analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuarterPattern {
    /// Every transition is a plain quarter turn.
    Rotated(RotationDirection),
    /// Every transition is a quarter turn with a meaningful swap.
    RotatedSwapped(RotationDirection),
    /// Every transition rotates but exactly two also swap.
    Mixed(RotationDirection),
    /// The transitions rotate consistently but one or three swap.
    Irregular(RotationDirection),
}

impl QuarterPattern {
    pub fn direction(&self) -> RotationDirection {
        match self {
            QuarterPattern::Rotated(d)
            | QuarterPattern::RotatedSwapped(d)
            | QuarterPattern::Mixed(d)
            | QuarterPattern::Irregular(d) => *d,
        }
    }
}

fn quarter(beats: &[Beat], q: usize, len: usize) -> &[Beat] {
    &beats[q * len..(q + 1) * len]
}

fn step_between(from: &[Beat], to: &[Beat], direction: RotationDirection) -> Option<QuarterStep> {
    let turn = BeatTransform::rotated(direction.rotation());
    let all = |step: BeatTransform| from.iter().zip(to).all(|(a, b)| step.matches(a, b));

    if all(turn) {
        Some(QuarterStep::Rotated)
    } else if all(turn.with_swap()) {
        Some(QuarterStep::RotatedSwapped)
    } else {
        None
    }
}

/// Classify the four quarter transitions in one direction.
pub fn transitions(beats: &[Beat], direction: RotationDirection) -> Option<[QuarterStep; 4]> {
    let len = beats.len() / 4;
    let mut steps = [QuarterStep::Rotated; 4];
    for (q, slot) in steps.iter_mut().enumerate() {
        let next = (q + 1) % 4;
        *slot = step_between(quarter(beats, q, len), quarter(beats, next, len), direction)?;
    }
    Some(steps)
}

/// Name the pattern formed by four transitions found in one direction.
///
/// With `swap_visible` unset the hands share a motion type, so a fully
/// swapped cycle is judged by rotation alone.
pub fn classify(steps: &[QuarterStep; 4], direction: RotationDirection, swap_visible: bool) -> QuarterPattern {
    let swaps = steps.iter().filter(|s| **s == QuarterStep::RotatedSwapped).count();
    match swaps {
        0 => QuarterPattern::Rotated(direction),
        4 if swap_visible => QuarterPattern::RotatedSwapped(direction),
        4 => QuarterPattern::Rotated(direction),
        2 => QuarterPattern::Mixed(direction),
        _ => QuarterPattern::Irregular(direction),
    }
}

/// Analyze a sequence of `4k` beats.
///
/// Clockwise is tried before counter-clockwise; the direction must hold on
/// all four transitions. A direction that only fits through invisible swaps
/// gives way to one that fits with plain turns. Returns `None` when neither
/// direction fits or the length is not a multiple of four.
pub fn analyze_quarters(beats: &[Beat]) -> Option<QuarterPattern> {
    if beats.is_empty() || beats.len() % 4 != 0 {
        return None;
    }

    let swap_visible = beats.iter().all(swap_is_meaningful);
    let mut fallback = None;
    for direction in [RotationDirection::Cw, RotationDirection::Ccw] {
        let Some(steps) = transitions(beats, direction) else {
            continue;
        };
        debug!(?direction, ?steps, "quarter transitions");
        match classify(&steps, direction, swap_visible) {
            // Same-type alpha hands: turn plus swap reads as the opposite turn.
            pattern @ QuarterPattern::Rotated(_) if steps.contains(&QuarterStep::RotatedSwapped) => {
                fallback.get_or_insert(pattern);
            }
            pattern => return Some(pattern),
        }
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridPosition, MotionType};
    use crate::transforms::Rotation;

    fn build(first: Beat, plan: [bool; 3], direction: RotationDirection) -> Vec<Beat> {
        let turn = BeatTransform::rotated(direction.rotation());
        let mut beats = vec![first];
        for swap in plan {
            let step = if swap { turn.with_swap() } else { turn };
            let next = step.apply(beats.last().unwrap()).unwrap();
            beats.push(next);
        }
        beats
    }

    fn pro_pro() -> Beat {
        Beat::between(1, GridPosition::Alpha1, GridPosition::Alpha7, MotionType::Pro, MotionType::Pro)
    }

    fn pro_anti() -> Beat {
        Beat::between(1, GridPosition::Alpha1, GridPosition::Alpha1, MotionType::Pro, MotionType::Anti)
    }

    #[test]
    fn test_pure_clockwise_rotation() {
        let beats = build(pro_anti(), [false; 3], RotationDirection::Cw);
        assert_eq!(analyze_quarters(&beats), Some(QuarterPattern::Rotated(RotationDirection::Cw)));
    }

    #[test]
    fn test_counter_clockwise_rotation() {
        let beats = build(pro_anti(), [false; 3], RotationDirection::Ccw);
        assert_eq!(analyze_quarters(&beats), Some(QuarterPattern::Rotated(RotationDirection::Ccw)));
    }

    #[test]
    fn test_uniform_swap() {
        let beats = build(pro_anti(), [true; 3], RotationDirection::Cw);
        assert_eq!(
            analyze_quarters(&beats),
            Some(QuarterPattern::RotatedSwapped(RotationDirection::Cw))
        );
    }

    #[test]
    fn test_mixed_swap() {
        // Q1 -> Q2 plain, Q2 -> Q3 swapped, Q3 -> Q4 swapped, Q4 -> Q1 plain.
        let beats = build(pro_anti(), [false, true, true], RotationDirection::Cw);
        assert_eq!(analyze_quarters(&beats), Some(QuarterPattern::Mixed(RotationDirection::Cw)));
    }

    #[test]
    fn test_no_rotation() {
        let a = pro_anti();
        let beats = vec![a.clone(), a.clone(), BeatTransform::rotated(Rotation::Half).apply(&a).unwrap(), a];
        assert_eq!(analyze_quarters(&beats), None);
    }

    #[test]
    fn test_length_not_multiple_of_four() {
        let beats = build(pro_anti(), [false; 3], RotationDirection::Cw);
        assert_eq!(analyze_quarters(&beats[..3]), None);
        assert_eq!(analyze_quarters(&[]), None);
    }

    #[test]
    fn test_same_type_hands_keep_their_direction() {
        let beats = build(pro_pro(), [false; 3], RotationDirection::Ccw);
        // a clockwise turn plus swap also fits every transition
        assert_eq!(transitions(&beats, RotationDirection::Cw), Some([QuarterStep::RotatedSwapped; 4]));
        assert_eq!(analyze_quarters(&beats), Some(QuarterPattern::Rotated(RotationDirection::Ccw)));

        let beats = build(pro_pro(), [false; 3], RotationDirection::Cw);
        assert_eq!(analyze_quarters(&beats), Some(QuarterPattern::Rotated(RotationDirection::Cw)));
    }

    #[test]
    fn test_classify_odd_swap_count() {
        use QuarterStep::{Rotated as R, RotatedSwapped as S};
        let cw = RotationDirection::Cw;
        assert_eq!(classify(&[R, R, R, S], cw, true), QuarterPattern::Irregular(cw));
        assert_eq!(classify(&[S, S, R, S], cw, true), QuarterPattern::Irregular(cw));
        assert_eq!(classify(&[S, R, S, R], cw, true), QuarterPattern::Mixed(cw));
        assert_eq!(classify(&[S; 4], cw, false), QuarterPattern::Rotated(cw));
    }
}

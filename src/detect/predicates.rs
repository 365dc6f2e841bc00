//! Halved beat-pair predicates.
//!
//! Each [`Candidate`] is one pattern the second half of a sequence can show
//! relative to the first. A candidate is detected only if its step maps
//! `beat[i]` onto `beat[i + half]` for every `i`; one mismatching pair rules
//! it out for the whole sequence.

use crate::loops::{ComponentSet, LoopComponent};
use crate::models::Beat;
use crate::transforms::{BeatTransform, Reflection, Rotation};

use super::CapLabel;

use LoopComponent::{Inverted, Mirrored, Rotated, Swapped};

/// A halved pattern: the step between halves and how it is reported.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub components: ComponentSet,
    pub labels: Vec<CapLabel>,
    pub step: BeatTransform,
}

impl Candidate {
    fn new(components: &[LoopComponent], step: BeatTransform) -> Self {
        let components = ComponentSet::of(components);
        let labels = components.iter().map(CapLabel::from).collect();
        Self { components, labels, step }
    }

    fn flipped(step: BeatTransform) -> Self {
        Self {
            components: ComponentSet::of(&[Mirrored, Rotated]),
            labels: vec![CapLabel::Flipped],
            step,
        }
    }
}

/// Every halved candidate, singles first.
///
/// A vertical mirror after a half turn is a horizontal flip, so the
/// mirrored+rotated pair is reported as `flipped` when `report_flipped` is set.
pub fn halved_candidates(report_flipped: bool) -> Vec<Candidate> {
    let half = BeatTransform::rotated(Rotation::Half);
    let id = BeatTransform::identity();
    let mirror = id.with_reflection(Reflection::Vertical);

    let mirrored_rotated = if report_flipped {
        Candidate::flipped(id.with_reflection(Reflection::Horizontal))
    } else {
        Candidate::new(&[Mirrored, Rotated], half.with_reflection(Reflection::Vertical))
    };

    vec![
        Candidate::new(&[Rotated], half),
        Candidate::new(&[Swapped], id.with_swap()),
        Candidate::new(&[Mirrored], mirror),
        Candidate::new(&[Inverted], id.with_inversion()),
        Candidate::new(&[Rotated, Swapped], half.with_swap()),
        Candidate::new(&[Mirrored, Swapped], mirror.with_swap()),
        Candidate::new(&[Rotated, Inverted], half.with_inversion()),
        Candidate::new(&[Mirrored, Inverted], mirror.with_inversion()),
        Candidate::new(&[Swapped, Inverted], id.with_swap().with_inversion()),
        mirrored_rotated,
        Candidate::new(
            &[Mirrored, Rotated, Inverted],
            half.with_reflection(Reflection::Vertical).with_inversion(),
        ),
        Candidate::new(
            &[Mirrored, Rotated, Inverted, Swapped],
            half.with_reflection(Reflection::Vertical).with_inversion().with_swap(),
        ),
    ]
}

/// A swap only shows when the hands move differently; with identical motion
/// types a position match can be coincidence.
pub fn swap_is_meaningful(first: &Beat) -> bool {
    !first.motions.same_motion_type()
}

/// Check one step against every (first, second) pair.
///
/// When `require_meaningful_swap` is set and the step swaps hands, every pair
/// must also have differing motion types.
pub fn holds_for_all<'a>(
    step: &BeatTransform,
    pairs: impl IntoIterator<Item = (&'a Beat, &'a Beat)>,
    require_meaningful_swap: bool,
) -> bool {
    pairs.into_iter().all(|(first, second)| {
        step.matches(first, second)
            && (!step.swapped || !require_meaningful_swap || swap_is_meaningful(first))
    })
}

/// Keep the most specific matches: any match whose components are a strict
/// subset of another match's components is dropped.
pub fn most_specific(matches: Vec<Candidate>) -> Vec<Candidate> {
    let sets: Vec<ComponentSet> = matches.iter().map(|c| c.components).collect();
    matches
        .into_iter()
        .filter(|c| !sets.iter().any(|s| *s != c.components && c.components.is_subset(s)))
        .collect()
}

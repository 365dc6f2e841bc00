//! LOOP components, LOOP types and slice sizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One orthogonal transformation axis of a LOOP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopComponent {
    Rotated,
    Mirrored,
    Swapped,
    Inverted,
}

impl LoopComponent {
    pub const ALL: [LoopComponent; 4] = [
        LoopComponent::Rotated,
        LoopComponent::Mirrored,
        LoopComponent::Swapped,
        LoopComponent::Inverted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoopComponent::Rotated => "rotated",
            LoopComponent::Mirrored => "mirrored",
            LoopComponent::Swapped => "swapped",
            LoopComponent::Inverted => "inverted",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for LoopComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LoopComponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoopComponent::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown LOOP component: {}", s))
    }
}

/// A set of [`LoopComponent`]s, stored as a bitmask.
///
/// Iteration order is canonical (rotated, mirrored, swapped, inverted)
/// regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<LoopComponent>", from = "Vec<LoopComponent>")]
pub struct ComponentSet(u8);

impl ComponentSet {
    pub const EMPTY: ComponentSet = ComponentSet(0);

    /// Build a set from a fixed list.
    pub const fn of(components: &[LoopComponent]) -> ComponentSet {
        let mut bits = 0;
        let mut i = 0;
        while i < components.len() {
            bits |= components[i].bit();
            i += 1;
        }
        ComponentSet(bits)
    }

    pub fn insert(&mut self, component: LoopComponent) {
        self.0 |= component.bit();
    }

    pub fn with(mut self, component: LoopComponent) -> ComponentSet {
        self.insert(component);
        self
    }

    pub fn contains(&self, component: LoopComponent) -> bool {
        self.0 & component.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &ComponentSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = LoopComponent> + '_ {
        LoopComponent::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<LoopComponent> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = LoopComponent>>(iter: I) -> Self {
        let mut set = ComponentSet::EMPTY;
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl From<Vec<LoopComponent>> for ComponentSet {
    fn from(components: Vec<LoopComponent>) -> Self {
        components.into_iter().collect()
    }
}

impl From<ComponentSet> for Vec<LoopComponent> {
    fn from(set: ComponentSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for ComponentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        write!(f, "{}", names.join("+"))
    }
}

/// Granularity at which a LOOP repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SliceSize {
    /// Second half mirrors the first; net half turn for rotations.
    #[default]
    Halved,
    /// Four quarters, a quarter turn apart.
    Quartered,
}

impl SliceSize {
    /// Number of copies of the original beats in the closed sequence.
    pub fn multiplier(&self) -> usize {
        match self {
            SliceSize::Halved => 2,
            SliceSize::Quartered => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SliceSize::Halved => "halved",
            SliceSize::Quartered => "quartered",
        }
    }
}

impl fmt::Display for SliceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SliceSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halved" | "half" | "1/2" => Ok(SliceSize::Halved),
            "quartered" | "quarter" | "1/4" => Ok(SliceSize::Quartered),
            _ => Err(format!("unknown slice size: {}", s)),
        }
    }
}

/// The closed catalogue of LOOP types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopType {
    StrictRotated,
    StrictMirrored,
    StrictSwapped,
    StrictInverted,
    MirroredSwapped,
    RotatedSwapped,
    MirroredInverted,
    RotatedInverted,
    SwappedInverted,
    MirroredRotated,
    MirroredRotatedInverted,
    MirroredRotatedInvertedSwapped,
    /// Append the sequence reversed. Not a component LOOP; handled by the host.
    Rewound,
}

use LoopComponent::{Inverted, Mirrored, Rotated, Swapped};

impl LoopType {
    pub const ALL: [LoopType; 13] = [
        LoopType::StrictRotated,
        LoopType::StrictMirrored,
        LoopType::StrictSwapped,
        LoopType::StrictInverted,
        LoopType::MirroredSwapped,
        LoopType::RotatedSwapped,
        LoopType::MirroredInverted,
        LoopType::RotatedInverted,
        LoopType::SwappedInverted,
        LoopType::MirroredRotated,
        LoopType::MirroredRotatedInverted,
        LoopType::MirroredRotatedInvertedSwapped,
        LoopType::Rewound,
    ];

    /// The whole catalogue, in listing order.
    pub fn all() -> &'static [LoopType] {
        &Self::ALL
    }

    /// Serialized identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopType::StrictRotated => "strict_rotated",
            LoopType::StrictMirrored => "strict_mirrored",
            LoopType::StrictSwapped => "strict_swapped",
            LoopType::StrictInverted => "strict_inverted",
            LoopType::MirroredSwapped => "mirrored_swapped",
            LoopType::RotatedSwapped => "rotated_swapped",
            LoopType::MirroredInverted => "mirrored_inverted",
            LoopType::RotatedInverted => "rotated_inverted",
            LoopType::SwappedInverted => "swapped_inverted",
            LoopType::MirroredRotated => "mirrored_rotated",
            LoopType::MirroredRotatedInverted => "mirrored_rotated_inverted",
            LoopType::MirroredRotatedInvertedSwapped => "mirrored_rotated_inverted_swapped",
            LoopType::Rewound => "rewound",
        }
    }

    /// The components each type applies, fixed at definition time.
    pub fn components(&self) -> ComponentSet {
        match self {
            LoopType::StrictRotated => ComponentSet::of(&[Rotated]),
            LoopType::StrictMirrored => ComponentSet::of(&[Mirrored]),
            LoopType::StrictSwapped => ComponentSet::of(&[Swapped]),
            LoopType::StrictInverted => ComponentSet::of(&[Inverted]),
            LoopType::MirroredSwapped => ComponentSet::of(&[Mirrored, Swapped]),
            LoopType::RotatedSwapped => ComponentSet::of(&[Rotated, Swapped]),
            LoopType::MirroredInverted => ComponentSet::of(&[Mirrored, Inverted]),
            LoopType::RotatedInverted => ComponentSet::of(&[Rotated, Inverted]),
            LoopType::SwappedInverted => ComponentSet::of(&[Swapped, Inverted]),
            LoopType::MirroredRotated => ComponentSet::of(&[Mirrored, Rotated]),
            LoopType::MirroredRotatedInverted => ComponentSet::of(&[Mirrored, Rotated, Inverted]),
            LoopType::MirroredRotatedInvertedSwapped => {
                ComponentSet::of(&[Mirrored, Rotated, Inverted, Swapped])
            }
            LoopType::Rewound => ComponentSet::EMPTY,
        }
    }

    /// Slice sizes this type can close a sequence with.
    ///
    /// A quarter turn combined with a mirror is itself a reflection, so
    /// mirrored types only close at the half.
    pub fn supported_slices(&self) -> &'static [SliceSize] {
        let c = self.components();
        if *self == LoopType::Rewound {
            &[]
        } else if c.contains(Rotated) && !c.contains(Mirrored) {
            &[SliceSize::Halved, SliceSize::Quartered]
        } else {
            &[SliceSize::Halved]
        }
    }

    pub fn supports(&self, slice: SliceSize) -> bool {
        self.supported_slices().contains(&slice)
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            LoopType::StrictRotated => "Repeat the sequence rotated a half or quarter turn",
            LoopType::StrictMirrored => "Repeat the sequence mirrored across the vertical axis",
            LoopType::StrictSwapped => "Repeat the sequence with blue and red hands exchanged",
            LoopType::StrictInverted => "Repeat the sequence with pro and anti motions exchanged",
            LoopType::MirroredSwapped => "Mirror, then exchange hands",
            LoopType::RotatedSwapped => "Rotate, then exchange hands",
            LoopType::MirroredInverted => "Mirror and exchange pro/anti motions",
            LoopType::RotatedInverted => "Rotate and exchange pro/anti motions",
            LoopType::SwappedInverted => "Exchange hands and pro/anti motions",
            LoopType::MirroredRotated => "Mirror and rotate a half turn",
            LoopType::MirroredRotatedInverted => "Mirror, rotate a half turn and invert",
            LoopType::MirroredRotatedInvertedSwapped => {
                "Mirror, rotate a half turn, invert and exchange hands"
            }
            LoopType::Rewound => "Append the sequence played backwards",
        }
    }
}

impl fmt::Display for LoopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LoopType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('-', "_");
        LoopType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| format!("unknown LOOP type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_component_set_basics() {
        let mut set = ComponentSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Swapped);
        set.insert(Rotated);
        set.insert(Swapped);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Rotated));
        assert!(!set.contains(Mirrored));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Rotated, Swapped]);
        assert_eq!(set.to_string(), "rotated+swapped");
    }

    #[test]
    fn test_component_set_subset() {
        let pair = ComponentSet::of(&[Mirrored, Inverted]);
        let triple = ComponentSet::of(&[Mirrored, Inverted, Rotated]);
        assert!(pair.is_subset(&triple));
        assert!(!triple.is_subset(&pair));
        assert!(ComponentSet::EMPTY.is_subset(&pair));
    }

    #[test]
    fn test_component_set_serde() {
        let set = ComponentSet::of(&[Inverted, Mirrored]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["mirrored","inverted"]"#);
        let back: ComponentSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_loop_type_names_unique_and_parse() {
        let names: HashSet<_> = LoopType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names.len(), 13);
        for t in LoopType::ALL {
            assert_eq!(t.as_str().parse::<LoopType>(), Ok(t));
        }
        assert_eq!("Rotated-Swapped".parse::<LoopType>(), Ok(LoopType::RotatedSwapped));
        assert_eq!(
            serde_json::to_string(&LoopType::MirroredRotatedInvertedSwapped).unwrap(),
            "\"mirrored_rotated_inverted_swapped\""
        );
    }

    #[test]
    fn test_component_sets_are_distinct() {
        let sets: HashSet<_> = LoopType::ALL.iter().map(|t| t.components()).collect();
        assert_eq!(sets.len(), 13);
    }

    #[test]
    fn test_supported_slices() {
        assert!(LoopType::StrictRotated.supports(SliceSize::Quartered));
        assert!(LoopType::RotatedSwapped.supports(SliceSize::Quartered));
        assert!(LoopType::RotatedInverted.supports(SliceSize::Quartered));
        assert!(!LoopType::MirroredRotated.supports(SliceSize::Quartered));
        assert!(!LoopType::StrictSwapped.supports(SliceSize::Quartered));
        assert!(LoopType::StrictSwapped.supports(SliceSize::Halved));
        assert!(LoopType::Rewound.supported_slices().is_empty());
    }

    #[test]
    fn test_slice_size() {
        assert_eq!(SliceSize::Halved.multiplier(), 2);
        assert_eq!(SliceSize::Quartered.multiplier(), 4);
        assert_eq!("quarter".parse::<SliceSize>(), Ok(SliceSize::Quartered));
    }
}

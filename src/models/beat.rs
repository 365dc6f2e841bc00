//! Beats and sequences.
//!
//! A [`Beat`] pairs one blue and one red [`MotionEndpoint`] and records the
//! grid position before and after. A [`Sequence`] is the start-position
//! pseudo-beat (index 0) followed by the motion beats. Sequences are owned by
//! the caller; every engine operation borrows them and returns fresh data.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::grid::{GridLocation, GridPosition};

/// Kind of motion a hand performs during one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionType {
    Pro,
    Anti,
    Static,
    Dash,
    Float,
}

impl MotionType {
    /// Pro and anti trade places; every other motion type is unchanged.
    pub fn inverted(self) -> MotionType {
        match self {
            MotionType::Pro => MotionType::Anti,
            MotionType::Anti => MotionType::Pro,
            other => other,
        }
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MotionType::Pro => "pro",
            MotionType::Anti => "anti",
            MotionType::Static => "static",
            MotionType::Dash => "dash",
            MotionType::Float => "float",
        };
        write!(f, "{}", s)
    }
}

/// Prop orientation at the start or end of a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    In,
    Out,
    Clock,
    Counter,
}

impl Orientation {
    /// Orientation seen in a mirror: clock and counter trade places.
    pub fn mirrored(self) -> Orientation {
        match self {
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
            other => other,
        }
    }
}

/// What one hand does during a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionEndpoint {
    pub start_location: GridLocation,
    pub end_location: GridLocation,
    #[serde(default)]
    pub start_orientation: Orientation,
    #[serde(default)]
    pub end_orientation: Orientation,
    pub motion_type: MotionType,
}

impl MotionEndpoint {
    /// A motion that stays at `location` for the whole beat.
    pub fn static_at(location: GridLocation) -> Self {
        Self {
            start_location: location,
            end_location: location,
            start_orientation: Orientation::In,
            end_orientation: Orientation::In,
            motion_type: MotionType::Static,
        }
    }
}

/// The blue and red motions of one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motions {
    pub blue: MotionEndpoint,
    pub red: MotionEndpoint,
}

impl Motions {
    /// Both hands share the same motion type.
    pub fn same_motion_type(&self) -> bool {
        self.blue.motion_type == self.red.motion_type
    }
}

/// One beat of a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    pub index: usize,
    /// Letter naming the beat's motion pair, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    #[serde(default)]
    pub start_position: Option<GridPosition>,
    #[serde(default)]
    pub end_position: Option<GridPosition>,
    pub motions: Motions,
}

impl Beat {
    /// Build a beat between two positions.
    ///
    /// Motion locations follow the positions' hand locations.
    pub fn between(
        index: usize,
        start: GridPosition,
        end: GridPosition,
        blue_type: MotionType,
        red_type: MotionType,
    ) -> Self {
        let (blue_start, red_start) = start.hand_locations();
        let (blue_end, red_end) = end.hand_locations();
        Self {
            index,
            letter: None,
            start_position: Some(start),
            end_position: Some(end),
            motions: Motions {
                blue: MotionEndpoint {
                    start_location: blue_start,
                    end_location: blue_end,
                    start_orientation: Orientation::In,
                    end_orientation: Orientation::In,
                    motion_type: blue_type,
                },
                red: MotionEndpoint {
                    start_location: red_start,
                    end_location: red_end,
                    start_orientation: Orientation::In,
                    end_orientation: Orientation::In,
                    motion_type: red_type,
                },
            },
        }
    }

    /// Static beat holding `position` (used for the start-position pseudo-beat).
    pub fn static_at(index: usize, position: GridPosition) -> Self {
        let (blue, red) = position.hand_locations();
        Self {
            index,
            letter: None,
            start_position: Some(position),
            end_position: Some(position),
            motions: Motions {
                blue: MotionEndpoint::static_at(blue),
                red: MotionEndpoint::static_at(red),
            },
        }
    }

    /// Attach a letter.
    pub fn with_letter(mut self, letter: impl Into<String>) -> Self {
        self.letter = Some(letter.into());
        self
    }

    /// Start and end coincide and neither hand moves.
    pub fn is_static(&self) -> bool {
        self.start_position.is_some()
            && self.start_position == self.end_position
            && self.motions.blue.motion_type == MotionType::Static
            && self.motions.red.motion_type == MotionType::Static
    }

    /// Same positions and motions, ignoring the index.
    pub fn same_content(&self, other: &Beat) -> bool {
        self.start_position == other.start_position
            && self.end_position == other.end_position
            && self.motions == other.motions
    }
}

/// A start position followed by motion beats.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The start-position pseudo-beat (index 0).
    #[serde(default)]
    pub start_position: Option<Beat>,
    /// Motion beats, indexed from 1.
    #[serde(default)]
    pub beats: Vec<Beat>,
}

impl Sequence {
    /// Empty sequence starting at `position`.
    pub fn starting_at(position: GridPosition) -> Self {
        Self { name: None, start_position: Some(Beat::static_at(0, position)), beats: Vec::new() }
    }

    /// Build from a flat beat list where index 0 is the start-position pseudo-beat.
    pub fn from_beats(mut all: Vec<Beat>) -> Self {
        let start = match all.first() {
            Some(b) if b.index == 0 => Some(all.remove(0)),
            _ => None,
        };
        Self { name: None, start_position: start, beats: all }
    }

    /// Flatten back to a list with the pseudo-beat first.
    pub fn to_beats(&self) -> Vec<Beat> {
        self.start_position.iter().chain(self.beats.iter()).cloned().collect()
    }

    /// Append a beat, numbering it after the current last beat.
    pub fn push(&mut self, mut beat: Beat) {
        beat.index = self.beats.len() + 1;
        self.beats.push(beat);
    }

    /// Number of motion beats.
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    /// No motion beats yet.
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Recorded start position.
    ///
    /// Taken from the pseudo-beat, or from the first beat when the
    /// pseudo-beat is missing.
    pub fn start(&self) -> Option<GridPosition> {
        self.start_position
            .as_ref()
            .and_then(|b| b.end_position.or(b.start_position))
            .or_else(|| self.beats.first().and_then(|b| b.start_position))
    }

    /// Current end position: the last beat's end, or the start when there are no beats.
    pub fn end(&self) -> Option<GridPosition> {
        match self.beats.last() {
            Some(last) => last.end_position,
            None => self.start(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_type_inverted() {
        assert_eq!(MotionType::Pro.inverted(), MotionType::Anti);
        assert_eq!(MotionType::Anti.inverted(), MotionType::Pro);
        assert_eq!(MotionType::Dash.inverted(), MotionType::Dash);
        assert_eq!(MotionType::Static.inverted(), MotionType::Static);
    }

    #[test]
    fn test_orientation_mirrored() {
        assert_eq!(Orientation::Clock.mirrored(), Orientation::Counter);
        assert_eq!(Orientation::In.mirrored(), Orientation::In);
    }

    #[test]
    fn test_beat_between_uses_hand_locations() {
        let beat =
            Beat::between(1, GridPosition::Alpha1, GridPosition::Alpha3, MotionType::Pro, MotionType::Pro);
        assert_eq!(beat.motions.blue.start_location, GridLocation::South);
        assert_eq!(beat.motions.blue.end_location, GridLocation::West);
        assert_eq!(beat.motions.red.end_location, GridLocation::East);
        assert!(!beat.is_static());
    }

    #[test]
    fn test_sequence_from_beats_splits_pseudo_beat() {
        let seq = Sequence::from_beats(vec![
            Beat::static_at(0, GridPosition::Beta1),
            Beat::between(1, GridPosition::Beta1, GridPosition::Beta3, MotionType::Pro, MotionType::Anti),
        ]);
        assert!(seq.start_position.is_some());
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.start(), Some(GridPosition::Beta1));
        assert_eq!(seq.end(), Some(GridPosition::Beta3));
        assert_eq!(seq.to_beats().len(), 2);
    }

    #[test]
    fn test_sequence_start_falls_back_to_first_beat() {
        let seq = Sequence::from_beats(vec![Beat::between(
            1,
            GridPosition::Gamma1,
            GridPosition::Gamma3,
            MotionType::Pro,
            MotionType::Pro,
        )]);
        assert!(seq.start_position.is_none());
        assert_eq!(seq.start(), Some(GridPosition::Gamma1));
    }

    #[test]
    fn test_empty_sequence_end_is_start() {
        let seq = Sequence::starting_at(GridPosition::Alpha5);
        assert!(seq.is_empty());
        assert_eq!(seq.end(), Some(GridPosition::Alpha5));
        assert_eq!(Sequence::default().end(), None);
    }

    #[test]
    fn test_push_renumbers() {
        let mut seq = Sequence::starting_at(GridPosition::Alpha1);
        seq.push(Beat::static_at(42, GridPosition::Alpha1));
        assert_eq!(seq.beats[0].index, 1);
    }

    #[test]
    fn test_sequence_json_shape() {
        let json = r#"{
            "start_position": {"index": 0, "start_position": "alpha1", "end_position": "alpha1",
                "motions": {
                    "blue": {"start_location": "s", "end_location": "s", "motion_type": "static"},
                    "red": {"start_location": "n", "end_location": "n", "motion_type": "static"}
                }},
            "beats": []
        }"#;
        let seq: Sequence = serde_json::from_str(json).unwrap();
        assert_eq!(seq.start(), Some(GridPosition::Alpha1));
    }
}

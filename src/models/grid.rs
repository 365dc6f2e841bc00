//! Grid positions and hand locations.
//!
//! Every transformation in the crate operates over two closed domains:
//! the 32 named [`GridPosition`]s and the 8 compass [`GridLocation`]s.
//! A position names where both hands are at once, so each position
//! decomposes into a (blue, red) pair of locations:
//!
//! - **alpha** - hands on opposite points
//! - **beta** - hands on the same point
//! - **gamma** - hands a quarter turn apart
//!
//! Alpha and beta positions are numbered clockwise; gamma1-8 have the red
//! hand a quarter turn clockwise of the blue hand, gamma9-16 a quarter turn
//! counter-clockwise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 8 compass points a hand can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLocation {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "nw")]
    NorthWest,
}

impl GridLocation {
    /// All locations, clockwise from north.
    pub const ALL: [GridLocation; 8] = [
        GridLocation::North,
        GridLocation::NorthEast,
        GridLocation::East,
        GridLocation::SouthEast,
        GridLocation::South,
        GridLocation::SouthWest,
        GridLocation::West,
        GridLocation::NorthWest,
    ];

    /// Short compass label (`"n"`, `"ne"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            GridLocation::North => "n",
            GridLocation::NorthEast => "ne",
            GridLocation::East => "e",
            GridLocation::SouthEast => "se",
            GridLocation::South => "s",
            GridLocation::SouthWest => "sw",
            GridLocation::West => "w",
            GridLocation::NorthWest => "nw",
        }
    }
}

impl fmt::Display for GridLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GridLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridLocation::ALL
            .into_iter()
            .find(|loc| loc.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown grid location: {}", s))
    }
}

/// The coarse partition of [`GridPosition`]. Transformations never move a
/// position across groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionGroup {
    Alpha,
    Beta,
    Gamma,
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionGroup::Alpha => write!(f, "alpha"),
            PositionGroup::Beta => write!(f, "beta"),
            PositionGroup::Gamma => write!(f, "gamma"),
        }
    }
}

/// A named grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPosition {
    Alpha1,
    Alpha2,
    Alpha3,
    Alpha4,
    Alpha5,
    Alpha6,
    Alpha7,
    Alpha8,
    Beta1,
    Beta2,
    Beta3,
    Beta4,
    Beta5,
    Beta6,
    Beta7,
    Beta8,
    Gamma1,
    Gamma2,
    Gamma3,
    Gamma4,
    Gamma5,
    Gamma6,
    Gamma7,
    Gamma8,
    Gamma9,
    Gamma10,
    Gamma11,
    Gamma12,
    Gamma13,
    Gamma14,
    Gamma15,
    Gamma16,
}

impl GridPosition {
    /// Number of positions across all groups.
    pub const COUNT: usize = 32;

    /// All positions in declaration order (alpha, beta, gamma).
    pub const ALL: [GridPosition; 32] = [
        GridPosition::Alpha1,
        GridPosition::Alpha2,
        GridPosition::Alpha3,
        GridPosition::Alpha4,
        GridPosition::Alpha5,
        GridPosition::Alpha6,
        GridPosition::Alpha7,
        GridPosition::Alpha8,
        GridPosition::Beta1,
        GridPosition::Beta2,
        GridPosition::Beta3,
        GridPosition::Beta4,
        GridPosition::Beta5,
        GridPosition::Beta6,
        GridPosition::Beta7,
        GridPosition::Beta8,
        GridPosition::Gamma1,
        GridPosition::Gamma2,
        GridPosition::Gamma3,
        GridPosition::Gamma4,
        GridPosition::Gamma5,
        GridPosition::Gamma6,
        GridPosition::Gamma7,
        GridPosition::Gamma8,
        GridPosition::Gamma9,
        GridPosition::Gamma10,
        GridPosition::Gamma11,
        GridPosition::Gamma12,
        GridPosition::Gamma13,
        GridPosition::Gamma14,
        GridPosition::Gamma15,
        GridPosition::Gamma16,
    ];

    /// Dense index in `0..32`, usable for fixed-size lookup tables.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Which group this position belongs to.
    pub fn group(self) -> PositionGroup {
        match self.ordinal() {
            0..=7 => PositionGroup::Alpha,
            8..=15 => PositionGroup::Beta,
            _ => PositionGroup::Gamma,
        }
    }

    /// 1-based slot number within the group (`alpha3` -> 3).
    pub fn slot(self) -> usize {
        match self.group() {
            PositionGroup::Alpha => self.ordinal() + 1,
            PositionGroup::Beta => self.ordinal() - 7,
            PositionGroup::Gamma => self.ordinal() - 15,
        }
    }

    /// Serialized name (`"alpha1"`, `"gamma16"`).
    pub fn name(self) -> String {
        format!("{}{}", self.group(), self.slot())
    }

    /// The (blue, red) hand locations this position denotes.
    pub fn hand_locations(self) -> (GridLocation, GridLocation) {
        use GridLocation::*;
        match self {
            GridPosition::Alpha1 => (South, North),
            GridPosition::Alpha2 => (SouthWest, NorthEast),
            GridPosition::Alpha3 => (West, East),
            GridPosition::Alpha4 => (NorthWest, SouthEast),
            GridPosition::Alpha5 => (North, South),
            GridPosition::Alpha6 => (NorthEast, SouthWest),
            GridPosition::Alpha7 => (East, West),
            GridPosition::Alpha8 => (SouthEast, NorthWest),
            GridPosition::Beta1 => (North, North),
            GridPosition::Beta2 => (NorthEast, NorthEast),
            GridPosition::Beta3 => (East, East),
            GridPosition::Beta4 => (SouthEast, SouthEast),
            GridPosition::Beta5 => (South, South),
            GridPosition::Beta6 => (SouthWest, SouthWest),
            GridPosition::Beta7 => (West, West),
            GridPosition::Beta8 => (NorthWest, NorthWest),
            GridPosition::Gamma1 => (West, North),
            GridPosition::Gamma2 => (NorthWest, NorthEast),
            GridPosition::Gamma3 => (North, East),
            GridPosition::Gamma4 => (NorthEast, SouthEast),
            GridPosition::Gamma5 => (East, South),
            GridPosition::Gamma6 => (SouthEast, SouthWest),
            GridPosition::Gamma7 => (South, West),
            GridPosition::Gamma8 => (SouthWest, NorthWest),
            GridPosition::Gamma9 => (East, North),
            GridPosition::Gamma10 => (SouthEast, NorthEast),
            GridPosition::Gamma11 => (South, East),
            GridPosition::Gamma12 => (SouthWest, SouthEast),
            GridPosition::Gamma13 => (West, South),
            GridPosition::Gamma14 => (NorthWest, SouthWest),
            GridPosition::Gamma15 => (North, West),
            GridPosition::Gamma16 => (NorthEast, NorthWest),
        }
    }

    /// Position denoted by a (blue, red) location pair.
    ///
    /// Returns `None` when the hands are neither together, opposite, nor a
    /// quarter turn apart (e.g. one hand on a cardinal point and the other
    /// on a diagonal).
    pub fn from_hand_locations(blue: GridLocation, red: GridLocation) -> Option<GridPosition> {
        GridPosition::ALL.into_iter().find(|p| p.hand_locations() == (blue, red))
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GridPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        GridPosition::ALL
            .into_iter()
            .find(|p| p.name() == needle)
            .ok_or_else(|| format!("unknown grid position: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_group_sizes() {
        let count = |g| GridPosition::ALL.iter().filter(|p| p.group() == g).count();
        assert_eq!(count(PositionGroup::Alpha), 8);
        assert_eq!(count(PositionGroup::Beta), 8);
        assert_eq!(count(PositionGroup::Gamma), 16);
    }

    #[test]
    fn test_ordinal_matches_all_order() {
        for (i, p) in GridPosition::ALL.iter().enumerate() {
            assert_eq!(p.ordinal(), i);
        }
    }

    #[test]
    fn test_names_round_trip() {
        assert_eq!(GridPosition::Alpha1.name(), "alpha1");
        assert_eq!(GridPosition::Beta8.name(), "beta8");
        assert_eq!(GridPosition::Gamma16.name(), "gamma16");
        for p in GridPosition::ALL {
            assert_eq!(p.name().parse::<GridPosition>(), Ok(p));
        }
        assert!("delta1".parse::<GridPosition>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&GridPosition::Gamma12).unwrap();
        assert_eq!(json, "\"gamma12\"");
        let loc: GridLocation = serde_json::from_str("\"sw\"").unwrap();
        assert_eq!(loc, GridLocation::SouthWest);
    }

    #[test]
    fn test_hand_locations_are_unique() {
        let pairs: HashSet<_> = GridPosition::ALL.iter().map(|p| p.hand_locations()).collect();
        assert_eq!(pairs.len(), GridPosition::COUNT);
    }

    #[test]
    fn test_hand_locations_match_group_shape() {
        let step = |a: GridLocation, b: GridLocation| {
            let ia = GridLocation::ALL.iter().position(|l| *l == a).unwrap();
            let ib = GridLocation::ALL.iter().position(|l| *l == b).unwrap();
            (ib + 8 - ia) % 8
        };
        for p in GridPosition::ALL {
            let (blue, red) = p.hand_locations();
            let expected: &[usize] = match p.group() {
                PositionGroup::Alpha => &[4],
                PositionGroup::Beta => &[0],
                PositionGroup::Gamma => &[2, 6],
            };
            assert!(expected.contains(&step(blue, red)), "{} has wrong hand spacing", p);
        }
    }

    #[test]
    fn test_from_hand_locations() {
        assert_eq!(
            GridPosition::from_hand_locations(GridLocation::West, GridLocation::East),
            Some(GridPosition::Alpha3)
        );
        assert_eq!(
            GridPosition::from_hand_locations(GridLocation::North, GridLocation::NorthEast),
            None
        );
    }

    #[test]
    fn test_location_parse() {
        assert_eq!("NE".parse::<GridLocation>(), Ok(GridLocation::NorthEast));
        assert!("up".parse::<GridLocation>().is_err());
    }
}

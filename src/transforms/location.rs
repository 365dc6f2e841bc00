//! Location maps over the 8 compass points.

use crate::models::GridLocation;

/// Mirror across the vertical axis. North and south are fixed.
pub fn vertical_mirror_location(l: GridLocation) -> GridLocation {
    use GridLocation::*;
    match l {
        North => North,
        NorthEast => NorthWest,
        East => West,
        SouthEast => SouthWest,
        South => South,
        SouthWest => SouthEast,
        West => East,
        NorthWest => NorthEast,
    }
}

/// Flip across the horizontal axis. East and west are fixed.
pub fn horizontal_mirror_location(l: GridLocation) -> GridLocation {
    use GridLocation::*;
    match l {
        North => South,
        NorthEast => SouthEast,
        East => East,
        SouthEast => NorthEast,
        South => North,
        SouthWest => NorthWest,
        West => West,
        NorthWest => SouthWest,
    }
}

pub fn rotate_location_cw(l: GridLocation) -> GridLocation {
    use GridLocation::*;
    match l {
        North => East,
        NorthEast => SouthEast,
        East => South,
        SouthEast => SouthWest,
        South => West,
        SouthWest => NorthWest,
        West => North,
        NorthWest => NorthEast,
    }
}

pub fn rotate_location_ccw(l: GridLocation) -> GridLocation {
    use GridLocation::*;
    match l {
        North => West,
        NorthEast => NorthWest,
        East => North,
        SouthEast => NorthEast,
        South => East,
        SouthWest => SouthEast,
        West => South,
        NorthWest => SouthWest,
    }
}

pub fn rotate_location_half(l: GridLocation) -> GridLocation {
    use GridLocation::*;
    match l {
        North => South,
        NorthEast => SouthWest,
        East => West,
        SouthEast => NorthWest,
        South => North,
        SouthWest => NorthEast,
        West => East,
        NorthWest => SouthEast,
    }
}

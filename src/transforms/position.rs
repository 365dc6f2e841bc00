//! Position maps
//!
//! Explicit tables rather than geometry: the gamma group has twice as many
//! slots as alpha and beta, so the slot arithmetic differs per group. Every
//! table keeps a position inside its group.

use crate::models::GridPosition;

/// Mirror across the vertical (north-south) axis.
///
/// Involution. Fixed points: alpha1, alpha5, beta1, beta5 (both hands on
/// the axis). Gamma positions always change chirality, so gamma has none.
pub fn vertical_mirror_position(p: GridPosition) -> GridPosition {
    use GridPosition::*;
    match p {
        Alpha1 => Alpha1,
        Alpha2 => Alpha8,
        Alpha3 => Alpha7,
        Alpha4 => Alpha6,
        Alpha5 => Alpha5,
        Alpha6 => Alpha4,
        Alpha7 => Alpha3,
        Alpha8 => Alpha2,
        Beta1 => Beta1,
        Beta2 => Beta8,
        Beta3 => Beta7,
        Beta4 => Beta6,
        Beta5 => Beta5,
        Beta6 => Beta4,
        Beta7 => Beta3,
        Beta8 => Beta2,
        Gamma1 => Gamma9,
        Gamma2 => Gamma16,
        Gamma3 => Gamma15,
        Gamma4 => Gamma14,
        Gamma5 => Gamma13,
        Gamma6 => Gamma12,
        Gamma7 => Gamma11,
        Gamma8 => Gamma10,
        Gamma9 => Gamma1,
        Gamma10 => Gamma8,
        Gamma11 => Gamma7,
        Gamma12 => Gamma6,
        Gamma13 => Gamma5,
        Gamma14 => Gamma4,
        Gamma15 => Gamma3,
        Gamma16 => Gamma2,
    }
}

/// Flip across the horizontal (east-west) axis.
///
/// Involution. Fixed points: alpha3, alpha7, beta3, beta7.
pub fn horizontal_mirror_position(p: GridPosition) -> GridPosition {
    use GridPosition::*;
    match p {
        Alpha1 => Alpha5,
        Alpha2 => Alpha4,
        Alpha3 => Alpha3,
        Alpha4 => Alpha2,
        Alpha5 => Alpha1,
        Alpha6 => Alpha8,
        Alpha7 => Alpha7,
        Alpha8 => Alpha6,
        Beta1 => Beta5,
        Beta2 => Beta4,
        Beta3 => Beta3,
        Beta4 => Beta2,
        Beta5 => Beta1,
        Beta6 => Beta8,
        Beta7 => Beta7,
        Beta8 => Beta6,
        Gamma1 => Gamma13,
        Gamma2 => Gamma12,
        Gamma3 => Gamma11,
        Gamma4 => Gamma10,
        Gamma5 => Gamma9,
        Gamma6 => Gamma16,
        Gamma7 => Gamma15,
        Gamma8 => Gamma14,
        Gamma9 => Gamma5,
        Gamma10 => Gamma4,
        Gamma11 => Gamma3,
        Gamma12 => Gamma2,
        Gamma13 => Gamma1,
        Gamma14 => Gamma8,
        Gamma15 => Gamma7,
        Gamma16 => Gamma6,
    }
}

/// Exchange the blue and red hands.
///
/// Involution. Every beta position is fixed (both hands share a location);
/// alpha and gamma positions pair off.
pub fn swapped_position(p: GridPosition) -> GridPosition {
    use GridPosition::*;
    match p {
        Alpha1 => Alpha5,
        Alpha2 => Alpha6,
        Alpha3 => Alpha7,
        Alpha4 => Alpha8,
        Alpha5 => Alpha1,
        Alpha6 => Alpha2,
        Alpha7 => Alpha3,
        Alpha8 => Alpha4,
        Beta1 => Beta1,
        Beta2 => Beta2,
        Beta3 => Beta3,
        Beta4 => Beta4,
        Beta5 => Beta5,
        Beta6 => Beta6,
        Beta7 => Beta7,
        Beta8 => Beta8,
        Gamma1 => Gamma15,
        Gamma2 => Gamma16,
        Gamma3 => Gamma9,
        Gamma4 => Gamma10,
        Gamma5 => Gamma11,
        Gamma6 => Gamma12,
        Gamma7 => Gamma13,
        Gamma8 => Gamma14,
        Gamma9 => Gamma3,
        Gamma10 => Gamma4,
        Gamma11 => Gamma5,
        Gamma12 => Gamma6,
        Gamma13 => Gamma7,
        Gamma14 => Gamma8,
        Gamma15 => Gamma1,
        Gamma16 => Gamma2,
    }
}

/// Rotate a quarter turn clockwise. Order 4; inverse of [`quarter_rotate_ccw`].
pub fn quarter_rotate_cw(p: GridPosition) -> GridPosition {
    use GridPosition::*;
    match p {
        Alpha1 => Alpha3,
        Alpha2 => Alpha4,
        Alpha3 => Alpha5,
        Alpha4 => Alpha6,
        Alpha5 => Alpha7,
        Alpha6 => Alpha8,
        Alpha7 => Alpha1,
        Alpha8 => Alpha2,
        Beta1 => Beta3,
        Beta2 => Beta4,
        Beta3 => Beta5,
        Beta4 => Beta6,
        Beta5 => Beta7,
        Beta6 => Beta8,
        Beta7 => Beta1,
        Beta8 => Beta2,
        Gamma1 => Gamma3,
        Gamma2 => Gamma4,
        Gamma3 => Gamma5,
        Gamma4 => Gamma6,
        Gamma5 => Gamma7,
        Gamma6 => Gamma8,
        Gamma7 => Gamma1,
        Gamma8 => Gamma2,
        Gamma9 => Gamma11,
        Gamma10 => Gamma12,
        Gamma11 => Gamma13,
        Gamma12 => Gamma14,
        Gamma13 => Gamma15,
        Gamma14 => Gamma16,
        Gamma15 => Gamma9,
        Gamma16 => Gamma10,
    }
}

/// Rotate a quarter turn counter-clockwise.
pub fn quarter_rotate_ccw(p: GridPosition) -> GridPosition {
    use GridPosition::*;
    match p {
        Alpha1 => Alpha7,
        Alpha2 => Alpha8,
        Alpha3 => Alpha1,
        Alpha4 => Alpha2,
        Alpha5 => Alpha3,
        Alpha6 => Alpha4,
        Alpha7 => Alpha5,
        Alpha8 => Alpha6,
        Beta1 => Beta7,
        Beta2 => Beta8,
        Beta3 => Beta1,
        Beta4 => Beta2,
        Beta5 => Beta3,
        Beta6 => Beta4,
        Beta7 => Beta5,
        Beta8 => Beta6,
        Gamma1 => Gamma7,
        Gamma2 => Gamma8,
        Gamma3 => Gamma1,
        Gamma4 => Gamma2,
        Gamma5 => Gamma3,
        Gamma6 => Gamma4,
        Gamma7 => Gamma5,
        Gamma8 => Gamma6,
        Gamma9 => Gamma15,
        Gamma10 => Gamma16,
        Gamma11 => Gamma9,
        Gamma12 => Gamma10,
        Gamma13 => Gamma11,
        Gamma14 => Gamma12,
        Gamma15 => Gamma13,
        Gamma16 => Gamma14,
    }
}

/// Rotate a half turn. Involution; equals two quarter turns either way.
pub fn half_rotate(p: GridPosition) -> GridPosition {
    use GridPosition::*;
    match p {
        Alpha1 => Alpha5,
        Alpha2 => Alpha6,
        Alpha3 => Alpha7,
        Alpha4 => Alpha8,
        Alpha5 => Alpha1,
        Alpha6 => Alpha2,
        Alpha7 => Alpha3,
        Alpha8 => Alpha4,
        Beta1 => Beta5,
        Beta2 => Beta6,
        Beta3 => Beta7,
        Beta4 => Beta8,
        Beta5 => Beta1,
        Beta6 => Beta2,
        Beta7 => Beta3,
        Beta8 => Beta4,
        Gamma1 => Gamma5,
        Gamma2 => Gamma6,
        Gamma3 => Gamma7,
        Gamma4 => Gamma8,
        Gamma5 => Gamma1,
        Gamma6 => Gamma2,
        Gamma7 => Gamma3,
        Gamma8 => Gamma4,
        Gamma9 => Gamma13,
        Gamma10 => Gamma14,
        Gamma11 => Gamma15,
        Gamma12 => Gamma16,
        Gamma13 => Gamma9,
        Gamma14 => Gamma10,
        Gamma15 => Gamma11,
        Gamma16 => Gamma12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::location::{
        horizontal_mirror_location, rotate_location_ccw, rotate_location_cw,
        rotate_location_half, vertical_mirror_location,
    };
    use crate::models::GridLocation;

    /// Apply a location map to both hands and look the result up again.
    fn via_hands(p: GridPosition, f: fn(GridLocation) -> GridLocation) -> GridPosition {
        let (blue, red) = p.hand_locations();
        GridPosition::from_hand_locations(f(blue), f(red)).expect("maps stay on the grid")
    }

    #[test]
    fn test_involutions() {
        for p in GridPosition::ALL {
            assert_eq!(vertical_mirror_position(vertical_mirror_position(p)), p);
            assert_eq!(horizontal_mirror_position(horizontal_mirror_position(p)), p);
            assert_eq!(swapped_position(swapped_position(p)), p);
            assert_eq!(half_rotate(half_rotate(p)), p);
        }
    }

    #[test]
    fn test_quarter_rotations_are_inverse() {
        for p in GridPosition::ALL {
            assert_eq!(quarter_rotate_ccw(quarter_rotate_cw(p)), p);
            assert_eq!(quarter_rotate_cw(quarter_rotate_ccw(p)), p);
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for p in GridPosition::ALL {
            let mut q = p;
            for _ in 0..4 {
                q = quarter_rotate_cw(q);
            }
            assert_eq!(q, p);
            assert_ne!(quarter_rotate_cw(p), p);
        }
    }

    #[test]
    fn test_half_rotate_is_two_quarters() {
        for p in GridPosition::ALL {
            assert_eq!(half_rotate(p), quarter_rotate_cw(quarter_rotate_cw(p)));
            assert_eq!(half_rotate(p), quarter_rotate_ccw(quarter_rotate_ccw(p)));
        }
    }

    #[test]
    fn test_group_is_preserved() {
        let maps: [fn(GridPosition) -> GridPosition; 6] = [
            vertical_mirror_position,
            horizontal_mirror_position,
            swapped_position,
            quarter_rotate_cw,
            quarter_rotate_ccw,
            half_rotate,
        ];
        for map in maps {
            for p in GridPosition::ALL {
                assert_eq!(map(p).group(), p.group(), "{} left its group", p);
            }
        }
    }

    #[test]
    fn test_swap_fixes_exactly_beta() {
        for p in GridPosition::ALL {
            let fixed = swapped_position(p) == p;
            assert_eq!(fixed, p.group() == crate::models::PositionGroup::Beta, "{}", p);
        }
    }

    #[test]
    fn test_mirror_fixed_points_lie_on_axis() {
        use GridPosition::*;
        let vertical: Vec<_> =
            GridPosition::ALL.into_iter().filter(|p| vertical_mirror_position(*p) == *p).collect();
        assert_eq!(vertical, vec![Alpha1, Alpha5, Beta1, Beta5]);

        let horizontal: Vec<_> =
            GridPosition::ALL.into_iter().filter(|p| horizontal_mirror_position(*p) == *p).collect();
        assert_eq!(horizontal, vec![Alpha3, Alpha7, Beta3, Beta7]);
    }

    #[test]
    fn test_tables_agree_with_hand_locations() {
        for p in GridPosition::ALL {
            assert_eq!(vertical_mirror_position(p), via_hands(p, vertical_mirror_location));
            assert_eq!(horizontal_mirror_position(p), via_hands(p, horizontal_mirror_location));
            assert_eq!(quarter_rotate_cw(p), via_hands(p, rotate_location_cw));
            assert_eq!(quarter_rotate_ccw(p), via_hands(p, rotate_location_ccw));
            assert_eq!(half_rotate(p), via_hands(p, rotate_location_half));

            let (blue, red) = p.hand_locations();
            assert_eq!(Some(swapped_position(p)), GridPosition::from_hand_locations(red, blue));
        }
    }

    #[test]
    fn test_mirror_then_half_is_flip() {
        for p in GridPosition::ALL {
            assert_eq!(vertical_mirror_position(half_rotate(p)), horizontal_mirror_position(p));
        }
    }
}

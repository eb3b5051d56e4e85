//! Pixel geometry helpers for event cards.
//!
//! Timed events render as an L-shaped card with the bottom-left corner cut
//! away, leaving a narrow leg on the right that marks the final stretch of
//! the block. Cards too small for the cutout fall back to a rectangle.

/// Height of the bottom-left cutout: 15 minutes at 60 px/hour.
pub const CUT_HEIGHT: f32 = 15.0;
/// Width of the remaining right-hand leg.
pub const LEG_WIDTH: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pixel height for a duration, optionally extended by the leg cutout so
/// the leg reaches into the following 15 minutes.
pub fn duration_height(hours: f64, pixels_per_hour: f32, with_leg: bool) -> f32 {
    let mut pixels = hours as f32 * pixels_per_hour;
    if with_leg {
        pixels += CUT_HEIGHT;
    }
    pixels
}

/// Closed outline of an event card, origin at its top-left corner.
///
/// Returns 4 points (plain rectangle) when the card is too short or too
/// narrow for the cutout, 6 points otherwise:
/// (0,0) → (W,0) → (W,H) → (W-leg,H) → (W-leg,H-cut) → (0,H-cut).
pub fn l_shape_outline(width: f32, height: f32) -> Vec<Point> {
    if height <= CUT_HEIGHT || width <= LEG_WIDTH {
        return vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ];
    }

    vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(width - LEG_WIDTH, height),
        Point::new(width - LEG_WIDTH, height - CUT_HEIGHT),
        Point::new(0.0, height - CUT_HEIGHT),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_height_plain() {
        assert_eq!(duration_height(1.0, 60.0, false), 60.0);
        assert_eq!(duration_height(0.5, 60.0, false), 30.0);
    }

    #[test]
    fn test_duration_height_with_leg() {
        assert_eq!(duration_height(1.0, 60.0, true), 75.0);
    }

    #[test]
    fn test_outline_is_l_shape_when_large_enough() {
        let outline = l_shape_outline(100.0, 60.0);
        assert_eq!(outline.len(), 6);
        assert_eq!(outline[3], Point::new(70.0, 60.0));
        assert_eq!(outline[4], Point::new(70.0, 45.0));
        assert_eq!(outline[5], Point::new(0.0, 45.0));
    }

    #[test]
    fn test_short_card_falls_back_to_rectangle() {
        let outline = l_shape_outline(100.0, 15.0);
        assert_eq!(outline.len(), 4);
        assert_eq!(outline[2], Point::new(100.0, 15.0));
    }

    #[test]
    fn test_narrow_card_falls_back_to_rectangle() {
        let outline = l_shape_outline(30.0, 120.0);
        assert_eq!(outline.len(), 4);
    }
}

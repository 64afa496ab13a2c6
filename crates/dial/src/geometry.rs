//! The clock-face layout engine.
//!
//! Angles are clock degrees: 0 at twelve o'clock, growing clockwise. The face
//! is a zoomed-in view of a large dial: the point of the dial the time is at
//! sits on the screen centre, and the hour labels and tick dots are placed by
//! their offset from that point along a ring of `ring_radius` pixels.

use crate::clock::{MINUTES_PER_HALF_DAY, WallClock};
use crate::labels::HourText;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::{Add, Sub};

pub const FULL_TURN_DEGREES: u32 = 360;
pub const HOUR_STEP_DEGREES: f64 = 30.0;

pub const TICK_SECTORS: usize = 3;
pub const TICK_SECTOR_TURN: f64 = 1.0 / 6.0;
pub const TICK_STEP_TURN: f64 = 1.0 / 24.0;
pub const TICK_RADII: [i32; 3] = [3, 5, 3];
pub const TICK_COUNT: usize = TICK_SECTORS * TICK_RADII.len();

/// Hand polygon around the origin, clockwise, narrow end pointing up.
pub const INDICATOR_SHAPE: [Point; 4] = [
    Point::new(-5, 125),
    Point::new(5, 125),
    Point::new(2, -125),
    Point::new(-2, -125),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn from_f64(x: f64, y: f64) -> Self {
        Self::new(x.round() as i32, y.round() as i32)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub use_24h: bool,
    pub ring_radius: i32,
    pub screen_center: Point,
    pub label_box: Size,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_24h: false,
            ring_radius: 125,
            screen_center: Size::new(144, 168).center(),
            label_box: Size::new(40, 30),
        }
    }
}

impl DisplayConfig {
    /// Top-left corner of a label box centred on the screen.
    pub fn label_anchor(&self) -> Point {
        self.screen_center - Point::new(self.label_box.width / 2, self.label_box.height / 2)
    }

    /// Anchor of the tick ring.
    pub fn tick_anchor(&self) -> Point {
        self.screen_center
    }

    /// Replaces the layout fields, keeping the hour notation.
    pub fn with_layout(self, layout: &DisplayConfig) -> Self {
        Self {
            use_24h: self.use_24h,
            ..*layout
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorGeometry {
    pub rotation_degrees: u32,
}

impl IndicatorGeometry {
    pub fn new(clock: &WallClock) -> Self {
        Self {
            rotation_degrees: indicator_angle(clock),
        }
    }

    /// The hand polygon rotated clockwise by the indicator angle and moved to
    /// `center`.
    pub fn points(&self, center: Point) -> [Point; 4] {
        let (sin, cos) = (self.rotation_degrees as f64).to_radians().sin_cos();
        INDICATOR_SHAPE.map(|p| {
            let (x, y) = (p.x as f64, p.y as f64);
            Point::from_f64(x * cos - y * sin, x * sin + y * cos) + center
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelPlacement {
    pub top_left: Point,
    pub text: HourText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickMark {
    pub center: Point,
    pub dot_radius: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceGeometry {
    pub indicator: IndicatorGeometry,
    pub hour_label: LabelPlacement,
    pub next_hour_label: LabelPlacement,
    pub ticks: [TickMark; TICK_COUNT],
}

impl FaceGeometry {
    pub fn compute(clock: &WallClock, config: &DisplayConfig) -> Self {
        let ring = Ring::new(clock, config.ring_radius);
        let (hour_label, next_hour_label) = orbiting_labels(clock, config, &ring);

        Self {
            indicator: IndicatorGeometry::new(clock),
            hour_label,
            next_hour_label,
            ticks: tick_ring(config, &ring),
        }
    }
}

/// Two minutes of clock time per degree of rotation.
pub fn indicator_angle(clock: &WallClock) -> u32 {
    clock.minutes_into_half_day() * FULL_TURN_DEGREES / MINUTES_PER_HALF_DAY
}

/// Clock degrees to the screen-space angle used with `cos`/`-sin`. Results in
/// the lower half-plane are wrapped by a full turn so the value stays in
/// `[0, TAU)`.
pub fn screen_radians(degrees: f64) -> f64 {
    let theta = FRAC_PI_2 - degrees.to_radians();
    if theta < 0.0 { theta + TAU } else { theta }
}

/// The dial ring as seen from the time point.
struct Ring {
    radius: f64,
    hour_mark: f64,
    origin: (f64, f64),
}

impl Ring {
    fn new(clock: &WallClock, radius: i32) -> Self {
        let radius = radius as f64;
        Self {
            radius,
            hour_mark: (clock.hour24() % 12) as f64 * HOUR_STEP_DEGREES,
            origin: Self::point(radius, indicator_angle(clock) as f64),
        }
    }

    fn point(radius: f64, degrees: f64) -> (f64, f64) {
        let theta = screen_radians(degrees);
        (radius * theta.cos(), -radius * theta.sin())
    }

    /// Offset of the ring point at `degrees` from the time point.
    fn offset(&self, degrees: f64) -> Point {
        let (x, y) = Self::point(self.radius, degrees);
        Point::from_f64(x - self.origin.0, y - self.origin.1)
    }
}

fn orbiting_labels(
    clock: &WallClock,
    config: &DisplayConfig,
    ring: &Ring,
) -> (LabelPlacement, LabelPlacement) {
    let anchor = config.label_anchor();
    let current = LabelPlacement {
        top_left: anchor + ring.offset(ring.hour_mark),
        text: HourText::format(clock.hour24(), config.use_24h),
    };
    let next = LabelPlacement {
        top_left: anchor + ring.offset(ring.hour_mark + HOUR_STEP_DEGREES),
        text: HourText::format(clock.next_hour24(), config.use_24h),
    };
    (current, next)
}

fn tick_ring(config: &DisplayConfig, ring: &Ring) -> [TickMark; TICK_COUNT] {
    let anchor = config.tick_anchor();
    let full_turn = FULL_TURN_DEGREES as f64;

    std::array::from_fn(|i| {
        let (sector, step) = (i / TICK_RADII.len(), i % TICK_RADII.len());
        let degrees = ring.hour_mark
            + sector as f64 * TICK_SECTOR_TURN * full_turn
            + (step + 1) as f64 * TICK_STEP_TURN * full_turn;
        TickMark {
            center: anchor + ring.offset(degrees),
            dot_radius: TICK_RADII[step],
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn clock(h: u32, m: u32) -> WallClock {
        WallClock::new(h, m).unwrap()
    }

    fn all_clocks() -> impl Iterator<Item = WallClock> {
        (0..24).flat_map(|h| (0..60).map(move |m| clock(h, m)))
    }

    #[test]
    fn test_indicator_angle_formula() {
        for c in all_clocks() {
            let angle = indicator_angle(&c);
            let expected = ((c.hour24() % 12) * 60 + c.minute()) * 360 / 720;
            assert_eq!(angle, expected, "{c}");
            assert!(angle < 360, "{c}");
        }
    }

    #[test]
    fn test_indicator_angle_samples() {
        let cases = vec![
            (clock(0, 0), 0),
            (clock(12, 0), 0),
            (clock(3, 0), 90),
            (clock(6, 1), 180),
            (clock(14, 30), 75),
            (clock(23, 59), 359),
        ];

        for (c, expected) in cases {
            assert_eq!(indicator_angle(&c), expected, "{c}");
        }
    }

    #[test]
    fn test_rotation_is_continuous_across_hours() {
        for h in 0..24 {
            let before = indicator_angle(&clock(h, 59)) as i32;
            let after = indicator_angle(&clock((h + 1) % 24, 0)) as i32;
            let step = (after - before).rem_euclid(360);
            assert!(step <= 1, "{h}:59 -> {}:00 jumped {step}", (h + 1) % 24);
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        let config = DisplayConfig::default();
        for c in all_clocks() {
            assert_eq!(
                FaceGeometry::compute(&c, &config),
                FaceGeometry::compute(&c, &config)
            );
        }
    }

    #[test]
    fn test_screen_radians_points_up_and_wraps() {
        let cases = vec![
            (0.0, FRAC_PI_2),
            (90.0, 0.0),
            (180.0, 3.0 * FRAC_PI_2),
            (270.0, PI),
        ];

        for (degrees, expected) in cases {
            let theta = screen_radians(degrees);
            assert!((theta - expected).abs() < 1e-9, "{degrees} -> {theta}");
            assert!((0.0..TAU).contains(&theta));
        }
    }

    #[test]
    fn test_end_to_end_half_past_two() {
        let config = DisplayConfig::default();
        let face = FaceGeometry::compute(&clock(14, 30), &config);

        assert_eq!(face.indicator.rotation_degrees, 75);
        assert_eq!(face.hour_label.text.as_str(), "2");
        assert_eq!(face.next_hour_label.text.as_str(), "3");
        // anchor (52, 69); hour mark at 60 deg, next at 90 deg, time at 75 deg
        assert_eq!(face.hour_label.top_left, Point::new(40, 39));
        assert_eq!(face.next_hour_label.top_left, Point::new(56, 101));
    }

    #[test]
    fn test_label_sits_on_anchor_at_the_hour() {
        let config = DisplayConfig::default();
        for h in 0..24 {
            let face = FaceGeometry::compute(&clock(h, 0), &config);
            assert_eq!(face.hour_label.top_left, config.label_anchor(), "{h}:00");
        }
    }

    #[test]
    fn test_next_hour_label_wraps_at_midnight() {
        let twelve = DisplayConfig::default();
        let face = FaceGeometry::compute(&clock(23, 15), &twelve);
        assert_eq!(face.hour_label.text.as_str(), "11");
        assert_eq!(face.next_hour_label.text.as_str(), "12");

        let twenty_four = DisplayConfig {
            use_24h: true,
            ..twelve
        };
        let face = FaceGeometry::compute(&clock(23, 15), &twenty_four);
        assert_eq!(face.hour_label.text.as_str(), "23");
        assert_eq!(face.next_hour_label.text.as_str(), "00");
    }

    #[test]
    fn test_tick_ring_layout() {
        let config = DisplayConfig::default();
        let face = FaceGeometry::compute(&clock(3, 0), &config);

        let radii: Vec<i32> = face.ticks.iter().map(|t| t.dot_radius).collect();
        assert_eq!(radii, vec![3, 5, 3, 3, 5, 3, 3, 5, 3]);

        // at 3:00 the time point is the 90 deg mark and the first dot sits
        // 15 deg further round
        let r = config.ring_radius as f64;
        let first = face.ticks[0].center - config.tick_anchor();
        let expected_x = r * 105f64.to_radians().sin() - r;
        let expected_y = -r * 105f64.to_radians().cos();
        assert_eq!(first, Point::from_f64(expected_x, expected_y));
    }

    #[test]
    fn test_ticks_stay_on_the_ring() {
        let config = DisplayConfig::default();
        let diameter = 2 * config.ring_radius + 1;
        for c in all_clocks() {
            for tick in FaceGeometry::compute(&c, &config).ticks {
                let d = tick.center - config.tick_anchor();
                assert!(d.x.abs() <= diameter && d.y.abs() <= diameter, "{c}: {d:?}");
            }
        }
    }

    #[test]
    fn test_indicator_points_rotate_clockwise() {
        let center = Point::new(72, 84);
        let upright = IndicatorGeometry { rotation_degrees: 0 };
        assert_eq!(upright.points(center)[2], Point::new(74, -41));

        let quarter = IndicatorGeometry { rotation_degrees: 90 };
        // the narrow tip now points right
        assert_eq!(quarter.points(center)[2], Point::new(197, 86));
    }

    #[test]
    fn test_extreme_layout_saturates() {
        let cases = vec![i32::MAX, i32::MIN, -125, 0];

        for ring_radius in cases {
            let config = DisplayConfig {
                ring_radius,
                screen_center: Point::new(i32::MAX, i32::MIN),
                ..DisplayConfig::default()
            };
            for clock in [clock(0, 0), clock(6, 0), clock(9, 45)] {
                let face = FaceGeometry::compute(&clock, &config);
                assert_eq!(face, FaceGeometry::compute(&clock, &config), "{ring_radius}");
            }
        }

        assert_eq!(
            Point::new(i32::MAX, 5) + Point::new(1, i32::MIN),
            Point::new(i32::MAX, i32::MIN + 5)
        );
        assert_eq!(
            Point::new(i32::MIN, 0) - Point::new(1, i32::MIN),
            Point::new(i32::MIN, i32::MAX)
        );
    }

    #[test]
    fn test_with_layout_keeps_notation() {
        let current = DisplayConfig {
            use_24h: true,
            ..DisplayConfig::default()
        };
        let layout = DisplayConfig {
            ring_radius: 200,
            ..DisplayConfig::default()
        };
        let merged = current.with_layout(&layout);
        assert!(merged.use_24h);
        assert_eq!(merged.ring_radius, 200);
    }
}

#![allow(unused)]

use circle_skills::{EventKind, TimedEvent, Vec2};

pub const RADIUS: f64 = 30.0;
pub const APPROACH_WINDOW: f64 = 600.0;
pub const HIT_WINDOW: f64 = 50.0;

pub fn circle(offset: f64, x: f64, y: f64) -> TimedEvent {
    TimedEvent {
        offset,
        pos: Vec2::new(x, y),
        radius: RADIUS,
        approach_window: APPROACH_WINDOW,
        hit_window: HIT_WINDOW,
        kind: EventKind::Circle,
    }
}

pub fn spinner(offset: f64) -> TimedEvent {
    TimedEvent {
        kind: EventKind::Spinner,
        ..circle(offset, 256.0, 192.0)
    }
}

/// Back and forth jumps of the given spacing.
pub fn jumps(count: usize, delay: f64, spacing: f64) -> Vec<TimedEvent> {
    (0..count)
        .map(|i| circle(i as f64 * delay, (i % 2) as f64 * spacing, 192.0))
        .collect()
}

/// Evenly spaced events in a straight line.
pub fn stream(count: usize, delay: f64, spacing: f64) -> Vec<TimedEvent> {
    (0..count)
        .map(|i| circle(i as f64 * delay, i as f64 * spacing, 192.0))
        .collect()
}

pub trait Float: Copy + std::fmt::Display {
    const EPSILON: Self;

    fn not_eq(self, other: Self) -> bool;
}

impl Float for f64 {
    const EPSILON: Self = 1e-9;

    fn not_eq(self, other: Self) -> bool {
        (self - other).abs() >= Self::EPSILON
    }
}

#[track_caller]
pub fn assert_eq_float<F: Float>(actual: F, expected: F) {
    assert!(
        !actual.not_eq(expected),
        "actual={actual} | expected={expected}"
    );
}

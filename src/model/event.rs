use crate::util::vector::Vec2;

/// A single timed input event of a map.
///
/// All values are expected to already have modifiers applied, i.e. offsets
/// are scaled by the clock rate and sizes and windows are adjusted for
/// difficulty-changing mods.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEvent {
    /// Time of the event in milliseconds.
    pub offset: f64,
    pub pos: Vec2,
    /// Radius around `pos` within which the event is hit.
    pub radius: f64,
    /// Duration in milliseconds for which the event is visible before its
    /// offset.
    pub approach_window: f64,
    /// Timing tolerance in milliseconds.
    pub hit_window: f64,
    pub kind: EventKind,
}

impl TimedEvent {
    /// Whether the event is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, EventKind::Spinner)
    }

    /// The time at which the event becomes visible.
    pub fn visible_from(&self) -> f64 {
        self.offset - self.approach_window
    }
}

/// The type of a [`TimedEvent`].
///
/// Spinners carry no meaningful position or size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    #[default]
    Circle,
    Slider,
    Spinner,
}

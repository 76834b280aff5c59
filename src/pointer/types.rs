use core::fmt;
use core::ops::BitOr;

use crate::error::SampleError;

pub type PointerId = u64;

/// One observed pointer position. Immutable once recorded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionSample {
    x: f64,
    y: f64,
    t_ms: u64,
}

impl PositionSample {
    pub fn new(x: f64, y: f64, t_ms: u64) -> Result<Self, SampleError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(SampleError::NonFiniteCoordinate { x, y });
        }
        Ok(Self { x, y, t_ms })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn t_ms(&self) -> u64 {
        self.t_ms
    }
}

/// Displacement, speed and duration between two samples.
///
/// Speeds are in px/ms. A zero `duration_ms` yields zero speeds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Movement {
    pub dx: f64,
    pub dy: f64,
    pub distance: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub speed_total: f64,
    pub duration_ms: u64,
}

/// Swipe direction flags. Only one flag is ever set by classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Self = Self(0);
    pub const TOP: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const BOTTOM: Self = Self(4);
    pub const LEFT: Self = Self(8);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NONE => "none",
            Self::TOP => "top",
            Self::RIGHT => "right",
            Self::BOTTOM => "bottom",
            Self::LEFT => "left",
            _ => "mixed",
        }
    }
}

impl BitOr for Direction {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerState {
    Start,
    Pressing,
    Tipping,
    Dragging,
    Swiping,
    End,
}

impl PointerState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pressing => "pressing",
            Self::Tipping => "tipping",
            Self::Dragging => "dragging",
            Self::Swiping => "swiping",
            Self::End => "end",
        }
    }
}

impl fmt::Display for PointerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Notification channel published by a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Pressed,
    Tapped,
    Tipped,
    Untipped,
    Swiped,
    DragStarted,
    Dragged,
    DragStopped,
    Released,
}

impl Channel {
    pub const ALL: [Channel; 9] = [
        Channel::Pressed,
        Channel::Tapped,
        Channel::Tipped,
        Channel::Untipped,
        Channel::Swiped,
        Channel::DragStarted,
        Channel::Dragged,
        Channel::DragStopped,
        Channel::Released,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pressed => "pressed",
            Self::Tapped => "tapped",
            Self::Tipped => "tipped",
            Self::Untipped => "untipped",
            Self::Swiped => "swiped",
            Self::DragStarted => "drag_started",
            Self::Dragged => "dragged",
            Self::DragStopped => "drag_stopped",
            Self::Released => "released",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.label() == label.trim())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session state captured when a notification is emitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub channel: Channel,
    /// Timestamp of the triggering sample, or the deadline for `tipped`.
    pub t_ms: u64,
    pub identifier: PointerId,
    pub state: PointerState,
    pub position: PositionSample,
    pub direction: Direction,
    pub is_tipping: bool,
    pub absolute_movement: Movement,
    pub relative_movement: Movement,
}

/// Notifications fired by one call into a session, in dispatch order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOutput {
    pub snapshots: [Option<SessionSnapshot>; 3],
}

impl PointerOutput {
    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.snapshots().map(|snapshot| snapshot.channel)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &SessionSnapshot> + '_ {
        self.snapshots.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.iter().all(Option::is_none)
    }
}

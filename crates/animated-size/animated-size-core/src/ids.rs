//! Axis names and timer identifiers.

use serde::{Deserialize, Serialize};

/// One of the two animated dimensions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Width, Axis::Height];

    /// CSS property name for this axis.
    #[inline]
    pub fn property_name(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }
}

/// Host-assigned handle of a scheduled timer, used to cancel it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Identifies which completion a timer stands for.
///
/// The generation increases every time an axis schedules a timer, so a timer
/// that fires after being superseded no longer matches its tracker.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerToken {
    pub axis: Axis,
    pub generation: u32,
}

/// Monotonic generation counter for one axis.
#[derive(Default, Debug)]
pub struct Generation {
    next: u32,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn bump(&mut self) -> u32 {
        self.next = self.next.wrapping_add(1);
        self.next
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.next
    }
}

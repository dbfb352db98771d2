//! Capabilities the animator borrows from its host.
//!
//! The browser adapter backs these with `performance.now()`, `setTimeout`,
//! `ResizeObserver` and the element's inline style; tests back them with a
//! manual clock and an in-memory element.

use serde::{Deserialize, Serialize};

use crate::ids::{TimerHandle, TimerToken};

/// Measured box size in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Milliseconds since an arbitrary, fixed origin.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// One-shot timers. When a timer fires the host hands its token back through
/// [`crate::SizeAnimator::on_timer`].
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, token: TimerToken) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// The element whose inline style the animator owns.
pub trait StyleElement {
    /// Natural (content-driven) size of the measured box.
    fn natural_size(&self) -> Size;
    fn set_property(&self, name: &str, value: &str);
    fn remove_property(&self, name: &str);
}

/// Everything the animator needs from its environment.
pub trait Host: Clock + Scheduler {
    type Element: StyleElement;

    /// Start delivering size changes of `element` through
    /// [`crate::SizeAnimator::on_resize`].
    fn observe(&mut self, element: &Self::Element);
    fn unobserve(&mut self, element: &Self::Element);

    /// Ask the caller to render again. May run synchronously or later.
    fn invalidate(&mut self);
}

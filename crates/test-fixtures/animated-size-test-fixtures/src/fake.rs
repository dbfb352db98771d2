//! Deterministic host for driving a `SizeAnimator` without a browser.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use animated_size_core::{
    Clock, Host, Scheduler, Size, SizeAnimator, StyleElement, TimerHandle, TimerToken,
};

/// One imperative style mutation, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleWrite {
    Set(String, String),
    Remove(String),
}

#[derive(Debug, Default)]
struct ElementState {
    natural: Size,
    style: BTreeMap<String, String>,
    writes: Vec<StyleWrite>,
}

/// In-memory element. Clones share state so a test keeps a handle after
/// giving one to the animator.
#[derive(Clone, Debug, Default)]
pub struct FakeElement {
    state: Rc<RefCell<ElementState>>,
}

impl FakeElement {
    pub fn new(width: f64, height: f64) -> Self {
        let el = Self::default();
        el.set_natural_size(width, height);
        el
    }

    pub fn set_natural_size(&self, width: f64, height: f64) {
        self.state.borrow_mut().natural = Size::new(width, height);
    }

    /// Current inline value of `name`.
    pub fn style(&self, name: &str) -> Option<String> {
        self.state.borrow().style.get(name).cloned()
    }

    pub fn writes(&self) -> Vec<StyleWrite> {
        self.state.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.state.borrow_mut().writes.clear();
    }
}

impl StyleElement for FakeElement {
    fn natural_size(&self) -> Size {
        self.state.borrow().natural
    }

    fn set_property(&self, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state.style.insert(name.to_string(), value.to_string());
        state
            .writes
            .push(StyleWrite::Set(name.to_string(), value.to_string()));
    }

    fn remove_property(&self, name: &str) {
        let mut state = self.state.borrow_mut();
        state.style.remove(name);
        state.writes.push(StyleWrite::Remove(name.to_string()));
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    handle: TimerHandle,
    due: f64,
    token: TimerToken,
}

/// Manual clock, manual timer queue and an invalidation counter.
#[derive(Debug, Default)]
pub struct FakeHost {
    now: f64,
    next_handle: u32,
    pending: Vec<PendingTimer>,
    pub invalidations: usize,
    pub observing: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    /// Delay of every pending timer relative to now, soonest first.
    pub fn pending_delays(&self) -> Vec<f64> {
        let mut delays: Vec<f64> = self.pending.iter().map(|t| t.due - self.now).collect();
        delays.sort_by(f64::total_cmp);
        delays
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to it.
    fn pop_due(&mut self, until: f64) -> Option<TimerToken> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by(|a, b| a.1.due.total_cmp(&b.1.due))
            .map(|(i, _)| i)?;
        let timer = self.pending.remove(idx);
        self.now = self.now.max(timer.due);
        Some(timer.token)
    }
}

impl Clock for FakeHost {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

impl Scheduler for FakeHost {
    fn schedule(&mut self, delay_ms: u32, token: TimerToken) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.pending.push(PendingTimer {
            handle,
            due: self.now + f64::from(delay_ms),
            token,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|t| t.handle != handle);
    }
}

impl Host for FakeHost {
    type Element = FakeElement;

    fn observe(&mut self, _element: &FakeElement) {
        self.observing = true;
    }

    fn unobserve(&mut self, _element: &FakeElement) {
        self.observing = false;
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

/// Move the clock forward by `ms`, firing due timers in order at their due
/// time. Returns how many timers the animator accepted.
pub fn advance(animator: &mut SizeAnimator<FakeHost>, ms: f64) -> usize {
    let until = animator.host().now() + ms;
    let mut fired = 0;
    while let Some(token) = animator.host_mut().pop_due(until) {
        if animator.on_timer(token) {
            fired += 1;
        }
    }
    animator.host_mut().now = until;
    fired
}

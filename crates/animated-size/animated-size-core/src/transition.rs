//! Per-axis transition bookkeeping.
//!
//! Two states: Idle (no start time, no transition string) and Animating.
//! The tracker never evaluates easing; it only decides which `transition`
//! value the host's native engine should see and when the run is over.

use log::{debug, trace};

use crate::factor::Factor;
use crate::host::{Clock, Scheduler};
use crate::ids::{Axis, Generation, TimerHandle, TimerToken};

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Idle,
    Animating { started_at: f64, transition: String },
}

/// Transition state for one axis.
#[derive(Debug)]
pub struct TransitionTracker {
    axis: Axis,
    previous: Factor,
    phase: Phase,
    generation: Generation,
    timer: Option<TimerHandle>,
}

/// Whole milliseconds between `started_at` and `now`, never negative.
fn elapsed_ms(started_at: f64, now: f64) -> u64 {
    let elapsed = now - started_at;
    if elapsed > 0.0 {
        elapsed as u64
    } else {
        0
    }
}

/// `"<duration>ms <curve> <delay>ms"` for the part of `factor` left after `elapsed`.
fn timing_string(factor: &Factor, elapsed: u64) -> String {
    let duration = u64::from(factor.duration_ms);
    let delay = u64::from(factor.delay_ms);
    let left = (duration + delay).saturating_sub(elapsed);
    let new_delay = delay.saturating_sub(elapsed);
    let new_duration = duration.min(left);
    format!("{new_duration}ms {} {new_delay}ms", factor.curve)
}

impl TransitionTracker {
    /// The first factor is the baseline; it never starts a transition.
    pub fn new(axis: Axis, initial: Factor) -> Self {
        Self {
            axis,
            previous: initial,
            phase: Phase::Idle,
            generation: Generation::new(),
            timer: None,
        }
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Factor from the latest comparison.
    #[inline]
    pub fn factor(&self) -> &Factor {
        &self.previous
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    /// Timing part of the transition, e.g. `300ms ease 0ms`.
    pub fn transition(&self) -> Option<&str> {
        match &self.phase {
            Phase::Animating { transition, .. } => Some(transition.as_str()),
            Phase::Idle => None,
        }
    }

    pub fn started_at(&self) -> Option<f64> {
        match self.phase {
            Phase::Animating { started_at, .. } => Some(started_at),
            Phase::Idle => None,
        }
    }

    /// Compare `factor` with the previous one and (re)start, continue or drop
    /// the transition. Returns true when the transition state was recomputed.
    ///
    /// A size change always qualifies. Timing-only changes qualify while
    /// animating, so a new curve or duration takes effect mid-flight.
    pub fn observe<S>(&mut self, factor: &Factor, host: &mut S) -> bool
    where
        S: Clock + Scheduler + ?Sized,
    {
        let qualifies = factor.size != self.previous.size
            || (self.is_animating() && *factor != self.previous);
        self.previous = factor.clone();
        if !qualifies {
            return false;
        }

        self.cancel_timer(host);
        let total = u64::from(factor.total_ms());
        if total == 0 {
            debug!("{:?}: zero-length transition, idle", self.axis);
            self.phase = Phase::Idle;
            return true;
        }

        let now = host.now_ms();
        match self.phase {
            Phase::Animating { started_at, .. } => {
                // Interrupted: keep the original start so the run continues
                // from its present offset instead of restarting.
                let elapsed = elapsed_ms(started_at, now);
                let remaining = total.saturating_sub(elapsed);
                if remaining == 0 {
                    debug!("{:?}: interrupted after {elapsed}ms with nothing left", self.axis);
                    self.phase = Phase::Idle;
                } else {
                    let transition = timing_string(factor, elapsed);
                    debug!("{:?}: interrupted after {elapsed}ms -> {transition}", self.axis);
                    self.phase = Phase::Animating {
                        started_at,
                        transition,
                    };
                    self.schedule(remaining, host);
                }
            }
            Phase::Idle => {
                let transition = timing_string(factor, 0);
                debug!("{:?}: start {transition}", self.axis);
                self.phase = Phase::Animating {
                    started_at: now,
                    transition,
                };
                self.schedule(total, host);
            }
        }
        true
    }

    /// Recompute the in-flight transition after the resolved length moved
    /// under it. Returns false when idle.
    pub fn adjust_for_interruption(&mut self, now: f64) -> bool {
        let Phase::Animating { started_at, .. } = self.phase else {
            return false;
        };
        let elapsed = elapsed_ms(started_at, now);
        let transition = timing_string(&self.previous, elapsed);
        trace!("{:?}: length moved at {elapsed}ms -> {transition}", self.axis);
        self.phase = Phase::Animating {
            started_at,
            transition,
        };
        true
    }

    /// Completion timer fired. Stale tokens are ignored.
    pub fn complete(&mut self, token: TimerToken) -> bool {
        if token.axis != self.axis
            || token.generation != self.generation.current()
            || !self.is_animating()
        {
            trace!("{:?}: stale timer {:?} ignored", self.axis, token);
            return false;
        }
        debug!("{:?}: transition complete", self.axis);
        self.timer = None;
        self.phase = Phase::Idle;
        true
    }

    /// Host reported the native transition for this axis as ended.
    pub fn finish<S>(&mut self, host: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        if !self.is_animating() {
            return false;
        }
        debug!("{:?}: transition ended by host", self.axis);
        self.cancel_timer(host);
        self.phase = Phase::Idle;
        true
    }

    /// Drop any transition and cancel its timer.
    pub fn reset<S>(&mut self, host: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.cancel_timer(host);
        self.phase = Phase::Idle;
    }

    fn schedule<S>(&mut self, delay_ms: u64, host: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        let token = TimerToken {
            axis: self.axis,
            generation: self.generation.bump(),
        };
        let delay_ms = u32::try_from(delay_ms).unwrap_or(u32::MAX);
        self.timer = Some(host.schedule(delay_ms, token));
    }

    fn cancel_timer<S>(&mut self, host: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if let Some(handle) = self.timer.take() {
            host.cancel(handle);
        }
        // Anything already queued under the old generation is now stale.
        self.generation.bump();
    }
}

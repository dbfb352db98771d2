//! SizeAnimator: owns per-axis transition and auto state, the size observer and
//! the style written to the attached element.
//!
//! Driven by explicit events:
//! - `update` once per caller render (new factors and override style)
//! - `on_resize` when the host observed a size change
//! - `on_timer` / `on_transition_end` when a transition is over
//!
//! Every event ends with one merged style, diffed against what the element
//! already carries, so unchanged properties are never rewritten.

use log::{debug, trace};

use crate::config::Config;
use crate::factor::{Factor, FactorInput};
use crate::host::{Host, Size, StyleElement};
use crate::ids::{Axis, TimerToken};
use crate::length::{resolve_length, transition_shorthand};
use crate::observer::SizeObserver;
use crate::style::{OutputStyle, StyleOverrides, StyleProperty, StyleValue};
use crate::transition::TransitionTracker;

/// Transition and auto state of one axis.
#[derive(Debug)]
struct AxisState {
    tracker: TransitionTracker,
    /// Reporting natural size (true) or pinned to a concrete length (false).
    auto: bool,
}

impl AxisState {
    fn new(axis: Axis, factor: Factor) -> Self {
        Self {
            auto: factor.is_auto(),
            tracker: TransitionTracker::new(axis, factor),
        }
    }

    /// Auto may only turn on once no transition is in flight, or the CSS
    /// transition would be cut short; it turns off as soon as a concrete
    /// target appears.
    fn settle(&mut self) -> bool {
        let want = if self.tracker.factor().is_auto() {
            self.auto || !self.tracker.is_animating()
        } else {
            false
        };
        let changed = want != self.auto;
        if changed {
            debug!("{:?}: auto {} -> {}", self.tracker.axis(), self.auto, want);
            self.auto = want;
        }
        changed
    }
}

pub struct SizeAnimator<H: Host> {
    host: H,
    cfg: Config,
    element: Option<H::Element>,
    observer: SizeObserver,
    width: AxisState,
    height: AxisState,
    overrides: StyleOverrides,
    /// Style from the latest pass.
    style: OutputStyle,
    /// Style currently written to the element.
    applied: OutputStyle,
}

impl<H: Host> SizeAnimator<H> {
    /// Create an animator; the initial factors decide the initial auto state
    /// and never start a transition themselves.
    pub fn new(host: H, cfg: Config, width: Factor, height: Factor) -> Self {
        let mut animator = Self {
            host,
            cfg,
            element: None,
            observer: SizeObserver::new(),
            width: AxisState::new(Axis::Width, width),
            height: AxisState::new(Axis::Height, height),
            overrides: StyleOverrides::new(),
            style: OutputStyle::default(),
            applied: OutputStyle::default(),
        };
        animator.style = animator.compute_style();
        animator
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn element(&self) -> Option<&H::Element> {
        self.element.as_ref()
    }

    /// Style from the latest pass, for declarative consumption.
    pub fn style(&self) -> &OutputStyle {
        &self.style
    }

    pub fn factor(&self, axis: Axis) -> &Factor {
        self.axis(axis).tracker.factor()
    }

    pub fn is_auto(&self, axis: Axis) -> bool {
        self.axis(axis).auto
    }

    pub fn is_animating(&self, axis: Axis) -> bool {
        self.axis(axis).tracker.is_animating()
    }

    /// Last measured natural size, `None` while detached.
    pub fn natural_size(&self) -> Option<Size> {
        self.observer.size()
    }

    /// Start managing `element`. A previously attached element is detached first.
    pub fn attach(&mut self, element: H::Element) {
        if self.element.is_some() {
            self.detach();
        }
        debug!("attach");
        self.observer.attach(&mut self.host, &element);
        self.element = Some(element);
        self.applied = OutputStyle::default();
        self.render();
        self.host.invalidate();
    }

    /// Stop managing the element. Properties written to it are removed,
    /// in-flight transitions are dropped and the natural size is forgotten.
    pub fn detach(&mut self) {
        let Some(element) = self.element.take() else {
            return;
        };
        debug!("detach");
        for prop in StyleProperty::ALL {
            if self.applied.get(prop).is_some() {
                trace!("remove {prop}");
                element.remove_property(prop.css_name());
            }
        }
        self.observer.detach(&mut self.host, &element);
        self.width.tracker.reset(&mut self.host);
        self.height.tracker.reset(&mut self.host);
        self.width.settle();
        self.height.settle();
        self.applied = OutputStyle::default();
        self.style = self.compute_style();
    }

    /// One caller render: compare factors, resolve, write, settle auto state.
    ///
    /// When the auto state flips the host is invalidated once; the length
    /// written in this pass is the bridge the next pass transitions from.
    pub fn update(
        &mut self,
        width: Factor,
        height: Factor,
        overrides: StyleOverrides,
    ) -> &OutputStyle {
        trace!("update width={:?} height={:?}", width.size, height.size);
        self.overrides = overrides;
        self.width.tracker.observe(&width, &mut self.host);
        self.height.tracker.observe(&height, &mut self.host);
        self.render();

        let flipped = self.width.settle() | self.height.settle();
        if flipped {
            self.host.invalidate();
        }
        &self.style
    }

    /// [`Self::update`] with partial factors completed from the config.
    pub fn update_input(
        &mut self,
        width: FactorInput,
        height: FactorInput,
        overrides: StyleOverrides,
    ) -> &OutputStyle {
        let width = width.resolve(&self.cfg);
        let height = height.resolve(&self.cfg);
        self.update(width, height, overrides)
    }

    /// The host saw the observed element resize.
    pub fn on_resize(&mut self) {
        let Some(element) = self.element.as_ref() else {
            return;
        };
        if !self.observer.measure(element) {
            return;
        }

        let now = self.host.now_ms();
        let mut retime = false;
        for axis in Axis::ALL {
            let prop = StyleProperty::from(axis);
            if self.overrides.contains(prop) {
                continue;
            }
            let natural = self.observer.get(axis);
            let state = match axis {
                Axis::Width => &mut self.width,
                Axis::Height => &mut self.height,
            };
            let length = resolve_length(&state.tracker.factor().size, natural, state.auto);
            if self.style.get(prop) != length.as_ref() {
                self.style.set(prop, length);
                retime |= state.tracker.adjust_for_interruption(now);
            }
        }
        if retime && !self.overrides.contains(StyleProperty::Transition) {
            self.style.transition = self.transition_value();
        }
        self.apply();
        self.host.invalidate();
    }

    /// A completion timer fired. Returns false for stale tokens.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        let state = match token.axis {
            Axis::Width => &mut self.width,
            Axis::Height => &mut self.height,
        };
        if !state.tracker.complete(token) {
            return false;
        }
        self.after_completion();
        true
    }

    /// The host's native transition for `prop` ended on the element.
    pub fn on_transition_end(&mut self, prop: StyleProperty) -> bool {
        let state = match prop {
            StyleProperty::Width => &mut self.width,
            StyleProperty::Height => &mut self.height,
            _ => return false,
        };
        if !state.tracker.finish(&mut self.host) {
            return false;
        }
        self.after_completion();
        true
    }

    fn after_completion(&mut self) {
        self.width.settle();
        self.height.settle();
        self.render();
        self.host.invalidate();
    }

    fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Width => &self.width,
            Axis::Height => &self.height,
        }
    }

    fn render(&mut self) {
        self.style = self.compute_style();
        self.apply();
    }

    fn compute_style(&self) -> OutputStyle {
        let mut style = OutputStyle::default();
        for axis in Axis::ALL {
            let prop = StyleProperty::from(axis);
            let value = if self.overrides.contains(prop) {
                self.overrides.get(prop).cloned()
            } else {
                let state = self.axis(axis);
                resolve_length(
                    &state.tracker.factor().size,
                    self.observer.get(axis),
                    state.auto,
                )
            };
            style.set(prop, value);
        }
        style.transition = if self.overrides.contains(StyleProperty::Transition) {
            self.overrides.get(StyleProperty::Transition).cloned()
        } else {
            self.transition_value()
        };
        style.will_change = if self.overrides.contains(StyleProperty::WillChange) {
            self.overrides.get(StyleProperty::WillChange).cloned()
        } else {
            self.will_change_hint()
        };
        style
    }

    /// Combined `transition` of the axes the animator owns; `None` when empty.
    fn transition_value(&self) -> Option<StyleValue> {
        let owned = |axis: Axis| {
            if self.overrides.contains(StyleProperty::from(axis)) {
                None
            } else {
                self.axis(axis).tracker.transition()
            }
        };
        let shorthand = transition_shorthand(owned(Axis::Width), owned(Axis::Height));
        (!shorthand.is_empty()).then(|| StyleValue::Text(shorthand))
    }

    fn will_change_hint(&self) -> Option<StyleValue> {
        let owned = |axis: Axis| !self.overrides.contains(StyleProperty::from(axis));
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if self.element.is_none() {
            // Not mounted yet: both lengths are about to be written.
            parts.extend(
                Axis::ALL
                    .into_iter()
                    .filter(|a| owned(*a))
                    .map(Axis::property_name),
            );
        } else {
            parts.extend(
                Axis::ALL
                    .into_iter()
                    .filter(|a| owned(*a) && self.axis(*a).tracker.is_animating())
                    .map(Axis::property_name),
            );
            if !parts.is_empty() && !self.overrides.contains(StyleProperty::Transition) {
                parts.push("transition");
            }
        }
        (!parts.is_empty()).then(|| StyleValue::Text(parts.join(", ")))
    }

    /// Write properties whose value changed since the last write. Properties
    /// without a value are removed so native layout resumes.
    fn apply(&mut self) {
        let Some(element) = self.element.as_ref() else {
            return;
        };
        for prop in StyleProperty::ALL {
            if self.overrides.contains(prop) {
                // Ceded to the caller.
                self.applied.set(prop, None);
                continue;
            }
            let next = self.style.get(prop);
            if next == self.applied.get(prop) {
                continue;
            }
            match next {
                Some(value) => {
                    let css = value.to_css();
                    trace!("set {prop}: {css}");
                    element.set_property(prop.css_name(), &css);
                }
                None => {
                    trace!("remove {prop}");
                    element.remove_property(prop.css_name());
                }
            }
            self.applied.set(prop, next.cloned());
        }
    }
}

impl<H: Host> Drop for SizeAnimator<H> {
    fn drop(&mut self) {
        self.width.tracker.reset(&mut self.host);
        self.height.tracker.reset(&mut self.host);
        if let Some(element) = self.element.take() {
            self.host.unobserve(&element);
        }
    }
}

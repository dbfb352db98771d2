//! Browser implementation of the animator's host traits.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use hashbrown::HashMap;
use log::{trace, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ResizeObserver, TransitionEvent, Window};

use animated_size_core::{
    Clock, Host, Scheduler, Size, SizeAnimator, StyleElement, StyleProperty, TimerHandle,
    TimerToken,
};

pub type SharedAnimator = Rc<RefCell<SizeAnimator<WebHost>>>;
type WeakAnimator = Weak<RefCell<SizeAnimator<WebHost>>>;

/// Returned when `setTimeout` itself failed; cancelling it is a no-op.
const NO_TIMER: TimerHandle = TimerHandle(u32::MAX);

/// Styled wrapper plus the inner box whose natural size is measured. They
/// must differ: measuring the wrapper would read back the pinned length.
pub struct WebElement {
    target: HtmlElement,
    content: HtmlElement,
}

impl WebElement {
    /// `content` defaults to the first element child of `target`. Returns
    /// `None` when there is no separate box to measure.
    pub fn new(target: HtmlElement, content: Option<HtmlElement>) -> Option<Self> {
        let content = match content {
            Some(content) => content,
            None => target.first_element_child()?.dyn_into::<HtmlElement>().ok()?,
        };
        if content == target {
            return None;
        }
        Some(Self { target, content })
    }
}

impl StyleElement for WebElement {
    fn natural_size(&self) -> Size {
        Size::new(
            f64::from(self.content.offset_width()),
            f64::from(self.content.offset_height()),
        )
    }

    fn set_property(&self, name: &str, value: &str) {
        if let Err(e) = self.target.style().set_property(name, value) {
            warn!("style.setProperty({name}, {value}) failed: {e:?}");
        }
    }

    fn remove_property(&self, name: &str) {
        if let Err(e) = self.target.style().remove_property(name) {
            warn!("style.removeProperty({name}) failed: {e:?}");
        }
    }
}

/// Run `f` on the animator unless it is gone or already borrowed.
fn with_animator(this: &WeakAnimator, f: impl FnOnce(&mut SizeAnimator<WebHost>)) {
    let Some(animator) = this.upgrade() else {
        return;
    };
    if let Ok(mut animator) = animator.try_borrow_mut() {
        f(&mut animator);
    } else {
        warn!("animator busy; dropped host callback");
    };
}

struct Observation {
    observer: ResizeObserver,
    _on_resize: Closure<dyn FnMut(js_sys::Array)>,
    target: HtmlElement,
    on_transition_end: Closure<dyn FnMut(TransitionEvent)>,
}

pub struct WebHost {
    window: Window,
    this: WeakAnimator,
    observation: Option<Observation>,
    timers: HashMap<i32, Closure<dyn FnMut()>>,
    /// Timer ids whose closures have returned and can be dropped.
    fired: Rc<RefCell<Vec<i32>>>,
    invalidator: Closure<dyn FnMut()>,
    /// Pending `setTimeout(invalidator, 0)`, so bursts coalesce.
    invalidate_pending: Rc<Cell<Option<i32>>>,
}

impl WebHost {
    pub fn new(window: Window, this: WeakAnimator, on_invalidate: js_sys::Function) -> Self {
        let invalidate_pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let pending = invalidate_pending.clone();
        let invalidator = Closure::wrap(Box::new(move || {
            pending.set(None);
            if let Err(e) = on_invalidate.call0(&JsValue::UNDEFINED) {
                warn!("invalidate callback threw: {e:?}");
            }
        }) as Box<dyn FnMut()>);
        Self {
            window,
            this,
            observation: None,
            timers: HashMap::new(),
            fired: Rc::new(RefCell::new(Vec::new())),
            invalidator,
            invalidate_pending,
        }
    }

    fn retire_fired(&mut self) {
        for id in self.fired.borrow_mut().drain(..) {
            self.timers.remove(&id);
        }
    }
}

impl Clock for WebHost {
    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

impl Scheduler for WebHost {
    fn schedule(&mut self, delay_ms: u32, token: TimerToken) -> TimerHandle {
        self.retire_fired();
        let this = self.this.clone();
        let fired = self.fired.clone();
        let id_cell = Rc::new(Cell::new(0));
        let own_id = id_cell.clone();
        let callback = Closure::wrap(Box::new(move || {
            with_animator(&this, |animator| {
                animator.on_timer(token);
            });
            // Retired on a later schedule; a closure must not drop itself.
            fired.borrow_mut().push(own_id.get());
        }) as Box<dyn FnMut()>);

        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(id) => {
                trace!("timer {id} in {delay_ms}ms for {token:?}");
                id_cell.set(id);
                self.timers.insert(id, callback);
                TimerHandle(id as u32)
            }
            Err(e) => {
                warn!("setTimeout failed: {e:?}");
                NO_TIMER
            }
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if handle == NO_TIMER {
            return;
        }
        let id = handle.0 as i32;
        self.window.clear_timeout_with_handle(id);
        self.timers.remove(&id);
        self.retire_fired();
    }
}

impl Host for WebHost {
    type Element = WebElement;

    fn observe(&mut self, element: &WebElement) {
        let this = self.this.clone();
        let on_resize = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            with_animator(&this, |animator| animator.on_resize());
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = match ResizeObserver::new(on_resize.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                warn!("ResizeObserver unavailable: {e:?}");
                return;
            }
        };
        observer.observe(&element.content);

        let this = self.this.clone();
        let target_js: JsValue = element.target.clone().into();
        let on_transition_end = Closure::wrap(Box::new(move |event: TransitionEvent| {
            // Transitions of descendants bubble up; only ours count.
            if event.target().map(JsValue::from).as_ref() != Some(&target_js) {
                return;
            }
            let Ok(prop) = event.property_name().parse::<StyleProperty>() else {
                return;
            };
            with_animator(&this, |animator| {
                animator.on_transition_end(prop);
            });
        }) as Box<dyn FnMut(TransitionEvent)>);
        if let Err(e) = element.target.add_event_listener_with_callback(
            "transitionend",
            on_transition_end.as_ref().unchecked_ref(),
        ) {
            warn!("transitionend listener failed: {e:?}");
        }

        self.observation = Some(Observation {
            observer,
            _on_resize: on_resize,
            target: element.target.clone(),
            on_transition_end,
        });
    }

    fn unobserve(&mut self, _element: &WebElement) {
        let Some(observation) = self.observation.take() else {
            return;
        };
        observation.observer.disconnect();
        let _ = observation.target.remove_event_listener_with_callback(
            "transitionend",
            observation.on_transition_end.as_ref().unchecked_ref(),
        );
    }

    fn invalidate(&mut self) {
        if self.invalidate_pending.get().is_some() {
            return;
        }
        match self
            .window
            .set_timeout_with_callback(self.invalidator.as_ref().unchecked_ref())
        {
            Ok(id) => self.invalidate_pending.set(Some(id)),
            Err(e) => warn!("setTimeout failed: {e:?}"),
        }
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        if let Some(id) = self.invalidate_pending.take() {
            self.window.clear_timeout_with_handle(id);
        }
        for id in self.timers.keys() {
            self.window.clear_timeout_with_handle(*id);
        }
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use animated_size_core::{
    Axis, Config, Factor, FactorInput, SizeAnimator, StyleOverrides, StyleProperty, StyleValue,
};

mod host;
mod logger;

pub use host::{SharedAnimator, WebElement, WebHost};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn parse_config(config: JsValue) -> Result<Config, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(Config::default());
    }
    swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))
}

/// Accepts `undefined`/`null` (all defaults) or a `{ size, duration, delay, curve }` object.
fn parse_factor(value: JsValue, cfg: &Config, what: &str) -> Result<Factor, JsError> {
    let input: FactorInput = if jsvalue_is_undefined_or_null(&value) {
        FactorInput::default()
    } else {
        swb::from_value(value).map_err(|e| JsError::new(&format!("{what} factor error: {e}")))?
    };
    input
        .validate()
        .map_err(|e| JsError::new(&format!("{what} factor error: {e}")))?;
    Ok(input.resolve(cfg))
}

/// Pick the animator's properties out of a full style object. Keys with
/// `undefined` values still count as present; other properties are ignored.
fn parse_overrides(style: &JsValue) -> StyleOverrides {
    let mut overrides = StyleOverrides::new();
    if jsvalue_is_undefined_or_null(style) || !style.is_object() {
        return overrides;
    }
    for entry in Object::entries(style.unchecked_ref::<Object>()).iter() {
        let entry: js_sys::Array = entry.unchecked_into();
        let Some(key) = entry.get(0).as_string() else {
            continue;
        };
        let Ok(prop) = key.parse::<StyleProperty>() else {
            continue;
        };
        let value = entry.get(1);
        let value = if let Some(px) = value.as_f64() {
            Some(StyleValue::Px(px))
        } else {
            value.as_string().map(StyleValue::Text)
        };
        overrides.insert(prop, value);
    }
    overrides
}

fn parse_axis(axis: &str) -> Result<Axis, JsError> {
    match axis {
        "width" => Ok(Axis::Width),
        "height" => Ok(Axis::Height),
        other => Err(JsError::new(&format!("unknown axis '{other}'"))),
    }
}

#[wasm_bindgen]
pub struct AnimatedSize {
    inner: SharedAnimator,
}

impl AnimatedSize {
    fn borrow_mut(&self) -> Result<std::cell::RefMut<'_, SizeAnimator<WebHost>>, JsError> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| JsError::new("AnimatedSize is busy (re-entrant call)"))
    }

    fn borrow(&self) -> Result<std::cell::Ref<'_, SizeAnimator<WebHost>>, JsError> {
        self.inner
            .try_borrow()
            .map_err(|_| JsError::new("AnimatedSize is busy (re-entrant call)"))
    }
}

#[wasm_bindgen]
impl AnimatedSize {
    /// Create an animator.
    ///
    /// `config` is optional JSON matching `Config`; `on_invalidate` is called
    /// (asynchronously) whenever the caller should render again; `width` and
    /// `height` are the initial factors.
    /// Example:
    ///   new AnimatedSize(undefined, () => rerender(), { size: 1 }, undefined)
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        on_invalidate: Function,
        width: JsValue,
        height: JsValue,
    ) -> Result<AnimatedSize, JsError> {
        console_error_panic_hook::set_once();
        logger::init();

        let cfg = parse_config(config)?;
        let width = parse_factor(width, &cfg, "width")?;
        let height = parse_factor(height, &cfg, "height")?;
        let window = web_sys::window().ok_or_else(|| JsError::new("no window available"))?;

        let inner = Rc::new_cyclic(|this| {
            RefCell::new(SizeAnimator::new(
                WebHost::new(window, this.clone(), on_invalidate),
                cfg,
                width,
                height,
            ))
        });
        Ok(AnimatedSize { inner })
    }

    /// Manage `target`'s inline width/height. `content` is the inner box
    /// measured for the natural size; defaults to `target`'s first element child.
    #[wasm_bindgen]
    pub fn attach(&self, target: HtmlElement, content: Option<HtmlElement>) -> Result<(), JsError> {
        let element = WebElement::new(target, content)
            .ok_or_else(|| JsError::new("attach needs a content element inside the target"))?;
        self.borrow_mut()?.attach(element);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn detach(&self) -> Result<(), JsError> {
        self.borrow_mut()?.detach();
        Ok(())
    }

    /// Run one render pass. `style` is the caller's style object; any of
    /// `width`, `height`, `transition`, `willChange` present there is left to
    /// the caller. Returns the style to apply: `{ width?, height?, transition?, willChange? }`.
    #[wasm_bindgen]
    pub fn update(&self, width: JsValue, height: JsValue, style: JsValue) -> Result<JsValue, JsError> {
        let mut animator = self.borrow_mut()?;
        let cfg = animator.config().clone();
        let width = parse_factor(width, &cfg, "width")?;
        let height = parse_factor(height, &cfg, "height")?;
        let overrides = parse_overrides(&style);
        let out = animator.update(width, height, overrides);
        swb::to_value(out).map_err(|e| JsError::new(&format!("style error: {e}")))
    }

    /// Style from the latest pass without running a new one.
    #[wasm_bindgen]
    pub fn style(&self) -> Result<JsValue, JsError> {
        let animator = self.borrow()?;
        swb::to_value(animator.style()).map_err(|e| JsError::new(&format!("style error: {e}")))
    }

    #[wasm_bindgen(js_name = isAuto)]
    pub fn is_auto(&self, axis: &str) -> Result<bool, JsError> {
        Ok(self.borrow()?.is_auto(parse_axis(axis)?))
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self, axis: &str) -> Result<bool, JsError> {
        Ok(self.borrow()?.is_animating(parse_axis(axis)?))
    }

    /// `{ width, height }` of the measured box, or `undefined` while detached.
    #[wasm_bindgen(js_name = naturalSize)]
    pub fn natural_size(&self) -> Result<JsValue, JsError> {
        match self.borrow()?.natural_size() {
            Some(size) => {
                swb::to_value(&size).map_err(|e| JsError::new(&format!("size error: {e}")))
            }
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Detach and cancel pending work. The object stays usable.
    #[wasm_bindgen]
    pub fn dispose(&self) -> Result<(), JsError> {
        self.detach()
    }
}

/// Set the console log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    logger::init();
    let filter =
        logger::parse_level(level).ok_or_else(|| JsError::new(&format!("unknown log level '{level}'")))?;
    log::set_max_level(filter);
    Ok(())
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

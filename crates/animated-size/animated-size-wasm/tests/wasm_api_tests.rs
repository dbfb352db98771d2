#![cfg(target_arch = "wasm32")]
use animated_size_wasm::{abi_version, set_log_level, AnimatedSize};
use serde::Serialize;
use serde_json::{json, Value};
use serde_wasm_bindgen as swb;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn js(v: Value) -> JsValue {
    v.serialize(&swb::Serializer::json_compatible()).unwrap()
}

fn noop() -> js_sys::Function {
    js_sys::Function::new_no_args("")
}

fn style_of(v: JsValue) -> Value {
    swb::from_value(v).unwrap()
}

/// Wrapper span plus a fixed-size content box, appended to the body.
fn mount(width: u32, height: u32) -> (HtmlElement, HtmlElement) {
    let document = web_sys::window().unwrap().document().unwrap();
    let target: HtmlElement = document.create_element("span").unwrap().unchecked_into();
    let content: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    let style = content.style();
    style.set_property("display", "block").unwrap();
    style.set_property("width", &format!("{width}px")).unwrap();
    style.set_property("height", &format!("{height}px")).unwrap();
    target.style().set_property("display", "inline-block").unwrap();
    target.append_child(&content).unwrap();
    document.body().unwrap().append_child(&target).unwrap();
    (target, content)
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    let a = AnimatedSize::new(JsValue::UNDEFINED, noop(), JsValue::UNDEFINED, JsValue::NULL);
    assert!(a.is_ok());
}

#[wasm_bindgen_test]
fn rejects_bad_config_and_factors() {
    assert!(AnimatedSize::new(js(json!({"default_duration_ms": "slow"})), noop(), JsValue::UNDEFINED, JsValue::UNDEFINED).is_err());
    let nan = js_sys::Object::new();
    js_sys::Reflect::set(&nan, &"size".into(), &JsValue::from_f64(f64::NAN)).unwrap();
    assert!(AnimatedSize::new(JsValue::UNDEFINED, noop(), nan.into(), JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn unmounted_style_is_a_hint() {
    let a = AnimatedSize::new(JsValue::UNDEFINED, noop(), JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap();
    let out = style_of(a.update(JsValue::UNDEFINED, JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap());
    assert_eq!(out, json!({"willChange": "width, height"}));
    assert_eq!(a.natural_size().unwrap(), JsValue::UNDEFINED);
}

#[wasm_bindgen_test]
fn attach_writes_resolved_lengths() {
    let (target, content) = mount(200, 80);
    let a = AnimatedSize::new(
        JsValue::UNDEFINED,
        noop(),
        js(json!({"size": 0.5})),
        js(json!({"size": "3em"})),
    )
    .unwrap();
    a.attach(target.clone(), Some(content)).unwrap();

    let natural = style_of(a.natural_size().unwrap());
    assert_eq!(natural["width"].as_f64(), Some(200.0));
    assert_eq!(natural["height"].as_f64(), Some(80.0));

    // Pixel lengths come back as numbers, text lengths verbatim.
    let out = style_of(a.style().unwrap());
    assert_eq!(out["width"].as_f64(), Some(100.0));
    assert_eq!(out["height"], json!("3em"));
    assert_eq!(target.style().get_property_value("width").unwrap(), "100px");
    assert_eq!(target.style().get_property_value("height").unwrap(), "3em");
    a.dispose().unwrap();
    target.remove();
}

#[wasm_bindgen_test]
fn change_starts_transition_and_overrides_win() {
    let (target, content) = mount(200, 80);
    let a = AnimatedSize::new(JsValue::UNDEFINED, noop(), js(json!({"size": 1})), JsValue::UNDEFINED).unwrap();
    a.attach(target.clone(), Some(content)).unwrap();

    let out = style_of(
        a.update(js(json!({"size": 0.5, "duration": 200})), JsValue::UNDEFINED, JsValue::UNDEFINED)
            .unwrap(),
    );
    assert!(a.is_animating("width").unwrap());
    assert_eq!(out["width"].as_f64(), Some(100.0));
    assert_eq!(out["transition"], json!("width 200ms ease 0ms"));
    assert_eq!(out["willChange"], json!("width, transition"));

    let overrides = js(json!({"transition": "none", "color": "red"}));
    let out = style_of(
        a.update(js(json!({"size": 0.5, "duration": 200})), JsValue::UNDEFINED, overrides).unwrap(),
    );
    assert_eq!(out["transition"], json!("none"));
    assert_eq!(out["willChange"], json!("width"));
    a.dispose().unwrap();
    target.remove();
}

#[wasm_bindgen_test]
fn axis_and_log_level_names_are_checked() {
    let a = AnimatedSize::new(JsValue::UNDEFINED, noop(), JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap();
    assert!(a.is_auto("depth").is_err());
    assert!(!a.is_auto("width").unwrap());
    assert!(set_log_level("debug").is_ok());
    assert!(set_log_level("loud").is_err());
    set_log_level("warn").unwrap();
}

#[wasm_bindgen_test]
fn attach_defaults_to_first_child_as_content() {
    let (target, _content) = mount(200, 80);
    let a = AnimatedSize::new(JsValue::UNDEFINED, noop(), js(json!({"size": 0.5})), JsValue::UNDEFINED).unwrap();
    a.attach(target.clone(), None).unwrap();

    // The pinned wrapper is not what gets measured.
    let natural = style_of(a.natural_size().unwrap());
    assert_eq!(natural["width"].as_f64(), Some(200.0));
    assert_eq!(target.style().get_property_value("width").unwrap(), "100px");
    a.dispose().unwrap();
    target.remove();
}

#[wasm_bindgen_test]
fn attach_rejects_target_without_separate_content() {
    let document = web_sys::window().unwrap().document().unwrap();
    let lone: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    let a = AnimatedSize::new(JsValue::UNDEFINED, noop(), JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap();
    assert!(a.attach(lone.clone(), None).is_err());
    assert!(a.attach(lone.clone(), Some(lone)).is_err());
    assert_eq!(a.natural_size().unwrap(), JsValue::UNDEFINED);
}

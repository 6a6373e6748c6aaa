#![cfg(target_arch = "wasm32")]

use ff_wasm::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlInputElement, ShadowRootInit, ShadowRootMode};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fresh_container(doc: &Document) -> Element {
    let container = doc.create_element("div").unwrap();
    doc.body().unwrap().append_child(&container).unwrap();
    container
}

fn input(doc: &Document, parent: &Element, attrs: &[(&str, &str)]) -> HtmlInputElement {
    let el = doc.create_element("input").unwrap();
    for (name, value) in attrs {
        el.set_attribute(name, value).unwrap();
    }
    parent.append_child(&el).unwrap();
    el.dyn_into::<HtmlInputElement>().unwrap()
}

fn get(object: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(object, &key.into()).unwrap()
}

#[wasm_bindgen_test]
fn test_capture_and_resolve() {
    let doc = document();
    let container = fresh_container(&doc);
    let el = input(&doc, &container, &[("id", "user_47291"), ("name", "wasm-email")]);

    let selector = compute_selector(&el).unwrap();
    assert_eq!(selector, r#"input[name="wasm-email"]"#);

    let found = resolve_selector(&selector, &doc).unwrap();
    assert!(found.is_same_node(Some(el.as_ref())));
    container.remove();
}

#[wasm_bindgen_test]
fn test_resolve_into_shadow_root() {
    let doc = document();
    let container = fresh_container(&doc);
    let host = doc.create_element("div").unwrap();
    container.append_child(&host).unwrap();
    let shadow = host
        .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
        .unwrap();
    let inner = doc.create_element("input").unwrap();
    inner.set_attribute("name", "wasm-shadowed").unwrap();
    shadow.append_child(&inner).unwrap();

    let found = resolve_selector(r#"input[name="wasm-shadowed"]"#, &doc).unwrap();
    assert!(found.is_same_node(Some(inner.as_ref())));
    assert_eq!(
        resolve_all_selectors(r#"input[name="wasm-shadowed"]"#, &doc).length(),
        1
    );
    container.remove();
}

#[wasm_bindgen_test]
fn test_invalid_inputs_do_not_throw() {
    let doc = document();
    assert!(resolve_selector("input[name=", &doc).is_none());
    assert!(resolve_selector("input", &JsValue::NULL).is_none());
    assert!(compute_selector(&JsValue::from_str("not an element")).is_none());
    assert!(!set_element_value(&JsValue::UNDEFINED, "x"));
}

#[wasm_bindgen_test]
fn test_patterns() {
    assert_eq!(
        to_pattern("https://shop.example.com/orders/58213/items/9f8e7d6c5b4a"),
        "https://shop.example.com/orders/*/items/*/*"
    );
    assert!(matches_pattern("https://a.com/dashboard/*", "https://a.com/dashboard"));

    let normalized = normalize_url("https://a.com/x?q=1");
    assert_eq!(get(&normalized, "origin").as_string().unwrap(), "https://a.com");
    assert_eq!(get(&normalized, "path").as_string().unwrap(), "/x");

    let validation = validate_url_pattern("");
    assert_eq!(get(&validation, "isValid").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn test_robustness_object() {
    let result = validate_selector_robustness("button#submit-button");
    assert_eq!(get(&result, "score").as_f64(), Some(100.0));
    assert_eq!(get(&result, "isRobust").as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn test_get_and_set_values() {
    let doc = document();
    let container = fresh_container(&doc);
    let text = input(&doc, &container, &[("name", "wasm-text")]);
    let check = input(&doc, &container, &[("type", "checkbox")]);
    let mut radios = Vec::new();
    for value in ["s", "m", "l"] {
        radios.push(input(
            &doc,
            &container,
            &[("type", "radio"), ("name", "wasm-size"), ("value", value)],
        ));
    }

    assert!(set_element_value(&text, "hello"));
    assert_eq!(text.value(), "hello");
    assert_eq!(get_element_value(&text).as_deref(), Some("hello"));

    assert!(set_element_value(&check, "True"));
    assert!(check.checked());
    assert_eq!(get_element_value(&check).as_deref(), Some("true"));

    assert!(set_element_value(&radios[0], "m"));
    let states: Vec<bool> = radios.iter().map(|r| r.checked()).collect();
    assert_eq!(states, vec![false, true, false]);
    assert_eq!(get_element_value(&radios[1]).as_deref(), Some("m"));
    container.remove();
}

#[wasm_bindgen_test]
fn test_init_logging_twice() {
    init_logging(Some("debug".to_string()));
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    init_logging(None);
    assert_eq!(log::max_level(), log::LevelFilter::Warn);
}

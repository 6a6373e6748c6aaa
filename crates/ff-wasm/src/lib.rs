//! WebAssembly bindings for FillFlux
//!
//! Thin glue between the content script and `ff-core`. Nothing here throws:
//! bad handles and unparseable input come back as `null`, `false` or an
//! `{ isValid: false }` object.

use std::sync::Once;

use log::{Level, LevelFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventInit, EventTarget, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use ff_core::dom::QueryScope;
use ff_core::value::{FillAction, FillPlan};

pub mod dom;

pub use dom::{WebElement, WebScope};

static LOGGER: Once = Once::new();

/// Route `log` output and panics to the console. `level` is a `log` level
/// name (`"debug"`, `"off"`, ...); unknown or missing names mean `warn`.
/// Later calls only change the level.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    LOGGER.call_once(|| {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(Level::Trace));
    });
    log::set_max_level(parse_level(level.as_deref()));
}

fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|name| name.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

#[wasm_bindgen(js_name = computeSelector)]
pub fn compute_selector(element: &JsValue) -> Option<String> {
    let element = WebElement::from_js(element)?;
    ff_core::compute_selector(&element)
}

/// First element matching `selector` in `root` or one of its shadow roots.
#[wasm_bindgen(js_name = resolveSelector)]
pub fn resolve_selector(selector: &str, root: &JsValue) -> Option<web_sys::Element> {
    let root = WebScope::from_js(root)?;
    ff_core::resolve(selector, &root).map(|found| found.0)
}

#[wasm_bindgen(js_name = resolveAllSelectors)]
pub fn resolve_all_selectors(selector: &str, root: &JsValue) -> js_sys::Array {
    let result = js_sys::Array::new();
    if let Some(root) = WebScope::from_js(root) {
        for found in ff_core::resolve_all(selector, &root) {
            result.push(&found.0);
        }
    }
    result
}

#[wasm_bindgen(js_name = toPattern)]
pub fn to_pattern(url: &str) -> String {
    ff_core::to_pattern(url)
}

#[wasm_bindgen(js_name = matchesPattern)]
pub fn matches_pattern(pattern: &str, url: &str) -> bool {
    ff_core::matches(pattern, url)
}

#[wasm_bindgen(js_name = normalizeUrl)]
pub fn normalize_url(url: &str) -> JsValue {
    let normalized = ff_core::normalize(url);
    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"origin".into(), &JsValue::from_str(&normalized.origin));
    let _ = js_sys::Reflect::set(&result, &"path".into(), &JsValue::from_str(&normalized.path));
    result.into()
}

#[wasm_bindgen(js_name = validateUrlPattern)]
pub fn validate_url_pattern(pattern: &str) -> JsValue {
    let validation = ff_core::validate_pattern(pattern);
    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"isValid".into(), &JsValue::from(validation.is_valid));
    if let Some(error) = validation.error {
        let _ = js_sys::Reflect::set(&result, &"error".into(), &JsValue::from_str(&error));
    }
    result.into()
}

#[wasm_bindgen(js_name = validateSelectorRobustness)]
pub fn validate_selector_robustness(selector: &str) -> JsValue {
    let robustness = ff_core::score_selector(selector);
    let result = js_sys::Object::new();
    let issues = js_sys::Array::new();
    for issue in &robustness.issues {
        issues.push(&JsValue::from_str(issue));
    }
    let _ = js_sys::Reflect::set(&result, &"score".into(), &JsValue::from(robustness.score));
    let _ = js_sys::Reflect::set(&result, &"issues".into(), &issues);
    let _ = js_sys::Reflect::set(&result, &"isRobust".into(), &JsValue::from(robustness.is_robust));
    result.into()
}

#[wasm_bindgen(js_name = getElementValue)]
pub fn get_element_value(element: &JsValue) -> Option<String> {
    let element = WebElement::from_js(element)?;
    ff_core::read_value(&element)
}

/// Paste `value` into `element`, dispatching the usual bubbling events.
/// Returns `false` if `element` is not an element or an event could not be
/// dispatched.
#[wasm_bindgen(js_name = setElementValue)]
pub fn set_element_value(element: &JsValue, value: &str) -> bool {
    let Some(element) = WebElement::from_js(element) else {
        return false;
    };
    let Some(plan) = ff_core::plan_fill(&element, value) else {
        return false;
    };
    apply_plan(&element, &plan);
    match dispatch_events(&element.0, plan.events) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("event dispatch failed: {err:?}");
            false
        }
    }
}

fn apply_plan(element: &WebElement, plan: &FillPlan) {
    let el = &element.0;
    match &plan.action {
        FillAction::SetValue(value) => {
            if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                input.set_value(value);
            } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
                area.set_value(value);
            } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
                select.set_value(value);
            }
        }
        FillAction::SetChecked(checked) => {
            if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                input.set_checked(*checked);
            }
        }
        FillAction::CheckRadioGroup { group_selector, .. } => {
            let group = WebScope::containing(el)
                .and_then(|scope| scope.query_selector_all(group_selector).ok())
                .unwrap_or_default();
            for radio in group {
                if let Some(input) = radio.0.dyn_ref::<HtmlInputElement>() {
                    input.set_checked(plan.checks_radio(&input.value()));
                }
            }
        }
        FillAction::Unchanged => {}
        FillAction::SetInnerText(text) => {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                html.set_inner_text(text);
            }
        }
        FillAction::SetTextContent(text) => el.set_text_content(Some(text)),
    }
}

fn dispatch_events(target: &EventTarget, events: &[&str]) -> Result<(), JsValue> {
    let init = EventInit::new();
    init.set_bubbles(true);
    for name in events {
        let event = Event::new_with_event_init_dict(name, &init)?;
        target.dispatch_event(&event)?;
    }
    Ok(())
}

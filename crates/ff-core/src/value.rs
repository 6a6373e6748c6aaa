//! Value capture and fill planning
//!
//! Reading follows what a user would call "the value" of a control: the
//! selected option, the checkbox state, the typed text. Filling is split
//! in two: [`plan_fill`] decides what should change, the host applies it.

use crate::dom::FormControl;
use crate::escape::css_escape;

/// Events dispatched after setting a `<select>`.
pub const SELECT_EVENTS: &[&str] = &["change"];

/// Events dispatched after editing anything typeable.
pub const INPUT_EVENTS: &[&str] = &["input", "change"];

/// What a paste changes on the target element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillAction {
    /// Assign the `value` property.
    SetValue(String),
    /// Assign the `checked` property.
    SetChecked(bool),
    /// Check the radio in `group_selector` whose value equals `value`,
    /// uncheck the rest.
    CheckRadioGroup { group_selector: String, value: String },
    /// Nothing to change (an unnamed radio with a different value).
    Unchanged,
    /// Replace rendered text of a content-editable element.
    SetInnerText(String),
    /// Replace all text content.
    SetTextContent(String),
}

/// A fill action plus the bubbling events to dispatch afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPlan {
    pub action: FillAction,
    pub events: &'static [&'static str],
}

impl FillPlan {
    fn new(action: FillAction, events: &'static [&'static str]) -> Self {
        Self { action, events }
    }

    /// True if a radio with `radio_value` should end up checked.
    pub fn checks_radio(&self, radio_value: &str) -> bool {
        match &self.action {
            FillAction::CheckRadioGroup { value, .. } => value == radio_value,
            FillAction::SetChecked(checked) => *checked,
            _ => false,
        }
    }
}

/// Current value of `element`, `None` for non-elements.
pub fn read_value<E: FormControl>(element: &E) -> Option<String> {
    if !element.is_element() {
        return None;
    }

    let tag = element.tag_name().to_ascii_lowercase();
    let kind = input_type(element);

    let value = match tag.as_str() {
        "select" => element.value().unwrap_or_default(),
        "input" | "textarea" => match kind.as_str() {
            "checkbox" => element.checked().to_string(),
            "radio" if element.checked() => element.value().unwrap_or_default(),
            "radio" => String::new(),
            _ => element.value().unwrap_or_default(),
        },
        _ if element.is_content_editable() => element.inner_text(),
        _ => element.text_content().trim().to_string(),
    };
    Some(value)
}

/// Work out how `value` would be pasted into `element`. `None` for
/// non-elements.
pub fn plan_fill<E: FormControl>(element: &E, value: &str) -> Option<FillPlan> {
    if !element.is_element() {
        return None;
    }

    let tag = element.tag_name().to_ascii_lowercase();
    let kind = input_type(element);

    let plan = match tag.as_str() {
        "select" => FillPlan::new(FillAction::SetValue(value.to_string()), SELECT_EVENTS),
        "input" | "textarea" => {
            let action = match kind.as_str() {
                "checkbox" => FillAction::SetChecked(value.eq_ignore_ascii_case("true")),
                "radio" => radio_action(element, value),
                _ => FillAction::SetValue(value.to_string()),
            };
            FillPlan::new(action, INPUT_EVENTS)
        }
        _ if element.is_content_editable() => {
            FillPlan::new(FillAction::SetInnerText(value.to_string()), INPUT_EVENTS)
        }
        _ => FillPlan::new(FillAction::SetTextContent(value.to_string()), &[]),
    };
    Some(plan)
}

/// Selector for every radio sharing `name`.
pub fn radio_group_selector(name: &str) -> String {
    format!("input[type=\"radio\"][name=\"{}\"]", css_escape(name))
}

fn radio_action<E: FormControl>(element: &E, value: &str) -> FillAction {
    match element.attribute("name").filter(|name| !name.is_empty()) {
        Some(name) => FillAction::CheckRadioGroup {
            group_selector: radio_group_selector(&name),
            value: value.to_string(),
        },
        None if element.value().unwrap_or_default() == value => FillAction::SetChecked(true),
        None => FillAction::Unchanged,
    }
}

fn input_type<E: FormControl>(element: &E) -> String {
    element
        .attribute("type")
        .unwrap_or_default()
        .to_ascii_lowercase()
}

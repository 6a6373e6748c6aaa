//! Selector generation
//!
//! Derives a replayable CSS selector for one element, preferring attributes
//! that survive page reloads over structural position:
//!
//! 1. `tag#id` when the id does not look generated,
//! 2. `tag[name][data-testid][role]` from whichever of those are present,
//! 3. a short `ancestor > ... > element` path with filtered classes and
//!    `:nth-of-type()` where siblings share a tag.

use std::fmt::Write;

use log::debug;

use crate::dom::DomElement;
use crate::escape::css_escape;
use crate::types::{ComputedSelector, Strategy};

/// Ids and classes with this many consecutive ASCII digits are treated as
/// generated and never used.
pub const VOLATILE_DIGIT_RUN: usize = 3;

/// Maximum number of levels in a path selector, the element included.
pub const MAX_PATH_DEPTH: usize = 5;

/// At most this many classes are kept per path level, in attribute order.
pub const MAX_CLASSES_PER_LEVEL: usize = 2;

/// Classes longer than this (in characters) are skipped.
pub const MAX_CLASS_LEN: usize = 40;

/// Checked in this order; all present ones are combined.
pub const STABLE_ATTRIBUTES: [&str; 3] = ["name", "data-testid", "role"];

/// Compute a selector for `element`. `None` if it is not an element.
pub fn compute_selector<E: DomElement>(element: &E) -> Option<String> {
    compute_selector_with_strategy(element).map(|computed| computed.selector)
}

/// Like [`compute_selector`], also reporting which rule fired.
pub fn compute_selector_with_strategy<E: DomElement>(element: &E) -> Option<ComputedSelector> {
    if !element.is_element() {
        return None;
    }
    let tag = element.tag_name().to_lowercase();
    if tag.is_empty() {
        return None;
    }

    let computed = if let Some(selector) = id_selector(&tag, element) {
        ComputedSelector {
            selector,
            strategy: Strategy::Id,
        }
    } else if let Some(selector) = attribute_selector(&tag, element) {
        ComputedSelector {
            selector,
            strategy: Strategy::Attributes,
        }
    } else {
        ComputedSelector {
            selector: path_selector(element),
            strategy: Strategy::Path,
        }
    };

    debug!(
        "computed {} selector: {}",
        computed.strategy.as_str(),
        computed.selector
    );
    Some(computed)
}

/// True if `value` contains a run of at least [`VOLATILE_DIGIT_RUN`] ASCII
/// digits (`user_47291`, `ember1234`).
pub fn has_volatile_digits(value: &str) -> bool {
    let mut run = 0;
    for c in value.chars() {
        if c.is_ascii_digit() {
            run += 1;
            if run >= VOLATILE_DIGIT_RUN {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

fn id_selector<E: DomElement>(tag: &str, element: &E) -> Option<String> {
    let id = element.attribute("id").filter(|id| !id.is_empty())?;
    if has_volatile_digits(&id) {
        return None;
    }
    Some(format!("{tag}#{}", css_escape(&id)))
}

fn attribute_selector<E: DomElement>(tag: &str, element: &E) -> Option<String> {
    let mut selector = tag.to_string();
    let mut found = false;

    for name in STABLE_ATTRIBUTES {
        if let Some(value) = element.attribute(name).filter(|v| !v.is_empty()) {
            let _ = write!(selector, "[{name}=\"{}\"]", css_escape(&value));
            found = true;
        }
    }

    found.then_some(selector)
}

fn path_selector<E: DomElement>(element: &E) -> String {
    let mut levels: Vec<String> = Vec::with_capacity(MAX_PATH_DEPTH);
    let mut node = Some(element.clone());

    while let Some(current) = node {
        if !current.is_element() || levels.len() >= MAX_PATH_DEPTH {
            break;
        }

        let mut level = current.tag_name().to_lowercase();
        for class in stable_classes(&current) {
            level.push('.');
            level.push_str(&css_escape(&class));
        }

        let parent = current.parent_element();
        if let Some(parent) = &parent {
            if let Some(position) = position_among_same_tag(parent, &current) {
                let _ = write!(level, ":nth-of-type({position})");
            }
        }

        levels.push(level);
        node = parent;
    }

    levels.reverse();
    levels.join(" > ")
}

/// Classes worth keeping in a path level: not generated-looking, not huge,
/// at most [`MAX_CLASSES_PER_LEVEL`] of them.
fn stable_classes<E: DomElement>(element: &E) -> Vec<String> {
    element
        .attribute("class")
        .unwrap_or_default()
        .split_ascii_whitespace()
        .filter(|class| !has_volatile_digits(class) && class.chars().count() <= MAX_CLASS_LEN)
        .take(MAX_CLASSES_PER_LEVEL)
        .map(str::to_string)
        .collect()
}

/// 1-based position of `element` among `parent`'s children with the same
/// tag, or `None` when it is the only one.
fn position_among_same_tag<E: DomElement>(parent: &E, element: &E) -> Option<usize> {
    let tag = element.tag_name();
    let same_tag: Vec<E> = parent
        .children()
        .into_iter()
        .filter(|child| child.tag_name() == tag)
        .collect();
    if same_tag.len() < 2 {
        return None;
    }
    same_tag
        .iter()
        .position(|child| child == element)
        .map(|index| index + 1)
}

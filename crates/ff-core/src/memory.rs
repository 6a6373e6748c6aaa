//! In-memory static document
//!
//! A parsed HTML page (via `scraper`) that implements the DOM traits for tests
//! and the CLI. Queries go through `scraper::Selector`, so selector support
//! is whatever the `selectors` crate parses.
//!
//! Shadow roots are written the declarative way, as a
//! `<template shadowrootmode="open">` child of the host. The template and its
//! contents are kept out of the host's children, and queries against a scope
//! never cross into a shadow tree, as in a browser. Form state comes from the
//! markup (`value`, `checked`, `selected`, `contenteditable`).

use scraper::{Html, Selector};

pub use scraper::ElementRef;

use crate::dom::{DomElement, FormControl, QueryScope, SelectorError};

/// A static document tree.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML page. Missing `<html>`, `<head>` and `<body>` are
    /// added the way browsers add them.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Query scope for the whole document.
    pub fn scope(&self) -> Scope<'_> {
        Scope::Document(&self.html)
    }

    /// Every element in tree order, shadow trees included (a shadow tree
    /// comes where its template sits inside the host).
    pub fn all_elements(&self) -> Vec<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| !is_shadow_root(element))
            .collect()
    }

    /// First element matching `selector` in the document or one of its
    /// shadow roots.
    pub fn find(&self, selector: &str) -> Option<ElementRef<'_>> {
        crate::resolve::resolve(selector, &self.scope())
    }
}

/// `<template shadowrootmode>` (or the older `shadowroot` attribute).
fn is_shadow_root(element: &ElementRef<'_>) -> bool {
    let data = element.value();
    data.name() == "template"
        && (data.attr("shadowrootmode").is_some() || data.attr("shadowroot").is_some())
}

/// Shadow root template `element` lives under, `None` in the document tree.
fn containing_shadow_root<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(is_shadow_root)
}

fn has_tag(element: &ElementRef<'_>, tag: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(tag)
}

fn collect_text(element: &ElementRef<'_>, out: &mut String) {
    for child in (**element).children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !is_shadow_root(&child) {
                collect_text(&child, out);
            }
        }
    }
}

// =============================================================================
// ElementRef
// =============================================================================

impl<'a> DomElement for ElementRef<'a> {
    type ShadowRoot = Scope<'a>;

    fn tag_name(&self) -> String {
        self.value().name().to_ascii_uppercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        // The parser lower-cases attribute names.
        self.value()
            .attr(&name.to_ascii_lowercase())
            .map(str::to_string)
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent()
            .and_then(ElementRef::wrap)
            .filter(|parent| !is_shadow_root(parent))
    }

    fn children(&self) -> Vec<Self> {
        (**self)
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| !is_shadow_root(child))
            .collect()
    }

    fn sibling_elements(&self) -> Vec<Self> {
        match self.parent() {
            Some(parent) => parent
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|sibling| !is_shadow_root(sibling))
                .collect(),
            None => vec![*self],
        }
    }

    fn shadow_root(&self) -> Option<Scope<'a>> {
        (**self)
            .children()
            .filter_map(ElementRef::wrap)
            .find(is_shadow_root)
            .map(Scope::ShadowRoot)
    }
}

impl FormControl for ElementRef<'_> {
    fn value(&self) -> Option<String> {
        if has_tag(self, "input") {
            Some(self.attribute("value").unwrap_or_default())
        } else if has_tag(self, "textarea") {
            Some(self.text_content())
        } else if has_tag(self, "select") {
            Some(selected_option_value(self))
        } else {
            None
        }
    }

    fn checked(&self) -> bool {
        has_tag(self, "input") && self.attribute("checked").is_some()
    }

    fn is_content_editable(&self) -> bool {
        let mut cursor = Some(*self);
        while let Some(element) = cursor {
            match element.attribute("contenteditable").as_deref() {
                Some("" | "true" | "plaintext-only") => return true,
                Some("false") => return false,
                _ => {}
            }
            cursor = element.parent_element();
        }
        false
    }

    fn inner_text(&self) -> String {
        self.text_content()
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

/// Value of the `selected` option, else the first option. An option's value
/// falls back to its text.
fn selected_option_value(select: &ElementRef<'_>) -> String {
    let options: Vec<ElementRef<'_>> = select
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| has_tag(element, "option"))
        .collect();
    let chosen = options
        .iter()
        .find(|option| option.attribute("selected").is_some())
        .or_else(|| options.first());
    match chosen {
        Some(option) => option
            .attribute("value")
            .unwrap_or_else(|| option.text_content().trim().to_string()),
        None => String::new(),
    }
}

// =============================================================================
// Scope
// =============================================================================

/// A document, shadow root or element to run selector queries against.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Document(&'a Html),
    /// The `<template shadowrootmode>` holding the shadow tree.
    ShadowRoot(ElementRef<'a>),
    Element(ElementRef<'a>),
}

impl<'a> Scope<'a> {
    /// Host element of a shadow root scope.
    pub fn host(&self) -> Option<ElementRef<'a>> {
        match self {
            Scope::ShadowRoot(template) => template.parent().and_then(ElementRef::wrap),
            _ => None,
        }
    }

    /// Elements of this scope's tree in tree order, not entering shadow
    /// trees. An element scope does not include the element itself.
    pub fn elements(&self) -> Vec<ElementRef<'a>> {
        let (start, tree, skip_start) = match *self {
            Scope::Document(html) => (html.root_element(), None, false),
            Scope::ShadowRoot(template) => (template, Some(template), true),
            Scope::Element(element) => (element, containing_shadow_root(&element), true),
        };
        start
            .descendants()
            .skip(usize::from(skip_start))
            .filter_map(ElementRef::wrap)
            .filter(|element| !is_shadow_root(element) && containing_shadow_root(element) == tree)
            .collect()
    }
}

impl<'a> QueryScope for Scope<'a> {
    type Element = ElementRef<'a>;

    fn query_selector_all(&self, selectors: &str) -> Result<Vec<ElementRef<'a>>, SelectorError> {
        if selectors.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let selector =
            Selector::parse(selectors).map_err(|err| SelectorError::Syntax(err.to_string()))?;
        Ok(self
            .elements()
            .into_iter()
            .filter(|element| selector.matches(element))
            .collect())
    }
}

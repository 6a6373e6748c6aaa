//! `web-sys` implementations of the core DOM traits.

use ff_core::dom::{DomElement, FormControl, QueryScope};
use ff_core::SelectorError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, DocumentFragment, Element, HtmlCollection, HtmlElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Node, NodeList, ShadowRoot,
};

/// A live browser element.
#[derive(Debug, Clone)]
pub struct WebElement(pub Element);

impl PartialEq for WebElement {
    fn eq(&self, other: &Self) -> bool {
        self.0.is_same_node(Some(&other.0))
    }
}

impl WebElement {
    /// Wrap `value` if it is an element.
    pub fn from_js(value: &JsValue) -> Option<Self> {
        value.dyn_ref::<Element>().cloned().map(WebElement)
    }
}

impl DomElement for WebElement {
    type ShadowRoot = WebScope;

    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent_element().map(WebElement)
    }

    fn children(&self) -> Vec<Self> {
        collect_elements(&self.0.children())
    }

    fn sibling_elements(&self) -> Vec<Self> {
        let Some(parent) = self.0.parent_node() else {
            return vec![self.clone()];
        };
        if let Some(element) = parent.dyn_ref::<Element>() {
            collect_elements(&element.children())
        } else if let Some(document) = parent.dyn_ref::<Document>() {
            collect_elements(&document.children())
        } else if let Some(fragment) = parent.dyn_ref::<DocumentFragment>() {
            collect_elements(&fragment.children())
        } else {
            vec![self.clone()]
        }
    }

    fn shadow_root(&self) -> Option<WebScope> {
        self.0.shadow_root().map(WebScope::Shadow)
    }
}

impl FormControl for WebElement {
    fn value(&self) -> Option<String> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            Some(area.value())
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            Some(select.value())
        } else {
            None
        }
    }

    fn checked(&self) -> bool {
        self.0
            .dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn is_content_editable(&self) -> bool {
        self.0
            .dyn_ref::<HtmlElement>()
            .is_some_and(HtmlElement::is_content_editable)
    }

    fn inner_text(&self) -> String {
        match self.0.dyn_ref::<HtmlElement>() {
            Some(html) => html.inner_text(),
            None => self.text_content(),
        }
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }
}

/// A query root: a document, a shadow root or an element.
#[derive(Debug, Clone)]
pub enum WebScope {
    Document(Document),
    Shadow(ShadowRoot),
    Element(Element),
}

impl WebScope {
    /// Accepts `Document`, `ShadowRoot` or `Element` handles.
    pub fn from_js(value: &JsValue) -> Option<Self> {
        if let Some(document) = value.dyn_ref::<Document>() {
            Some(WebScope::Document(document.clone()))
        } else if let Some(shadow) = value.dyn_ref::<ShadowRoot>() {
            Some(WebScope::Shadow(shadow.clone()))
        } else {
            value.dyn_ref::<Element>().cloned().map(WebScope::Element)
        }
    }

    /// The document or shadow root `node` lives in.
    pub fn containing(node: &Node) -> Option<Self> {
        Self::from_js(&node.get_root_node())
    }
}

impl QueryScope for WebScope {
    type Element = WebElement;

    fn query_selector_all(&self, selectors: &str) -> Result<Vec<WebElement>, SelectorError> {
        let list = match self {
            WebScope::Document(document) => document.query_selector_all(selectors),
            WebScope::Shadow(shadow) => shadow.query_selector_all(selectors),
            WebScope::Element(element) => element.query_selector_all(selectors),
        }
        .map_err(host_error)?;
        Ok(nodes_to_elements(&list))
    }
}

fn host_error(err: JsValue) -> SelectorError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "querySelectorAll failed".to_string());
    SelectorError::Host(message)
}

fn nodes_to_elements(list: &NodeList) -> Vec<WebElement> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(WebElement)
        .collect()
}

fn collect_elements(collection: &HtmlCollection) -> Vec<WebElement> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .map(WebElement)
        .collect()
}

//! DOM capability traits
//!
//! The engines never touch a browser DOM directly. Anything that can answer
//! these few questions (the `web-sys` adapter, the in-memory [`Document`],
//! a test fake) can be fed to them.
//!
//! [`Document`]: crate::memory::Document

/// Error raised when a selector cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,
    #[error("Invalid selector: {0}")]
    Syntax(String),
    /// Raised by a host engine (e.g. the browser's `querySelectorAll`).
    #[error("Selector rejected by host: {0}")]
    Host(String),
}

/// Read-only view of one element.
pub trait DomElement: Clone + PartialEq + Sized {
    /// Shadow root type attached to hosts of this element type.
    type ShadowRoot: QueryScope<Element = Self>;

    /// `false` for handles that point at something other than an element
    /// (a text node, a document). Engines return `None` for those.
    fn is_element(&self) -> bool {
        true
    }

    /// Tag name as the DOM reports it (upper-case for HTML elements).
    fn tag_name(&self) -> String;

    /// Attribute lookup. Missing attributes are `None`, empty ones `Some("")`.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Parent *element*. `None` at the document root and at the top level
    /// of a shadow tree.
    fn parent_element(&self) -> Option<Self>;

    /// Child elements in tree order (text nodes excluded).
    fn children(&self) -> Vec<Self>;

    /// Elements sharing this element's parent node, including itself.
    ///
    /// The default goes through [`parent_element`](Self::parent_element),
    /// which misses siblings whose parent is a document or shadow root.
    /// Providers that can see those should override it.
    fn sibling_elements(&self) -> Vec<Self> {
        match self.parent_element() {
            Some(parent) => parent.children(),
            None => vec![self.clone()],
        }
    }

    /// Open shadow root hosted by this element, if any.
    fn shadow_root(&self) -> Option<Self::ShadowRoot>;
}

/// Something `querySelectorAll` can be run against: a document, a shadow
/// root or an element.
pub trait QueryScope {
    type Element;

    /// All matching descendants in tree order.
    fn query_selector_all(&self, selectors: &str) -> Result<Vec<Self::Element>, SelectorError>;

    /// First matching descendant.
    fn query_selector(&self, selectors: &str) -> Result<Option<Self::Element>, SelectorError> {
        Ok(self.query_selector_all(selectors)?.into_iter().next())
    }
}

/// Live form state, needed for value capture and paste planning.
pub trait FormControl: DomElement {
    /// The `value` IDL property for inputs, textareas and selects.
    fn value(&self) -> Option<String>;

    /// The `checked` IDL property (false for non-checkable elements).
    fn checked(&self) -> bool;

    fn is_content_editable(&self) -> bool;

    /// Rendered text.
    fn inner_text(&self) -> String;

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self) -> String;
}

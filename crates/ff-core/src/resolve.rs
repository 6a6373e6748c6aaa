//! Selector resolution across the document and shallow shadow roots
//!
//! A selector is first run against the document itself. If that finds
//! nothing, every element of the document that hosts a shadow root is
//! visited in document order and the selector is run inside its shadow root.
//! Only one level of shadow roots is searched. Selector syntax errors are
//! logged and treated as "no match" so the remaining scopes still get tried.

use log::{debug, trace};

use crate::dom::{DomElement, QueryScope};

/// First element matching `selector`, or `None`.
pub fn resolve<S>(selector: &str, root: &S) -> Option<S::Element>
where
    S: QueryScope,
    S::Element: DomElement,
{
    if selector.trim().is_empty() {
        return None;
    }

    match root.query_selector(selector) {
        Ok(Some(found)) => return Some(found),
        Ok(None) => {}
        Err(err) => debug!("document query failed for {selector:?}: {err}"),
    }

    for host in shadow_hosts(root) {
        let Some(shadow) = host.shadow_root() else {
            continue;
        };
        match shadow.query_selector(selector) {
            Ok(Some(found)) => {
                trace!("resolved {selector:?} inside a shadow root");
                return Some(found);
            }
            Ok(None) => {}
            Err(err) => trace!("shadow root query failed for {selector:?}: {err}"),
        }
    }

    None
}

/// Every element matching `selector`: document matches first, then shadow
/// root matches host by host.
pub fn resolve_all<S>(selector: &str, root: &S) -> Vec<S::Element>
where
    S: QueryScope,
    S::Element: DomElement,
{
    if selector.trim().is_empty() {
        return Vec::new();
    }

    let mut found = match root.query_selector_all(selector) {
        Ok(elements) => elements,
        Err(err) => {
            debug!("document query failed for {selector:?}: {err}");
            Vec::new()
        }
    };

    for host in shadow_hosts(root) {
        let Some(shadow) = host.shadow_root() else {
            continue;
        };
        match shadow.query_selector_all(selector) {
            Ok(elements) => found.extend(elements),
            Err(err) => trace!("shadow root query failed for {selector:?}: {err}"),
        }
    }

    found
}

/// Elements of `root` hosting a shadow root, in document order.
fn shadow_hosts<S>(root: &S) -> Vec<S::Element>
where
    S: QueryScope,
    S::Element: DomElement,
{
    match root.query_selector_all("*") {
        Ok(elements) => elements
            .into_iter()
            .filter(|element| element.shadow_root().is_some())
            .collect(),
        Err(err) => {
            debug!("could not enumerate shadow hosts: {err}");
            Vec::new()
        }
    }
}

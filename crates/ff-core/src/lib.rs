//! FillFlux Core Library
//!
//! This crate provides the capture and replay engines for the FillFlux form
//! filler: it derives stable CSS selectors for elements the user picks, finds
//! those elements again on later visits, and turns page URLs into patterns
//! that decide which saved profiles apply to a page.
//!
//! # Architecture
//!
//! The engines never talk to a browser directly. Elements and query roots are
//! reached through the traits in [`dom`]; the `ff-wasm` crate implements them
//! over `web-sys`, and [`memory::Document`] implements them over a static tree
//! for tests and the CLI. Every operation takes its root as a parameter.
//!
//! # Modules
//!
//! - `dom`: element, query-scope and form-control capability traits
//! - `memory`: in-memory static document parsed from HTML
//! - `escape`: CSS identifier escaping
//! - `selector`: selector generation
//! - `resolve`: selector resolution through document and shadow roots
//! - `robustness`: advisory selector scoring
//! - `pattern`: URL normalization, pattern generation and matching
//! - `value`: value capture and fill planning
//! - `types`: Shared type definitions

pub mod dom;
pub mod escape;
pub mod memory;
pub mod pattern;
pub mod resolve;
pub mod robustness;
pub mod selector;
pub mod types;
pub mod value;

// Re-export commonly used items
pub use dom::{DomElement, FormControl, QueryScope, SelectorError};
pub use escape::css_escape;
pub use memory::Document;
pub use pattern::{matches, normalize, to_pattern, validate_pattern, PatternError};
pub use resolve::{resolve, resolve_all};
pub use robustness::score_selector;
pub use selector::{compute_selector, compute_selector_with_strategy};
pub use types::{ComputedSelector, NormalizedUrl, PatternValidation, Robustness, Strategy};
pub use value::{plan_fill, read_value, FillAction, FillPlan};

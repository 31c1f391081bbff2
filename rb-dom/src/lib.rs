#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # rb-dom
//!
//! A minimal in-memory document model: an element arena with classes,
//! attributes, `data-*` datasets and text content, plus a matcher for the
//! small selector subset the page contract uses (type/class/id compounds
//! combined with descendant and child combinators).
//!
//! This is not a browser DOM. It exists so the page logic can be
//! constructed and observed in plain unit tests.

mod document;
mod selector;

pub use self::{
    document::{Document, NodeId},
    selector::{ParseSelectorError, Selector},
};

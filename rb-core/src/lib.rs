#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # rb-core
//!
//! The interactive behavior of the recipe site, re-architected from the
//! browser script into explicit state objects over an in-memory document:
//! tag filtering with URL-hash persistence, random recipe selection, and
//! ingredient scaling driven by the serving yield.

pub mod error;
pub mod hash;
pub mod ingredients;
pub mod page;
pub mod selectors;
pub mod tags;

pub use self::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Seam to the host environment's location/history facilities.
///
/// Implementations are expected to keep `pathname`/`hash` consistent with
/// the most recent `push_state` call, the way the browser's `location`
/// reflects `history.pushState`.
pub trait NavigationGateway {
    /// Current path, e.g. `/recipes/`.
    fn pathname(&self) -> String;
    /// Current hash fragment without the leading `#`.
    fn hash(&self) -> String;
    /// Replaces the current path (which may carry a `#fragment`) without
    /// loading a page.
    fn push_state(&self, path: &str);
    /// Reloads the current page.
    fn reload(&self);
    /// Loads another page.
    fn assign(&self, url: &str);
}

#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # rb-entities
//!
//! Reusable, agnostic domain entities for the recipe browser.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific wiring.

pub mod fraction;
pub mod quantity;
pub mod tag;
pub mod yields;

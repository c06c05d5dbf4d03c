//! gramcheck-core — data model, loaders, matching, and score history.
//!
//! This crate holds everything about the quiz that does not talk to a
//! terminal: the validated question model, the JSON loaders, the
//! normalized answer matcher, the append-only score history, and the
//! plain-text review export.

pub mod error;
pub mod history;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod review;

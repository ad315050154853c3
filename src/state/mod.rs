//! Mutation engine.
//!
//! Each operation mutates the flat key/value map and returns the
//! (inverse, forward) patch pair recording it, so that replaying either
//! side of the pair moves the state exactly one mutation back or forward.

mod operations;

pub use operations::{apply_add, apply_remove, apply_replace};

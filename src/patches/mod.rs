//! Patch construction and wire-format parsing.
//!
//! Patches describe mutations in JSON-Patch vocabulary (add, remove,
//! replace) over a flat key namespace. Construction is pure; parsing
//! validates the one precondition the store enforces, that a wire patch
//! carries both an `op` and a `path`.

mod generate;
mod wire;

pub use generate::{add, remove, replace};
pub use wire::{parse_patch, parse_patch_json};

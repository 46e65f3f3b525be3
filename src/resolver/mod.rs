//! Configuration resolver
//!
//! Turns field descriptors plus an ordered rule set (global defaults first,
//! then the model's own rules) into the final, ordered field configuration.
//!
//! # Precedence
//!
//! - Rules apply in declaration order
//! - Last writer wins per attribute, not per rule
//! - Label transforms fold over the label produced so far
//! - Explicit field lists decide which fields are listed and in what order
//!
//! Resolution is a pure function of its inputs: no I/O, no shared state.

mod field;
#[allow(clippy::module_inception)]
mod resolver;

pub use field::{ResolvedField, ResolvedFieldView};
pub use resolver::{Resolution, Resolver};

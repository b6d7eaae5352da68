//! Attribute binding.
//!
//! Maps interleaved vertex bytes onto the named inputs of a linked program.

mod bind;
mod layout;

pub use bind::{bind, BoundLayout};
pub use layout::{AttributeSpec, VertexLayout};

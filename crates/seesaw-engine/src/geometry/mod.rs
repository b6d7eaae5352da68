//! Geometry buffer.
//!
//! CPU vertex definitions and their one-shot upload into static GPU storage.

mod buffer;
mod vertex;

pub use buffer::{fan_indices, GeometryBuffer};
pub use vertex::{flatten, Vertex, QUAD_VERTICES};

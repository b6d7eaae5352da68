//! Color representation shared by the render loop and surfaces.

mod color;

pub use color::Color;

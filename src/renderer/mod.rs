//! WebGPU rendering module
//!
//! Everything is an axis-aligned quad, so the pipeline is a single
//! flat-color triangle list rebuilt from a [`crate::sim::FrameView`] each
//! frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;

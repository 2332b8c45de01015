//! # Assembly Engine
//!
//! The assembly engine coordinates audio probing, slide preparation, pan
//! rendering, and encoding to turn a folder of stills into a finished reel.

pub mod engine;

// Re-exports for convenience
pub use engine::{AssemblyEngine, ReelPlan, SlidePlan};

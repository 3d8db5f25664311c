//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (folded into per-tick input)
//! - Browser binding (wasm32 only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::InputState;
#[cfg(target_arch = "wasm32")]
pub use web::WebSimulation;

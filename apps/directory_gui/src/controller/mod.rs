//! Controller layer: backend events, intent/event reducer, and command dispatch.

pub mod events;
pub mod orchestration;
pub mod reducer;

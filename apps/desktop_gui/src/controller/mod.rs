//! Controller layer: UI events and their routing into the list controller.

pub mod events;
pub mod orchestration;

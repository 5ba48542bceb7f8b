//! Controller layer: UI events, view state machines, and command orchestration.

pub mod events;
pub mod form;
pub mod orchestration;
pub mod table;

//! ECS Components
//!
//! Entity components for agents and the resources holding model-wide state.

pub mod agent;
pub mod model;

pub use agent::*;
pub use model::*;

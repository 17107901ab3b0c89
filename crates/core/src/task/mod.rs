//! Task module
//!
//! Task-related types and the pure list-view logic.

mod model;
mod view;

pub use model::*;
pub use view::*;

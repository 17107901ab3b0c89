//! Auth module
//!
//! User record and credential payloads for the auth service.

mod model;

pub use model::*;

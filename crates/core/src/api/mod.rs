//! HTTP client for the remote auth and task services

mod client;
mod response;

pub use client::{ApiClient, PAGE_LIMIT};
pub use response::{ApiResponse, ValidationError};

//! Core library for Taskpad
//!
//! This crate contains the client-side domain logic, including:
//! - Task and user models
//! - Task list view logic (search, counts, overdue flag)
//! - Typed HTTP client for the remote auth and task services

pub mod api;
pub mod auth;
pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

//! Sentio Core
//!
//! Core domain types, traits, and error handling for Sentio.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used across all other crates.

pub mod analysis;
pub mod cache;
pub mod error;
pub mod ids;
pub mod job;
pub mod ports;
pub mod validate;

pub use error::{Error, Result};
pub use ids::*;

//! Shared configuration, constants and error types for the vformat crates.

pub mod config;
pub mod constants;
pub mod error;

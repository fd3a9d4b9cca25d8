//! # causerie-shared
//!
//! Domain types, identifiers, error taxonomy and constants shared by every
//! Causerie crate.  This crate is dependency-light on purpose: everything
//! here is plain data that both the chat engine and the application shell
//! pass back and forth.

pub mod constants;
pub mod error;
pub mod types;

pub use error::ChatError;
pub use types::*;

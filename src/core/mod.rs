//! Core scenario model and resolution
//!
//! This module loads scenario documents, validates their shape and
//! essential keys, and merges the project scenario with the common one.

pub mod config;
pub mod document;
pub mod error;
pub mod keys;
pub mod merge;
pub mod resolver;
pub mod schema;
pub mod step;

pub use error::*;
pub use resolver::*;
pub use step::*;

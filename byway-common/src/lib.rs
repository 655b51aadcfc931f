//! Common utilities for the byway routing toolkit

pub mod error;

pub use error::{Error, Result};

//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod convert;
pub mod init;
pub mod validate;

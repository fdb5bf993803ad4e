//! Common test utilities for shellreg-core
//!
//! This module provides shared test infrastructure including:
//! - Constants for host paths and names
//! - ProgId and host fixtures
//! - Assertion helpers over the in-memory key store

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod constants;
pub mod fixtures;

pub use assertions::*;
pub use constants::*;
pub use fixtures::*;

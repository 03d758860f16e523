//! CLI command implementations.

pub mod backends;
pub mod common;
pub mod experiments;
pub mod qasm;
pub mod random;
pub mod search;
pub mod unicorn;
pub mod version;
